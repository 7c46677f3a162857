//! AccessTokenId Value Object
//!
//! Public half of an access token. The client presents it in the token
//! value so the server can look the row up without scanning hashes.

use std::str::FromStr;

use nid::Nanoid;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccessTokenId(Nanoid);

impl AccessTokenId {
    #[inline]
    pub fn new() -> Self {
        Self(Nanoid::new())
    }

    /// `None` unless `s` is a 21-character nanoid
    #[inline]
    pub fn parse_str(s: &str) -> Option<Self> {
        Nanoid::from_str(s).ok().map(Self)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for AccessTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccessTokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}
