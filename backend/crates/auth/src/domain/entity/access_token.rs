//! Access Token Entity
//!
//! Opaque bearer credential issued on login and registration.
//!
//! ## Token value
//! `<prefix><id>.<secret>`, e.g. `oat_V1StGXR8_Z5jdHi6B-myT.<43 chars>`
//!
//! - `id`: 21-char nanoid, primary key of the row
//! - `secret`: 32 random bytes, base64url; only its SHA-256 is stored
//!
//! A database leak alone therefore yields no usable token.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::UserId;
use platform::crypto::{constant_time_eq, random_token, sha256};

use crate::domain::value_object::access_token_id::AccessTokenId;

/// Random bytes in the secret half
pub const ACCESS_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token_id: AccessTokenId,
    pub user_id: UserId,
    /// SHA-256 of the secret half
    pub secret_hash: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    /// `None` means the token lives until logout
    pub expires_at: Option<DateTime<Utc>>,
}

/// Freshly issued token together with the value handed to the client
#[derive(Debug)]
pub struct IssuedAccessToken {
    pub token: AccessToken,
    pub value: String,
}

impl AccessToken {
    /// `None` when `now + ttl` is past the last representable instant
    pub fn issue(
        user_id: UserId,
        prefix: &str,
        ttl: Option<TimeDelta>,
    ) -> Option<IssuedAccessToken> {
        let now = Utc::now();
        let expires_at = match ttl {
            Some(ttl) => Some(now.checked_add_signed(ttl)?),
            None => None,
        };
        let token_id = AccessTokenId::new();
        let secret = random_token(ACCESS_TOKEN_SECRET_BYTES);

        let token = Self {
            token_id,
            user_id,
            secret_hash: sha256(secret.as_bytes()).to_vec(),
            created_at: now,
            last_used_at: None,
            expires_at,
        };

        Some(IssuedAccessToken {
            value: format!("{prefix}{token_id}.{secret}"),
            token,
        })
    }

    /// Split a presented value into its id and secret
    ///
    /// Returns `None` for anything not shaped like a token this server
    /// issued, so callers can reject it without touching storage.
    pub fn parse_value<'a>(prefix: &str, value: &'a str) -> Option<(AccessTokenId, &'a str)> {
        let (id, secret) = value.strip_prefix(prefix)?.split_once('.')?;
        if secret.is_empty() {
            return None;
        }
        Some((AccessTokenId::parse_str(id)?, secret))
    }

    pub fn matches_secret(&self, secret: &str) -> bool {
        constant_time_eq(&sha256(secret.as_bytes()), &self.secret_hash)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_value_format() {
        let issued = AccessToken::issue(UserId::new(), "oat_", None).unwrap();

        let rest = issued.value.strip_prefix("oat_").unwrap();
        let (id, secret) = rest.split_once('.').unwrap();
        assert_eq!(id, issued.token.token_id.as_str());
        assert_eq!(secret.len(), 43);
        assert_ne!(issued.token.secret_hash, secret.as_bytes());
        assert!(issued.token.expires_at.is_none());
    }

    #[test]
    fn test_parse_value_and_match() {
        let issued = AccessToken::issue(UserId::new(), "oat_", None).unwrap();

        let (id, secret) = AccessToken::parse_value("oat_", &issued.value).unwrap();
        assert_eq!(id, issued.token.token_id);
        assert!(issued.token.matches_secret(secret));
        assert!(!issued.token.matches_secret("forged-secret"));
    }

    #[test]
    fn test_parse_value_rejects_malformed() {
        let issued = AccessToken::issue(UserId::new(), "oat_", None).unwrap();
        let without_prefix = issued.value.trim_start_matches("oat_");

        assert!(AccessToken::parse_value("oat_", without_prefix).is_none());
        assert!(AccessToken::parse_value("oat_", "oat_short.secret").is_none());
        assert!(AccessToken::parse_value("oat_", "oat_").is_none());

        let no_secret = format!("oat_{}.", issued.token.token_id);
        assert!(AccessToken::parse_value("oat_", &no_secret).is_none());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let issued =
            AccessToken::issue(UserId::new(), "oat_", Some(TimeDelta::hours(1))).unwrap();

        assert!(!issued.token.is_expired_at(now));
        assert!(issued.token.is_expired_at(now + TimeDelta::hours(2)));

        let forever = AccessToken::issue(UserId::new(), "oat_", None).unwrap();
        assert!(!forever.token.is_expired_at(now + TimeDelta::days(3650)));
    }

    #[test]
    fn test_issue_rejects_unrepresentable_expiry() {
        let ttl = TimeDelta::seconds(10_000_000_000_000);
        assert!(AccessToken::issue(UserId::new(), "oat_", Some(ttl)).is_none());
        assert!(AccessToken::issue(UserId::new(), "oat_", Some(TimeDelta::MAX)).is_none());
    }
}
