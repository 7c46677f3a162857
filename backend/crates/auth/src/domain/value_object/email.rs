//! Email Value Object
//!
//! Login identifier of an account. Input is trimmed and lowercased before
//! any check runs, so lookups and the unique index always see one form.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

/// Maximum email length (RFC 5321 path limit)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalize and validate user input
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::unprocessable("Email is required"));
        }

        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Email must be at most {EMAIL_MAX_LENGTH} characters"
            )));
        }

        if !is_valid_format(&email) {
            return Err(AppError::unprocessable("Email must be a valid email address"));
        }

        Ok(Self(email))
    }

    /// Rebuild from a stored value
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `local@domain.tld` with a dotted, ASCII domain
fn is_valid_format(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
        return false;
    }

    if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    if !domain.contains('.') || domain.contains("..") {
        return false;
    }

    domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-'])
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
