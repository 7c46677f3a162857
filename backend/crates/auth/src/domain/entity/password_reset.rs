//! Password Reset Entity
//!
//! Single-use token letting a user set a new password without the old one.
//! The raw token goes to the user; the table keeps its SHA-256 only.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::{PasswordResetId, UserId};
use platform::crypto::{random_token, sha256};

/// Random bytes in a raw reset token
pub const RESET_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub reset_id: PasswordResetId,
    pub user_id: UserId,
    /// SHA-256 of the raw token, unique
    pub token_hash: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    /// Create a reset for `user_id`, returning it with the raw token
    pub fn issue(user_id: UserId) -> (Self, String) {
        let raw = random_token(RESET_TOKEN_BYTES);

        let reset = Self {
            reset_id: PasswordResetId::new(),
            user_id,
            token_hash: Self::hash_token(&raw),
            created_at: Utc::now(),
        };

        (reset, raw)
    }

    pub fn hash_token(raw: &str) -> Vec<u8> {
        sha256(raw.as_bytes()).to_vec()
    }

    /// Expired once strictly older than `ttl`
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.created_at < now - ttl
    }
}
