//! Maintenance
//!
//! Removes credentials that can no longer be used. Run at startup.

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AccessTokenRepository, PasswordResetRepository};
use crate::error::AuthResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub access_tokens: u64,
    pub password_resets: u64,
}

/// Delete expired password resets, and expired access tokens when a TTL
/// is configured
pub async fn purge_expired<R>(repo: &R, config: &AuthConfig) -> AuthResult<PurgeReport>
where
    R: AccessTokenRepository + PasswordResetRepository + Sync,
{
    let now = Utc::now();

    let password_resets = repo
        .delete_created_before(now - config.password_reset_ttl_delta())
        .await?;

    let access_tokens = if config.access_token_ttl.is_some() {
        repo.delete_expired(now).await?
    } else {
        0
    };

    Ok(PurgeReport {
        access_tokens,
        password_resets,
    })
}
