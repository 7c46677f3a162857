//! Access Token Service
//!
//! Issues, verifies and revokes the opaque bearer tokens returned by
//! login and registration.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{access_token::AccessToken, user::User};
use crate::domain::repository::AccessTokenRepository;
use crate::domain::value_object::access_token_id::AccessTokenId;
use crate::error::{AuthError, AuthResult};

pub struct AccessTokenService<T>
where
    T: AccessTokenRepository,
{
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<T> AccessTokenService<T>
where
    T: AccessTokenRepository,
{
    pub fn new(token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self { token_repo, config }
    }

    /// Persist a new token for `user` and return its value
    ///
    /// The value is only available here; storage keeps a hash.
    pub async fn issue(&self, user: &User) -> AuthResult<String> {
        let issued = AccessToken::issue(
            user.user_id,
            &self.config.access_token_prefix,
            self.config.access_token_ttl_delta(),
        )
        .ok_or_else(|| AuthError::Internal("Access token expiry out of range".to_string()))?;

        self.token_repo.create(&issued.token).await?;

        tracing::debug!(
            user_id = %user.user_id,
            token_id = %issued.token.token_id,
            "Access token issued"
        );

        Ok(issued.value)
    }

    /// Resolve a presented value to its stored token
    ///
    /// Every failure is `Unauthorized` so callers cannot tell a forged id
    /// from a wrong secret or an expired token.
    pub async fn verify(&self, value: &str) -> AuthResult<AccessToken> {
        let (token_id, secret) =
            AccessToken::parse_value(&self.config.access_token_prefix, value)
                .ok_or(AuthError::Unauthorized)?;

        let token = self
            .token_repo
            .find_by_id(&token_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !token.matches_secret(secret) || token.is_expired_at(Utc::now()) {
            return Err(AuthError::Unauthorized);
        }

        Ok(token)
    }

    /// Best-effort `last_used_at` update
    pub async fn record_use(&self, token_id: &AccessTokenId) {
        if let Err(e) = self.token_repo.touch(token_id, Utc::now()).await {
            tracing::warn!(token_id = %token_id, error = %e, "Failed to record access token use");
        }
    }

    pub async fn revoke(&self, token_id: &AccessTokenId) -> AuthResult<bool> {
        self.token_repo.delete(token_id).await
    }
}
