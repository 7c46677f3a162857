//! Logout Use Case
//!
//! Revokes the token that authenticated the request. Other tokens of the
//! same user stay valid.

use std::sync::Arc;

use crate::application::access_token::AccessTokenService;
use crate::application::config::AuthConfig;
use crate::domain::repository::AccessTokenRepository;
use crate::domain::value_object::access_token_id::AccessTokenId;
use crate::error::AuthResult;

pub struct LogoutUseCase<T>
where
    T: AccessTokenRepository,
{
    tokens: AccessTokenService<T>,
}

impl<T> LogoutUseCase<T>
where
    T: AccessTokenRepository,
{
    pub fn new(token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: AccessTokenService::new(token_repo, config),
        }
    }

    /// No-op when the caller has no current token
    pub async fn execute(&self, current: Option<&AccessTokenId>) -> AuthResult<()> {
        let Some(token_id) = current else {
            return Ok(());
        };

        if self.tokens.revoke(token_id).await? {
            tracing::info!(token_id = %token_id, "User logged out");
        }

        Ok(())
    }
}
