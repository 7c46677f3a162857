//! Authenticate Use Case
//!
//! Turns a bearer token into the caller's identity for protected routes.

use std::sync::Arc;

use crate::application::access_token::AccessTokenService;
use crate::application::config::AuthConfig;
use crate::domain::entity::{role::Role, user::User};
use crate::domain::repository::{AccessTokenRepository, RoleRepository, UserRepository};
use crate::domain::value_object::access_token_id::AccessTokenId;
use crate::error::{AuthError, AuthResult};

/// Identity of an authenticated request
///
/// Inserted into request extensions by `require_auth`; handlers read it
/// instead of re-verifying the token.
#[derive(Debug, Clone)]
pub struct CurrentAccess {
    pub user: User,
    pub role: Role,
    /// Token that authenticated this request
    pub token_id: AccessTokenId,
}

impl CurrentAccess {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

pub struct AuthenticateUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: AccessTokenRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    tokens: AccessTokenService<T>,
}

impl<U, R, T> AuthenticateUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: AccessTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        token_repo: Arc<T>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            tokens: AccessTokenService::new(token_repo, config),
        }
    }

    pub async fn execute(&self, token_value: &str) -> AuthResult<CurrentAccess> {
        let token = self.tokens.verify(token_value).await?;

        let user = self
            .user_repo
            .find_by_id(&token.user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let role = self
            .role_repo
            .find_by_id(&user.role_id)
            .await?
            .ok_or_else(|| {
                AuthError::Internal(format!("Role of user {} not found", user.user_id))
            })?;

        self.tokens.record_use(&token.token_id).await;

        Ok(CurrentAccess {
            user,
            role,
            token_id: token.token_id,
        })
    }
}
