//! Register Use Case
//!
//! Creates a `user`-role account and signs it in.

use std::sync::Arc;

use crate::application::access_token::AccessTokenService;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{AccessTokenRepository, RoleRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    role_name::RoleName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: UserName,
    pub email: Email,
    pub password: RawPassword,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub access_token: String,
}

/// Register use case
pub struct RegisterUseCase<U, R, T>
where
    U: UserRepository,
    R: RoleRepository,
    T: AccessTokenRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    tokens: AccessTokenService<T>,
    config: Arc<AuthConfig>,
}

impl<U, R, T> RegisterUseCase<U, R, T>
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
            tokens: AccessTokenService::new(token_repo, config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Checked up-front for the common case; the unique index still
        // decides concurrent registrations.
        if self.user_repo.exists_by_email(&input.email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let role = self
            .role_repo
            .find_by_name(RoleName::User)
            .await?
            .ok_or_else(|| AuthError::Internal("Role 'user' is not seeded".to_string()))?;

        let password = UserPassword::from_raw(&input.password, self.config.pepper())?;
        let user = User::new(input.name, input.email, password, role.role_id);

        self.user_repo.create(&user).await?;

        let access_token = self.tokens.issue(&user).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput { user, access_token })
    }
}
