//! Login Use Case
//!
//! Verifies email + password, checks the account's role against the
//! entry point used, and issues an access token.

use std::sync::Arc;

use crate::application::access_token::AccessTokenService;
use crate::application::config::AuthConfig;
use crate::domain::entity::{role::Role, user::User};
use crate::domain::repository::{AccessTokenRepository, RoleRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, role_name::RoleName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Email,
    pub password: RawPassword,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    pub role: Role,
    pub access_token: String,
}

/// Result of checking credentials against a required role
///
/// Kept apart from the HTTP error so the distinction survives in logs;
/// clients only ever see `InvalidCredentials` for the last two.
#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated { user: User, role: Role },
    WrongRole,
    BadCredentials,
}

/// Login use case
pub struct LoginUseCase<U, R, T>
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

impl<U, R, T> LoginUseCase<U, R, T>
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

    /// `required_role` is `User` for `/login` and `Admin` for `/admin/login`
    pub async fn execute(
        &self,
        input: LoginInput,
        required_role: RoleName,
    ) -> AuthResult<LoginOutput> {
        match self.check_credentials(&input, required_role).await? {
            LoginOutcome::Authenticated { user, role } => {
                let access_token = self.tokens.issue(&user).await?;

                tracing::info!(
                    user_id = %user.user_id,
                    role = %role.name,
                    "User logged in"
                );

                Ok(LoginOutput {
                    user,
                    role,
                    access_token,
                })
            }
            LoginOutcome::WrongRole => {
                tracing::warn!(
                    email = %input.email,
                    required_role = %required_role,
                    "Login rejected: role mismatch"
                );
                Err(AuthError::InvalidCredentials)
            }
            LoginOutcome::BadCredentials => Err(AuthError::InvalidCredentials),
        }
    }

    pub async fn check_credentials(
        &self,
        input: &LoginInput,
        required_role: RoleName,
    ) -> AuthResult<LoginOutcome> {
        let pepper = self.config.pepper();

        let Some(user) = self.user_repo.find_by_email(&input.email).await? else {
            input.password.verify_dummy(pepper);
            return Ok(LoginOutcome::BadCredentials);
        };

        if !user.password.verify(&input.password, pepper) {
            return Ok(LoginOutcome::BadCredentials);
        }

        let role = self
            .role_repo
            .find_by_id(&user.role_id)
            .await?
            .ok_or_else(|| {
                AuthError::Internal(format!("Role of user {} not found", user.user_id))
            })?;

        if role.name != required_role {
            return Ok(LoginOutcome::WrongRole);
        }

        Ok(LoginOutcome::Authenticated { user, role })
    }
}
