//! Reset Password Use Case
//!
//! Consumes a reset token and sets a new password.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::password_reset::PasswordReset;
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Reset password input
pub struct ResetPasswordInput {
    /// Raw token from the reset link
    pub token: String,
    pub password: RawPassword,
}

pub struct ResetPasswordUseCase<U, P>
where
    U: UserRepository,
    P: PasswordResetRepository,
{
    user_repo: Arc<U>,
    reset_repo: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, P> ResetPasswordUseCase<U, P>
where
    U: UserRepository,
    P: PasswordResetRepository,
{
    pub fn new(user_repo: Arc<U>, reset_repo: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            reset_repo,
            config,
        }
    }

    /// Unknown and expired tokens both fail with `InvalidResetToken`
    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let token_hash = PasswordReset::hash_token(&input.token);

        let reset = self
            .reset_repo
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        if reset.is_expired_at(Utc::now(), self.config.password_reset_ttl_delta()) {
            return Err(AuthError::InvalidResetToken);
        }

        let mut user = self
            .user_repo
            .find_by_id(&reset.user_id)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        user.set_password(UserPassword::from_raw(&input.password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        // The password is already changed; a leftover row only lives
        // until it expires.
        if let Err(e) = self.reset_repo.delete(&reset.reset_id).await {
            tracing::warn!(
                reset_id = %reset.reset_id,
                error = %e,
                "Failed to delete used password reset token"
            );
        }

        tracing::info!(user_id = %user.user_id, "Password reset completed");

        Ok(())
    }
}
