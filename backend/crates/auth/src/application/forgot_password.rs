//! Forgot Password Use Case
//!
//! Issues a single-use reset token and hands its link to the notifier.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::notifier::ResetNotifier;
use crate::domain::entity::password_reset::PasswordReset;
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct ForgotPasswordUseCase<U, P, N>
where
    U: UserRepository,
    P: PasswordResetRepository,
    N: ResetNotifier,
{
    user_repo: Arc<U>,
    reset_repo: Arc<P>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<U, P, N> ForgotPasswordUseCase<U, P, N>
where
    U: UserRepository,
    P: PasswordResetRepository,
    N: ResetNotifier,
{
    pub fn new(
        user_repo: Arc<U>,
        reset_repo: Arc<P>,
        notifier: Arc<N>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            reset_repo,
            notifier,
            config,
        }
    }

    /// Unknown emails fail with `UserNotFound` and create nothing
    pub async fn execute(&self, email: &Email) -> AuthResult<()> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let (reset, raw_token) = PasswordReset::issue(user.user_id);
        self.reset_repo.create(&reset).await?;

        let link = self.config.password_reset_link(&raw_token);
        if let Err(e) = self.notifier.send_reset_link(&user, &link).await {
            tracing::warn!(
                user_id = %user.user_id,
                error = %e,
                "Password reset notification failed"
            );
        }

        tracing::info!(user_id = %user.user_id, "Password reset requested");

        Ok(())
    }
}
