//! Password Reset Notifier
//!
//! Delivery of reset links is an outbound concern; the use case only hands
//! over the user and the link.

use thiserror::Error;

use crate::domain::entity::user::User;

#[derive(Debug, Error)]
#[error("Failed to deliver password reset link: {0}")]
pub struct NotifyError(pub String);

#[trait_variant::make(ResetNotifier: Send)]
pub trait LocalResetNotifier {
    async fn send_reset_link(&self, user: &User, link: &str) -> Result<(), NotifyError>;
}

/// Writes the link to the log instead of mailing it
///
/// Meant for development and for deployments where a log shipper feeds
/// the mailer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResetNotifier;

impl ResetNotifier for LogResetNotifier {
    async fn send_reset_link(&self, user: &User, link: &str) -> Result<(), NotifyError> {
        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            reset_link = %link,
            "Password reset link issued"
        );
        Ok(())
    }
}
