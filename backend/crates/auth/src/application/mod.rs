//! Application Layer
//!
//! Use cases and application services.

pub mod access_token;
pub mod authenticate;
pub mod config;
pub mod forgot_password;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod maintenance;
pub mod notifier;
pub mod register;
pub mod reset_password;

// Re-exports
pub use access_token::AccessTokenService;
pub use authenticate::{AuthenticateUseCase, CurrentAccess};
pub use config::{AuthConfig, ConfigError};
pub use forgot_password::ForgotPasswordUseCase;
pub use list_users::{ListUsersUseCase, UserWithRole};
pub use login::{LoginInput, LoginOutcome, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use maintenance::{PurgeReport, purge_expired};
pub use notifier::{LogResetNotifier, NotifyError, ResetNotifier};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
