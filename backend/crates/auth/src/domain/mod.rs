//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    access_token::AccessToken, password_reset::PasswordReset, role::Role, user::User,
};
pub use repository::{
    AccessTokenRepository, AuthStore, PasswordResetRepository, RoleRepository, UserRepository,
};
