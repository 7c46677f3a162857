//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL repository (plus an in-memory one under test)
//! - `presentation/` - HTTP handlers, DTOs, validation, middleware, router
//!
//! ## Features
//! - Registration and login by email + password
//! - Separate admin login; the account's role must match the entry point
//! - Opaque bearer access tokens, revoked one at a time on logout
//! - Forgot / reset password with single-use, 15 minute tokens
//! - Admin-only user listing
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B policy, optional pepper)
//! - Access and reset tokens stored as SHA-256 hashes only
//! - Login failures are indistinguishable to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use application::maintenance::{PurgeReport, purge_expired};
pub use application::notifier::{LogResetNotifier, ResetNotifier};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::application::authenticate::CurrentAccess;
    pub use crate::presentation::middleware::*;
}
