//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod validator;

pub use handlers::AuthAppState;
pub use middleware::{require_admin, require_auth};
pub use router::{auth_router, auth_router_generic};
