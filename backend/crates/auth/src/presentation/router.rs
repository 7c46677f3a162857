//! Auth Router
//!
//! Routes are relative to `/api`:
//!
//! | Method | Path | Gate |
//! |---|---|---|
//! | POST | /auth/login | - |
//! | POST | /auth/admin/login | - |
//! | POST | /auth/register | - |
//! | POST | /auth/logout | bearer |
//! | POST | /auth/forgot-password | - |
//! | POST | /auth/reset-password | - |
//! | GET | /users | bearer + admin |

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::notifier::{LogResetNotifier, ResetNotifier};
use crate::domain::repository::AuthStore;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_auth};

/// Create the Auth router with PostgreSQL repository
///
/// Reset links are written to the log by [`LogResetNotifier`].
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, LogResetNotifier, config)
}

/// Create a generic Auth router for any repository and notifier
pub fn auth_router_generic<R, N>(repo: R, notifier: N, config: AuthConfig) -> Router
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        config: Arc::new(config),
    };

    let auth_gate = middleware::from_fn_with_state(state.clone(), require_auth::<R, N>);

    let public = Router::new()
        .route("/auth/login", post(handlers::login::<R, N>))
        .route("/auth/admin/login", post(handlers::admin_login::<R, N>))
        .route("/auth/register", post(handlers::register::<R, N>))
        .route("/auth/forgot-password", post(handlers::forgot_password::<R, N>))
        .route("/auth/reset-password", post(handlers::reset_password::<R, N>));

    let authenticated = Router::new()
        .route("/auth/logout", post(handlers::logout::<R, N>))
        .route_layer(auth_gate.clone());

    // Layers run outside-in: `auth_gate` is added last so it runs first.
    let admin = Router::new()
        .route("/users", get(handlers::list_users::<R, N>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(auth_gate);

    public
        .merge(authenticated)
        .merge(admin)
        .with_state(state)
}
