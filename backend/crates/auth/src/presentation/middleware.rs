//! Auth Middleware
//!
//! Gates for protected routes. `require_auth` must run before
//! `require_admin`, i.e. be layered outside it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::{AuthenticateUseCase, CurrentAccess, ResetNotifier};
use crate::domain::repository::AuthStore;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid bearer access token
///
/// On success the request carries a [`CurrentAccess`] extension.
pub async fn require_auth<R, N>(
    State(state): State<AuthAppState<R, N>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let token = extract_bearer(req.headers())
        .ok_or(AuthError::Unauthorized)?
        .to_owned();

    let use_case = AuthenticateUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let access = use_case.execute(&token).await?;

    req.extensions_mut().insert(access);

    Ok(next.run(req).await)
}

/// Middleware that requires the authenticated user to be an admin
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    let access = req
        .extensions()
        .get::<CurrentAccess>()
        .ok_or(AuthError::Unauthorized)?;

    if !access.is_admin() {
        tracing::debug!(user_id = %access.user.user_id, "Admin route denied");
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}
