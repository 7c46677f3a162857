//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentAccess, ForgotPasswordUseCase, ListUsersUseCase, LoginUseCase, LogoutUseCase,
    RegisterUseCase, ResetNotifier, ResetPasswordUseCase,
};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::role_name::RoleName;
use crate::error::AuthResult;
use crate::presentation::dto::{
    DataResponse, ForgotPasswordRequest, LoginData, LoginRequest, MessageResponse,
    RegisterData, RegisterRequest, ResetPasswordRequest, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, N> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub config: Arc<AuthConfig>,
}

// Not derived: the derive would require `N: Clone`.
impl<R, N> Clone for AuthAppState<R, N> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<DataResponse<LoginData>>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    login_as(&state, payload, RoleName::User, "User logged in successfully").await
}

/// POST /api/auth/admin/login
pub async fn admin_login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<DataResponse<LoginData>>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    login_as(&state, payload, RoleName::Admin, "Admin logged in successfully").await
}

async fn login_as<R, N>(
    state: &AuthAppState<R, N>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
    required_role: RoleName,
    message: &'static str,
) -> AuthResult<Json<DataResponse<LoginData>>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let Json(req) = payload?;
    let input = req.validate()?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input, required_role).await?;

    Ok(Json(DataResponse {
        message,
        data: LoginData {
            user: UserResponse::new(&output.user, Some(&output.role)),
            access_token: output.access_token,
        },
    }))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, N>(
    State(state): State<AuthAppState<R, N>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<DataResponse<RegisterData>>)>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let Json(req) = payload?;
    let input = req.validate()?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            message: "User registered successfully",
            data: RegisterData {
                access_token: output.access_token,
            },
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R, N>(
    State(state): State<AuthAppState<R, N>>,
    access: Option<Extension<CurrentAccess>>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());

    let token_id = access.as_ref().map(|Extension(access)| &access.token_id);
    use_case.execute(token_id).await?;

    Ok(Json(MessageResponse {
        message: "User logged out successfully",
    }))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/forgot-password
pub async fn forgot_password<R, N>(
    State(state): State<AuthAppState<R, N>>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let Json(req) = payload?;
    let email = req.validate()?;

    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    use_case.execute(&email).await?;

    Ok(Json(MessageResponse {
        message: "Password reset link sent to your email",
    }))
}

/// POST /api/auth/reset-password
pub async fn reset_password<R, N>(
    State(state): State<AuthAppState<R, N>>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let Json(req) = payload?;
    let input = req.validate()?;

    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    use_case.execute(input).await?;

    Ok(Json(MessageResponse {
        message: "Password reset successfully",
    }))
}

// ============================================================================
// Users (admin)
// ============================================================================

/// GET /api/users
pub async fn list_users<R, N>(
    State(state): State<AuthAppState<R, N>>,
) -> AuthResult<Json<DataResponse<Vec<UserResponse>>>>
where
    R: AuthStore,
    N: ResetNotifier + Sync + 'static,
{
    let use_case = ListUsersUseCase::new(state.repo.clone(), state.repo.clone());

    let users = use_case.execute().await?;

    Ok(Json(DataResponse {
        message: "Users fetched successfully",
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}
