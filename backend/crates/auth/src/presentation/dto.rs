//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty so a missing field surfaces as a
//! per-field validation error instead of a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::list_users::UserWithRole;
use crate::domain::entity::{role::Role, user::User};
use crate::domain::value_object::role_name::RoleName;

// ============================================================================
// Requests
// ============================================================================

/// Login and admin login request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Forgot password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset password request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    /// Raw token from the reset link
    pub token: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// `{message}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{message, data}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub message: &'static str,
    pub data: T,
}

/// Login response data
#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub user: UserResponse,
    pub access_token: String,
}

/// Register response data (the user is not returned)
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub access_token: String,
}

/// Public view of a user; the password hash is never serialized
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: String,
    pub role: Option<RoleName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(user: &User, role: Option<&Role>) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
            role_id: user.role_id.to_string(),
            role: role.map(|r| r.name),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserWithRole> for UserResponse {
    fn from(entry: UserWithRole) -> Self {
        Self::new(&entry.user, entry.role.as_ref())
    }
}
