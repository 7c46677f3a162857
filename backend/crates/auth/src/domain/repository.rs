//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra`.

use chrono::{DateTime, Utc};
use kernel::id::{PasswordResetId, RoleId, UserId};

use crate::domain::entity::{
    access_token::AccessToken, password_reset::PasswordReset, role::Role, user::User,
};
use crate::domain::value_object::{
    access_token_id::AccessTokenId, email::Email, role_name::RoleName,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Fails with `AuthError::DuplicateEmail` when the email is taken,
    /// including when a concurrent insert wins the race.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist name, password and role changes
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// All users, oldest first
    async fn list(&self) -> AuthResult<Vec<User>>;
}

/// Role repository trait (read-only, roles are seeded)
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn find_by_id(&self, role_id: &RoleId) -> AuthResult<Option<Role>>;

    async fn find_by_name(&self, name: RoleName) -> AuthResult<Option<Role>>;

    async fn list(&self) -> AuthResult<Vec<Role>>;
}

/// Access token repository trait
#[trait_variant::make(AccessTokenRepository: Send)]
pub trait LocalAccessTokenRepository {
    async fn create(&self, token: &AccessToken) -> AuthResult<()>;

    async fn find_by_id(&self, token_id: &AccessTokenId) -> AuthResult<Option<AccessToken>>;

    /// Record a successful authentication
    async fn touch(&self, token_id: &AccessTokenId, used_at: DateTime<Utc>) -> AuthResult<()>;

    /// Returns whether a row was removed
    async fn delete(&self, token_id: &AccessTokenId) -> AuthResult<bool>;

    /// Remove tokens whose `expires_at` is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}

/// Password reset repository trait
#[trait_variant::make(PasswordResetRepository: Send)]
pub trait LocalPasswordResetRepository {
    async fn create(&self, reset: &PasswordReset) -> AuthResult<()>;

    async fn find_by_token_hash(&self, token_hash: &[u8]) -> AuthResult<Option<PasswordReset>>;

    /// Returns whether a row was removed
    async fn delete(&self, reset_id: &PasswordResetId) -> AuthResult<bool>;

    /// Remove resets created strictly before `cutoff`
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}

/// Everything the HTTP layer needs from one storage backend
pub trait AuthStore:
    UserRepository
    + RoleRepository
    + AccessTokenRepository
    + PasswordResetRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + RoleRepository
        + AccessTokenRepository
        + PasswordResetRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
