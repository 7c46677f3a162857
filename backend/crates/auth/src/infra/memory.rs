//! In-Memory Repository Implementation
//!
//! Test-only store backing the router and use case tests. Enforces the
//! same uniqueness rules as the PostgreSQL schema so duplicate handling
//! can be exercised.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use kernel::id::{PasswordResetId, RoleId, UserId};

use crate::domain::entity::{
    access_token::AccessToken, password_reset::PasswordReset, role::Role, user::User,
};
use crate::domain::repository::{
    AccessTokenRepository, PasswordResetRepository, RoleRepository, UserRepository,
};
use crate::domain::value_object::{
    access_token_id::AccessTokenId, email::Email, role_name::RoleName,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    roles: HashMap<RoleId, Role>,
    users: HashMap<UserId, User>,
    access_tokens: HashMap<AccessTokenId, AccessToken>,
    password_resets: HashMap<PasswordResetId, PasswordReset>,
}

/// Auth repository held in process memory
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    /// Repository with the `user` and `admin` roles, as after migration
    pub fn with_default_roles() -> Self {
        let repo = Self::default();
        {
            let mut tables = repo.tables.write().unwrap_or_else(|e| e.into_inner());
            for name in [RoleName::User, RoleName::Admin] {
                let role = Role::new(name);
                tables.roles.insert(role.role_id, role);
            }
        }
        repo
    }

    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    pub fn access_token_count(&self) -> usize {
        self.read().access_tokens.len()
    }

    pub fn password_reset_count(&self) -> usize {
        self.read().password_resets.len()
    }

    // A panicked writer cannot leave a table half-updated: every mutation
    // below is a single insert or remove.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }
        if !tables.roles.contains_key(&user.role_id) {
            return Err(AuthError::Internal(format!("Unknown role_id: {}", user.role_id)));
        }
        tables.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.read().users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.read().users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.read().users.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        if let Some(stored) = self.write().users.get_mut(&user.user_id) {
            *stored = user.clone();
        }
        Ok(())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self.read().users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}

impl RoleRepository for InMemoryAuthRepository {
    async fn find_by_id(&self, role_id: &RoleId) -> AuthResult<Option<Role>> {
        Ok(self.read().roles.get(role_id).copied())
    }

    async fn find_by_name(&self, name: RoleName) -> AuthResult<Option<Role>> {
        Ok(self.read().roles.values().find(|r| r.name == name).copied())
    }

    async fn list(&self) -> AuthResult<Vec<Role>> {
        Ok(self.read().roles.values().copied().collect())
    }
}

impl AccessTokenRepository for InMemoryAuthRepository {
    async fn create(&self, token: &AccessToken) -> AuthResult<()> {
        self.write()
            .access_tokens
            .insert(token.token_id, token.clone());
        Ok(())
    }

    async fn find_by_id(&self, token_id: &AccessTokenId) -> AuthResult<Option<AccessToken>> {
        Ok(self.read().access_tokens.get(token_id).cloned())
    }

    async fn touch(&self, token_id: &AccessTokenId, used_at: DateTime<Utc>) -> AuthResult<()> {
        if let Some(token) = self.write().access_tokens.get_mut(token_id) {
            token.last_used_at = Some(used_at);
        }
        Ok(())
    }

    async fn delete(&self, token_id: &AccessTokenId) -> AuthResult<bool> {
        Ok(self.write().access_tokens.remove(token_id).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut tables = self.write();
        let before = tables.access_tokens.len();
        tables.access_tokens.retain(|_, t| !t.is_expired_at(now));
        Ok((before - tables.access_tokens.len()) as u64)
    }
}

impl PasswordResetRepository for InMemoryAuthRepository {
    async fn create(&self, reset: &PasswordReset) -> AuthResult<()> {
        let mut tables = self.write();
        if tables
            .password_resets
            .values()
            .any(|r| r.token_hash == reset.token_hash)
        {
            return Err(AuthError::Internal("Duplicate password reset token".to_string()));
        }
        tables.password_resets.insert(reset.reset_id, reset.clone());
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &[u8]) -> AuthResult<Option<PasswordReset>> {
        Ok(self
            .read()
            .password_resets
            .values()
            .find(|r| r.token_hash == token_hash)
            .cloned())
    }

    async fn delete(&self, reset_id: &PasswordResetId) -> AuthResult<bool> {
        Ok(self.write().password_resets.remove(reset_id).is_some())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let mut tables = self.write();
        let before = tables.password_resets.len();
        tables.password_resets.retain(|_, r| r.created_at >= cutoff);
        Ok((before - tables.password_resets.len()) as u64)
    }
}
