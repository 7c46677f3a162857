//! List Users Use Case

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entity::{role::Role, user::User};
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::error::AuthResult;

/// User joined with its role
pub struct UserWithRole {
    pub user: User,
    pub role: Option<Role>,
}

pub struct ListUsersUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
}

impl<U, R> ListUsersUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            role_repo,
        }
    }

    pub async fn execute(&self) -> AuthResult<Vec<UserWithRole>> {
        let roles: HashMap<_, _> = self
            .role_repo
            .list()
            .await?
            .into_iter()
            .map(|role| (role.role_id, role))
            .collect();

        let users = self.user_repo.list().await?;

        Ok(users
            .into_iter()
            .map(|user| UserWithRole {
                role: roles.get(&user.role_id).copied(),
                user,
            })
            .collect())
    }
}
