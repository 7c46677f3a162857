//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::{RoleId, UserId};

use crate::domain::value_object::{email::Email, user_name::UserName, user_password::UserPassword};

/// User account
///
/// `password` holds the Argon2id hash; the clear text never reaches
/// this type.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: UserName,
    /// Unique, normalized login identifier
    pub email: Email,
    pub password: UserPassword,
    pub role_id: RoleId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: UserName, email: Email, password: UserPassword, role_id: RoleId) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password,
            role_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }
}
