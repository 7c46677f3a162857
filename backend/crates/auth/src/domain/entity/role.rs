//! Role Entity

use kernel::id::RoleId;

use crate::domain::value_object::role_name::RoleName;

/// Row of the seeded `roles` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub role_id: RoleId,
    pub name: RoleName,
}

impl Role {
    pub fn new(name: RoleName) -> Self {
        Self {
            role_id: RoleId::new(),
            name,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.name.is_admin()
    }
}
