use derive_more::Display;
use serde::Serialize;

/// Name of a seeded role
///
/// Rows in `roles` are created by migration; an unknown name in the
/// table maps to `None` rather than a panic.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    #[display("user")]
    User,
    #[display("admin")]
    Admin,
}

impl RoleName {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            RoleName::User => "user",
            RoleName::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, RoleName::Admin)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(RoleName::User),
            "admin" => Some(RoleName::Admin),
            _ => None,
        }
    }
}
