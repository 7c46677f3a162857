//! Value Object Module

pub mod access_token_id;
pub mod email;
pub mod role_name;
pub mod user_name;
pub mod user_password;
