//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, SHA-256)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Bearer token extraction from request headers

pub mod bearer;
pub mod crypto;
pub mod password;
