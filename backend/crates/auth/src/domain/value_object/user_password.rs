//! User Password Value Object
//!
//! Wraps `platform::password` with the messages shown to API clients.
//!
//! ```rust,ignore
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecure#Pass2024".to_string())?;
//! let hashed = UserPassword::from_raw(&raw, None)?;
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the client
///
/// Memory is zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a new password (registration, reset) under the password policy
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::unprocessable(format!("Password must be at least {min} characters"))
            }
            PasswordPolicyError::TooLong { max, .. } => {
                AppError::unprocessable(format!("Password must be at most {max} characters"))
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::unprocessable("Password is required")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::unprocessable("Password contains invalid characters")
            }
            PasswordPolicyError::CommonPattern => AppError::unprocessable(
                "Password is too common or follows a predictable pattern",
            )
            .with_action("Please choose a more unique password"),
        })?;

        Ok(Self(clear_text))
    }

    /// Accept a password submitted for login
    ///
    /// No policy applies: accounts created under an older policy must still
    /// be able to sign in.
    pub fn submitted(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Burn one verification worth of time and return `false`
    pub fn verify_dummy(&self, pepper: Option<&[u8]>) -> bool {
        self.0.verify_against_dummy(pepper)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash stored in `users.password`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `pepper` must match the one used when hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
