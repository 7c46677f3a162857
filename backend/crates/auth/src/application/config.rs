//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::{TimeDelta, Utc};
use std::time::Duration;
use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Access token TTL of {0} seconds is out of range")]
    AccessTokenTtlOutOfRange(u64),

    #[error("Password reset TTL of {0} seconds is out of range")]
    PasswordResetTtlOutOfRange(u64),
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Prefix of every issued access token value
    pub access_token_prefix: String,
    /// Access token lifetime; `None` keeps tokens until logout
    pub access_token_ttl: Option<Duration>,
    /// How long a password reset token stays valid
    pub password_reset_ttl: Duration,
    /// Frontend page receiving `?token=<reset token>`
    pub password_reset_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_prefix: "oat_".to_string(),
            access_token_ttl: None,
            password_reset_ttl: Duration::from_secs(15 * 60), // 15 minutes
            password_reset_url: "http://localhost:3000/reset-password".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Check that every TTL yields a representable timestamp from now
    pub fn validate(&self) -> Result<(), ConfigError> {
        let now = Utc::now();

        if let Some(ttl) = self.access_token_ttl {
            TimeDelta::from_std(ttl)
                .ok()
                .and_then(|delta| now.checked_add_signed(delta))
                .ok_or(ConfigError::AccessTokenTtlOutOfRange(ttl.as_secs()))?;
        }

        let reset_ttl = self.password_reset_ttl;
        TimeDelta::from_std(reset_ttl)
            .ok()
            .and_then(|delta| now.checked_sub_signed(delta))
            .ok_or(ConfigError::PasswordResetTtlOutOfRange(reset_ttl.as_secs()))?;

        Ok(())
    }

    pub fn access_token_ttl_delta(&self) -> Option<TimeDelta> {
        self.access_token_ttl.and_then(|ttl| TimeDelta::from_std(ttl).ok())
    }

    pub fn password_reset_ttl_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.password_reset_ttl).unwrap_or(TimeDelta::MAX)
    }

    /// Link delivered to the user for a raw reset token
    pub fn password_reset_link(&self, raw_token: &str) -> String {
        let separator = if self.password_reset_url.contains('?') { '&' } else { '?' };
        format!("{}{}token={}", self.password_reset_url, separator, raw_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_prefix, "oat_");
        assert!(config.access_token_ttl_delta().is_none());
        assert_eq!(config.password_reset_ttl_delta(), TimeDelta::minutes(15));
    }

    #[test]
    fn test_validate_ttl_range() {
        assert!(AuthConfig::default().validate().is_ok());

        let config = AuthConfig {
            access_token_ttl: Some(Duration::from_secs(30 * 24 * 60 * 60)),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = AuthConfig {
            access_token_ttl: Some(Duration::from_secs(10_000_000_000_000)),
            ..AuthConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AccessTokenTtlOutOfRange(10_000_000_000_000))
        );

        let config = AuthConfig {
            access_token_ttl: Some(Duration::MAX),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            password_reset_ttl: Duration::from_secs(10_000_000_000_000),
            ..AuthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PasswordResetTtlOutOfRange(_))
        ));
    }

    #[test]
    fn test_password_reset_link() {
        let mut config = AuthConfig::default();
        assert_eq!(
            config.password_reset_link("abc"),
            "http://localhost:3000/reset-password?token=abc"
        );

        config.password_reset_url = "https://app.example.com/reset?lang=ja".to_string();
        assert_eq!(
            config.password_reset_link("abc"),
            "https://app.example.com/reset?lang=ja&token=abc"
        );
    }
}
