//! User Name Value Object
//!
//! ユーザーの表示名。ログインには使わず、一意性も要求しない。
//!
//! ## 不変条件
//! - NFKC正規化 → 前後の空白除去 の順で処理
//! - 長さ: 1〜100文字（正規化後）
//! - 制御文字を含まない

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 100;

/// Display name of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AppError::unprocessable("Name is required"));
        }

        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Name must be at most {USER_NAME_MAX_LENGTH} characters"
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::unprocessable("Name contains invalid characters"));
        }

        Ok(Self(name.to_owned()))
    }

    /// DBからの復元（検証済み前提）
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
