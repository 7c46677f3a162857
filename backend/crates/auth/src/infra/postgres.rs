//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PasswordResetId, RoleId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    access_token::AccessToken, password_reset::PasswordReset, role::Role, user::User,
};
use crate::domain::repository::{
    AccessTokenRepository, PasswordResetRepository, RoleRepository, UserRepository,
};
use crate::domain::value_object::{
    access_token_id::AccessTokenId, email::Email, role_name::RoleName, user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.email`
const USERS_EMAIL_KEY: &str = "users_email_key";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map the email unique violation to `DuplicateEmail`
///
/// Covers the registration race the up-front existence check cannot see.
fn map_user_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err
        && is_email_conflict(db_err.is_unique_violation(), db_err.constraint())
    {
        return AuthError::DuplicateEmail;
    }
    AuthError::Database(err)
}

fn is_email_conflict(unique_violation: bool, constraint: Option<&str>) -> bool {
    unique_violation && constraint == Some(USERS_EMAIL_KEY)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

const USER_COLUMNS: &str = "user_id, name, email, password, role_id, created_at, updated_at";

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password,
                role_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role_id.as_uuid())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password = $3,
                role_id = $4,
                updated_at = $5
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role_id.as_uuid())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, user_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn find_by_id(&self, role_id: &RoleId) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT role_id, name FROM roles WHERE role_id = $1")
            .bind(role_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_role()).transpose()
    }

    async fn find_by_name(&self, name: RoleName) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT role_id, name FROM roles WHERE name = $1")
            .bind(name.code())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_role()).transpose()
    }

    async fn list(&self) -> AuthResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT role_id, name FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(RoleRow::into_role).collect()
    }
}

// ============================================================================
// Access Token Repository Implementation
// ============================================================================

impl AccessTokenRepository for PgAuthRepository {
    async fn create(&self, token: &AccessToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens (
                token_id,
                user_id,
                secret_hash,
                created_at,
                last_used_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.token_id.as_str())
        .bind(token.user_id.as_uuid())
        .bind(&token.secret_hash)
        .bind(token.created_at)
        .bind(token.last_used_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, token_id: &AccessTokenId) -> AuthResult<Option<AccessToken>> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT
                token_id,
                user_id,
                secret_hash,
                created_at,
                last_used_at,
                expires_at
            FROM access_tokens
            WHERE token_id = $1
            "#,
        )
        .bind(token_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_access_token()).transpose()
    }

    async fn touch(&self, token_id: &AccessTokenId, used_at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE access_tokens SET last_used_at = $2 WHERE token_id = $1")
            .bind(token_id.as_str())
            .bind(used_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, token_id: &AccessTokenId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM access_tokens WHERE token_id = $1")
            .bind(token_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM access_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Password Reset Repository Implementation
// ============================================================================

impl PasswordResetRepository for PgAuthRepository {
    async fn create(&self, reset: &PasswordReset) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (
                reset_id,
                user_id,
                token_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(reset.reset_id.as_uuid())
        .bind(reset.user_id.as_uuid())
        .bind(&reset.token_hash)
        .bind(reset.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &[u8]) -> AuthResult<Option<PasswordReset>> {
        let row = sqlx::query_as::<_, PasswordResetRow>(
            r#"
            SELECT reset_id, user_id, token_hash, created_at
            FROM password_resets
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PasswordResetRow::into_password_reset))
    }

    async fn delete(&self, reset_id: &PasswordResetId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM password_resets WHERE reset_id = $1")
            .bind(reset_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM password_resets WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password: String,
    role_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = UserPassword::from_phc_string(self.password)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password,
            role_id: RoleId::from_uuid(self.role_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    role_id: Uuid,
    name: String,
}

impl RoleRow {
    fn into_role(self) -> AuthResult<Role> {
        let name = RoleName::from_code(&self.name)
            .ok_or_else(|| AuthError::Internal(format!("Unknown role name: {}", self.name)))?;

        Ok(Role {
            role_id: RoleId::from_uuid(self.role_id),
            name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccessTokenRow {
    token_id: String,
    user_id: Uuid,
    secret_hash: Vec<u8>,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessTokenRow {
    fn into_access_token(self) -> AuthResult<AccessToken> {
        let token_id = AccessTokenId::parse_str(&self.token_id)
            .ok_or_else(|| AuthError::Internal(format!("Invalid token_id: {}", self.token_id)))?;

        Ok(AccessToken {
            token_id,
            user_id: UserId::from_uuid(self.user_id),
            secret_hash: self.secret_hash,
            created_at: self.created_at,
            last_used_at: self.last_used_at,
            expires_at: self.expires_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PasswordResetRow {
    reset_id: Uuid,
    user_id: Uuid,
    token_hash: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl PasswordResetRow {
    fn into_password_reset(self) -> PasswordReset {
        PasswordReset {
            reset_id: PasswordResetId::from_uuid(self.reset_id),
            user_id: UserId::from_uuid(self.user_id),
            token_hash: self.token_hash,
            created_at: self.created_at,
        }
    }
}
