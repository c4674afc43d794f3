use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::OneTimeTokenRecord;
use crate::account::models::Role;
use crate::account::models::TokenKind;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::AccountStore;

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape for the users table.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    lastname: String,
    email: String,
    password_hash: String,
    role: String,
    avatar: Option<String>,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: row.name,
            lastname: row.lastname,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role)?,
            avatar: row.avatar,
            verified: row.verified,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn create_user(&self, user: User) -> Result<User, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, lastname, email, password_hash, role, avatar, verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.name)
        .bind(&user.lastname)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.avatar)
        .bind(user.verified)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return AccountError::DuplicateEmail(user.email.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, lastname, email, password_hash, role, avatar, verified, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn mark_verified(&self, id: &UserId) -> Result<(), AccountError> {
        sqlx::query("UPDATE users SET verified = TRUE WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.0)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn insert_token(&self, record: OneTimeTokenRecord) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO one_time_tokens (token, user_id, kind, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.token)
        .bind(record.user_id.0)
        .bind(record.kind.as_str())
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn consume_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<Option<UserId>, AccountError> {
        // Compare-and-swap on consumed_at: exactly one concurrent consumer
        // can flip it, everyone else sees no row.
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE one_time_tokens
            SET consumed_at = NOW()
            WHERE token = $1
              AND kind = $2
              AND consumed_at IS NULL
              AND expires_at > NOW()
            RETURNING user_id
            "#,
        )
        .bind(token)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(user_id.map(UserId))
    }

    async fn revoke_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO revoked_sessions (jti, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(session_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AccountError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_sessions WHERE jti = $1)",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}
