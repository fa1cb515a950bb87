use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use cinelog_model::UserId;

use crate::database::ports::users::UsersRepository;
use crate::error::{CoreError, Result};
use crate::users::{AuthError, User};

/// PostgreSQL-backed implementation of the `UsersRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresUsersRepository {
    pool: PgPool,
}

impl PostgresUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UsersRepository for PostgresUsersRepository {
    async fn create_account(
        &self,
        user: &User,
        password_hash: &str,
        username: &str,
    ) -> Result<()> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            "INSERT INTO users (id, email, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id.to_uuid())
        .bind(user.email.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some("users_email_key")
            {
                return CoreError::Conflict(AuthError::EmailTaken.to_string());
            }
            CoreError::Internal(format!("Failed to create user: {}", e))
        })?;

        sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES ($1, $2)")
            .bind(user.id.to_uuid())
            .bind(password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store password: {}", e)))?;

        // The paired public identity, created with the account.
        sqlx::query("INSERT INTO profiles (user_id, username) VALUES ($1, $2)")
            .bind(user.id.to_uuid())
            .bind(username)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error()
                    && db_err.constraint() == Some("profiles_username_key")
                {
                    return CoreError::Conflict(AuthError::UsernameTaken.to_string());
                }
                CoreError::Internal(format!("Failed to create profile: {}", e))
            })?;

        tx.commit()
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to commit transaction: {}", e)))?;

        info!("Created account: {} ({})", username, user.id);
        Ok(())
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get user by id: {}", e)))?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get user by email: {}", e)))?;

        Ok(row.map(User::from))
    }

    async fn get_password_hash(&self, user_id: UserId) -> Result<Option<String>> {
        let hash: Option<(String,)> = sqlx::query_as(
            "SELECT password_hash FROM user_credentials WHERE user_id = $1",
        )
        .bind(user_id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get password hash: {}", e)))?;

        Ok(hash.map(|(hash,)| hash))
    }

    async fn store_refresh_token(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (token, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(user_id.to_uuid())
        .bind(expires_at)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to store refresh token: {}", e)))?;

        Ok(())
    }

    async fn get_refresh_token(&self, token: &str) -> Result<Option<(UserId, DateTime<Utc>)>> {
        let row: Option<(Uuid, DateTime<Utc>)> = sqlx::query_as(
            "SELECT user_id, expires_at FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get refresh token: {}", e)))?;

        Ok(row.map(|(user_id, expires_at)| (UserId(user_id), expires_at)))
    }

    async fn delete_refresh_token(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to delete refresh token: {}", e)))?;

        Ok(())
    }

    async fn delete_user_refresh_tokens(&self, user_id: UserId) -> Result<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| {
                CoreError::Internal(format!("Failed to delete refresh tokens: {}", e))
            })?;

        Ok(())
    }
}
