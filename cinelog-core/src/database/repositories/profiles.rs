use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cinelog_model::{Profile, UserId};

use crate::database::ports::profiles::ProfilesRepository;
use crate::error::{CoreError, Result};

/// PostgreSQL-backed implementation of the `ProfilesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresProfilesRepository {
    pool: PgPool,
}

impl PostgresProfilesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    username: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl ProfilesRepository for PostgresProfilesRepository {
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, username, created_at FROM profiles WHERE user_id = $1",
        )
        .bind(user_id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get profile: {}", e)))?;

        Ok(row.map(|row| Profile {
            user_id: UserId(row.user_id),
            username: row.username,
            created_at: row.created_at,
        }))
    }

    async fn usernames_for(&self, user_ids: &[UserId]) -> Result<HashMap<UserId, String>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = user_ids.iter().map(UserId::to_uuid).collect();

        #[derive(sqlx::FromRow)]
        struct UsernameRow {
            user_id: Uuid,
            username: String,
        }

        let rows = sqlx::query_as::<_, UsernameRow>(
            "SELECT user_id, username FROM profiles WHERE user_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to fetch usernames: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| (UserId(row.user_id), row.username))
            .collect())
    }
}
