use sqlx::{PgPool, postgres::PgPoolOptions};
use std::fmt;
use tracing::info;

use crate::database::repositories::{
    PostgresProfilesRepository, PostgresReviewsRepository, PostgresTitlesRepository,
    PostgresUsersRepository,
};
use crate::error::{CoreError, Result};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    titles: PostgresTitlesRepository,
    reviews: PostgresReviewsRepository,
    profiles: PostgresProfilesRepository,
    users: PostgresUsersRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        // Pool sizing from environment or sensible defaults
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(16);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(2);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .max_lifetime(std::time::Duration::from_secs(1800))
            .idle_timeout(std::time::Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| {
                CoreError::Internal(format!("Database connection failed: {}", e))
            })?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        let titles = PostgresTitlesRepository::new(pool.clone());
        let reviews = PostgresReviewsRepository::new(pool.clone());
        let profiles = PostgresProfilesRepository::new(pool.clone());
        let users = PostgresUsersRepository::new(pool.clone());

        Ok(PostgresDatabase {
            pool,
            titles,
            reviews,
            profiles,
            users,
        })
    }

    /// Get a reference to the connection pool for use in extension modules
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn titles(&self) -> &PostgresTitlesRepository {
        &self.titles
    }

    pub fn reviews(&self) -> &PostgresReviewsRepository {
        &self.reviews
    }

    pub fn profiles(&self) -> &PostgresProfilesRepository {
        &self.profiles
    }

    pub fn users(&self) -> &PostgresUsersRepository {
        &self.users
    }

    /// Apply database migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CoreError::Internal(format!("Migration failed: {}", e)))?;

        Ok(())
    }
}
