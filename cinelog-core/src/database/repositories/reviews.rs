use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cinelog_model::{NewReview, Review, ReviewId, TitleId, UserId};

use crate::database::ports::reviews::ReviewsRepository;
use crate::error::{CoreError, Result};
use crate::ratings::RatingEntry;

/// PostgreSQL-backed implementation of the `ReviewsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresReviewsRepository {
    pool: PgPool,
}

impl PostgresReviewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    user_id: Uuid,
    title_id: Uuid,
    rating: i16,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId(row.id),
            user_id: UserId(row.user_id),
            title_id: TitleId(row.title_id),
            rating: row.rating,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const REVIEW_COLUMNS: &str =
    "id, user_id, title_id, rating, body, created_at, updated_at";

#[async_trait]
impl ReviewsRepository for PostgresReviewsRepository {
    async fn rating_entries(&self) -> Result<Vec<RatingEntry>> {
        #[derive(sqlx::FromRow)]
        struct RatingRow {
            title_id: Uuid,
            rating: i16,
        }

        let rows = sqlx::query_as::<_, RatingRow>("SELECT title_id, rating FROM reviews")
            .fetch_all(self.pool())
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to fetch ratings: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| RatingEntry {
                title_id: TitleId(row.title_id),
                rating: row.rating,
            })
            .collect())
    }

    async fn list_for_title(&self, title_id: TitleId) -> Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE title_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(title_id.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to list reviews: {}", e)))?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn get(&self, id: ReviewId) -> Result<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to get review: {}", e)))?;

        Ok(row.map(Review::from))
    }

    async fn create(&self, review: &NewReview) -> Result<Review> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "INSERT INTO reviews (id, user_id, title_id, rating, body) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(ReviewId::new().to_uuid())
        .bind(review.user_id.to_uuid())
        .bind(review.title_id.to_uuid())
        .bind(review.rating)
        .bind(review.body.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint() == Some("reviews_user_id_title_id_key") {
                    return CoreError::DuplicateReview;
                }
                if db_err.constraint() == Some("reviews_title_id_fkey") {
                    return CoreError::NotFound("Title not found".to_string());
                }
            }
            CoreError::Internal(format!("Failed to create review: {}", e))
        })?;

        Ok(row.into())
    }

    async fn update(&self, id: ReviewId, rating: i16, body: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE reviews SET rating = $2, body = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.to_uuid())
        .bind(rating)
        .bind(body)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to update review: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Review not found".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: ReviewId) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to delete review: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Review not found".to_string()));
        }

        Ok(())
    }
}
