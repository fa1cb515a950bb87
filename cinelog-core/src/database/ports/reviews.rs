use async_trait::async_trait;

use cinelog_model::{NewReview, Review, ReviewId, TitleId};

use crate::error::Result;
use crate::ratings::RatingEntry;

/// Review storage.
///
/// `create` maps the storage layer's unique-constraint violation on
/// (user, title) to [`crate::error::CoreError::DuplicateReview`].
#[async_trait]
pub trait ReviewsRepository: Send + Sync {
    /// The (title, rating) projection of the whole table, feeding the
    /// in-process aggregator.
    async fn rating_entries(&self) -> Result<Vec<RatingEntry>>;

    /// All reviews for one title, newest first.
    async fn list_for_title(&self, title_id: TitleId) -> Result<Vec<Review>>;

    async fn get(&self, id: ReviewId) -> Result<Option<Review>>;

    async fn create(&self, review: &NewReview) -> Result<Review>;

    async fn update(&self, id: ReviewId, rating: i16, body: &str) -> Result<()>;

    async fn delete(&self, id: ReviewId) -> Result<()>;
}
