use async_trait::async_trait;

use cinelog_model::{NewTitle, Title, TitleId, TitleKind};

use crate::error::Result;

/// Catalog storage. Rows are seeded wholesale and read-only afterwards.
#[async_trait]
pub trait TitlesRepository: Send + Sync {
    /// Highest-popularity titles of one kind, capped at `limit`.
    async fn list_by_kind(&self, kind: TitleKind, limit: i64) -> Result<Vec<Title>>;

    async fn get(&self, id: TitleId) -> Result<Option<Title>>;

    /// Remove every row of the given kinds. Returns the count removed.
    async fn delete_kinds(&self, kinds: &[TitleKind]) -> Result<u64>;

    /// Insert a batch of seeded rows. Returns the count inserted.
    async fn insert_batch(&self, titles: &[NewTitle]) -> Result<u64>;
}
