use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ReviewId, TitleId, UserId};

/// A user's rating and write-up for one title.
///
/// At most one review exists per (user, title) pair; the storage layer
/// enforces this with a unique constraint. Only the owning user may
/// update or delete it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub title_id: TitleId,
    /// Star rating, 1 through 5.
    pub rating: i16,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for a validated review submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_id: UserId,
    pub title_id: TitleId,
    pub rating: i16,
    pub body: String,
}

/// A review joined with its author's public display name.
///
/// `username` falls back to a placeholder when the reviewer's profile
/// row is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewWithAuthor {
    pub id: ReviewId,
    pub user_id: UserId,
    pub rating: i16,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
