use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A user's public display identity.
///
/// Created alongside account registration and read-only from the review
/// flow, where it labels review authors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
