use std::collections::HashMap;

use async_trait::async_trait;

use cinelog_model::{Profile, UserId};

use crate::error::Result;

/// Public display identities, read-only from the review flow.
#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>>;

    /// Usernames for a set of users. Users without a profile row are
    /// simply absent from the map.
    async fn usernames_for(&self, user_ids: &[UserId]) -> Result<HashMap<UserId, String>>;
}
