use async_trait::async_trait;
use chrono::{DateTime, Utc};

use cinelog_model::UserId;

use crate::error::Result;
use crate::users::User;

// Account and credential (authentication-adjacent) repository
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Create the user, its credential row, and its paired profile in
    /// one transaction.
    async fn create_account(
        &self,
        user: &User,
        password_hash: &str,
        username: &str,
    ) -> Result<()>;

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_password_hash(&self, user_id: UserId) -> Result<Option<String>>;

    // Refresh token storage
    async fn store_refresh_token(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn get_refresh_token(&self, token: &str) -> Result<Option<(UserId, DateTime<Utc>)>>;
    async fn delete_refresh_token(&self, token: &str) -> Result<()>;
    async fn delete_user_refresh_tokens(&self, user_id: UserId) -> Result<()>;
}
