//! Persistence abstraction for tweets.
//!
//! Handlers only see `Arc<dyn TweetStore>`; the backing adapter is picked at
//! startup from configuration.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::models::Tweet;

/// Lazy, possibly failing sequence of tweets
pub type TweetStream = BoxStream<'static, Result<Tweet, StoreError>>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document store for tweets.
#[async_trait]
pub trait TweetStore: Send + Sync {
    /// Enumerate every stored tweet. The stream reflects the store at the
    /// time it is polled and ends when enumeration completes.
    fn find_all(&self) -> TweetStream;

    /// Look up a tweet by id. Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<Tweet>, StoreError>;

    /// Insert or replace a tweet. A tweet with an empty id gets a fresh one.
    async fn save(&self, tweet: Tweet) -> Result<Tweet, StoreError>;

    async fn delete(&self, tweet: &Tweet) -> Result<(), StoreError>;
}

/// Fresh document id (32 lowercase hex chars)
pub(super) fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
