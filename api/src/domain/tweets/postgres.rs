//! Postgres-backed tweet store

use async_trait::async_trait;
use futures::StreamExt;
use sqlx::PgPool;

use super::models::Tweet;
use super::queries;
use super::store::{StoreError, TweetStore, TweetStream, generate_id};

#[derive(Clone)]
pub struct PgTweetStore {
    pool: PgPool,
}

impl PgTweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Make sure the backing table exists
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        queries::ensure_tweets_table(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TweetStore for PgTweetStore {
    fn find_all(&self) -> TweetStream {
        let pool = self.pool.clone();

        async_stream::stream! {
            let mut rows = queries::stream_tweets(&pool);
            while let Some(row) = rows.next().await {
                yield row.map_err(StoreError::from);
            }
        }
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tweet>, StoreError> {
        Ok(queries::find_tweet(&self.pool, id).await?)
    }

    async fn save(&self, tweet: Tweet) -> Result<Tweet, StoreError> {
        let id = if tweet.is_new() {
            generate_id()
        } else {
            tweet.id
        };

        Ok(queries::upsert_tweet(&self.pool, &id, &tweet.text).await?)
    }

    async fn delete(&self, tweet: &Tweet) -> Result<(), StoreError> {
        let deleted = queries::delete_tweet(&self.pool, &tweet.id).await?;
        if !deleted {
            tracing::debug!(tweet_id = %tweet.id, "delete matched no rows");
        }
        Ok(())
    }
}
