//! Store construction
//!
//! Picks the tweet store backing the service: Postgres when a database URL is
//! configured, otherwise an in-memory document map.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::domain::tweets::{MemoryTweetStore, PgTweetStore, StoreError, TweetStore};

pub async fn connect_store(config: &Config) -> Result<Arc<dyn TweetStore>, StoreError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, tweets are kept in memory");
        return Ok(Arc::new(MemoryTweetStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;

    let store = PgTweetStore::new(pool);
    store.ensure_schema().await?;
    tracing::info!(max_connections = config.max_connections, "connected to Postgres");

    Ok(Arc::new(store))
}
