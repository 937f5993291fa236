//! Postgres queries backing `PgTweetStore`
//!
//! The `tweets` table is the document collection: one row per tweet, with
//! `created_at` fixing the enumeration order. Functions take any Postgres
//! executor; the store passes its pool.

use futures::stream::BoxStream;
use sqlx::{Executor, Postgres};

use super::models::Tweet;

/// Create the tweets collection if it does not exist yet
pub async fn ensure_tweets_table<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tweets (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(executor)
    .await?;

    Ok(())
}

/// Cursor over every tweet, oldest first. Rows are decoded as they arrive.
pub fn stream_tweets<'e, 'c: 'e, E>(executor: E) -> BoxStream<'e, Result<Tweet, sqlx::Error>>
where
    E: 'e + Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        SELECT id, text FROM tweets
        ORDER BY created_at, id
        "#,
    )
    .fetch(executor)
}

pub async fn find_tweet<'e, E>(executor: E, id: &str) -> Result<Option<Tweet>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as("SELECT id, text FROM tweets WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Insert a tweet, or replace the text of the tweet with the same id.
/// `created_at` is kept on replace so enumeration order is stable.
pub async fn upsert_tweet<'e, E>(executor: E, id: &str, text: &str) -> Result<Tweet, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        r#"
        INSERT INTO tweets (id, text)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET text = EXCLUDED.text
        RETURNING id, text
        "#,
    )
    .bind(id)
    .bind(text)
    .fetch_one(executor)
    .await
}

/// Delete a tweet. Returns true if a row was removed.
pub async fn delete_tweet<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
