//! In-memory tweet store
//!
//! Documents are enumerated in insertion order. Replacing a document keeps
//! its original position.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::RwLock;

use super::models::Tweet;
use super::store::{StoreError, TweetStore, TweetStream, generate_id};

#[derive(Default)]
struct Documents {
    next_seq: u64,
    by_id: HashMap<String, (u64, Tweet)>,
}

impl Documents {
    fn ordered(&self) -> Vec<Tweet> {
        let mut entries: Vec<&(u64, Tweet)> = self.by_id.values().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, tweet)| tweet.clone()).collect()
    }
}

#[derive(Default, Clone)]
pub struct MemoryTweetStore {
    docs: Arc<RwLock<Documents>>,
}

impl MemoryTweetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TweetStore for MemoryTweetStore {
    fn find_all(&self) -> TweetStream {
        let docs = Arc::clone(&self.docs);

        // Snapshot is taken on first poll, like a cursor opened on demand
        async_stream::stream! {
            let tweets = docs.read().await.ordered();
            for tweet in tweets {
                yield Ok(tweet);
            }
        }
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tweet>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.by_id.get(id).map(|(_, tweet)| tweet.clone()))
    }

    async fn save(&self, mut tweet: Tweet) -> Result<Tweet, StoreError> {
        if tweet.is_new() {
            tweet.id = generate_id();
        }

        let mut docs = self.docs.write().await;
        let existing = docs.by_id.get(&tweet.id).map(|(seq, _)| *seq);
        let seq = match existing {
            Some(seq) => seq,
            None => {
                docs.next_seq += 1;
                docs.next_seq
            }
        };
        docs.by_id.insert(tweet.id.clone(), (seq, tweet.clone()));

        Ok(tweet)
    }

    async fn delete(&self, tweet: &Tweet) -> Result<(), StoreError> {
        self.docs.write().await.by_id.remove(&tweet.id);
        Ok(())
    }
}
