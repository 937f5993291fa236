//! Tweet domain - model, store abstraction and store adapters

mod memory;
mod models;
mod postgres;
pub mod queries;
mod store;

pub use memory::MemoryTweetStore;
pub use models::Tweet;
pub use postgres::PgTweetStore;
pub use store::{StoreError, TweetStore, TweetStream};
