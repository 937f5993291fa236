//! Tweet service: CRUD and server-sent event streaming over a tweet store.

pub mod config;
pub mod constants;
pub mod domain;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use tower_http::cors::CorsLayer;

use constants::MAX_BODY_SIZE;
use domain::tweets::TweetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TweetStore>,
}

/// Assemble the HTTP application around a tweet store
pub fn app(store: Arc<dyn TweetStore>) -> Router {
    let state = Arc::new(AppState { store });

    routes::build_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
