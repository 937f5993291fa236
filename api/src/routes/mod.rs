pub mod dto;
pub mod extract;
pub mod stream;
pub mod tweets;

use axum::{Json, Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::AppState;

#[derive(OpenApi)]
#[openapi(info(title = "Tweet service", description = "CRUD and server-sent events over tweets"))]
struct ApiDoc;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/v3/api-docs", get(api_docs))
        .merge(tweets::routes())
        .merge(stream::routes())
}

/// OpenAPI document covering every documented route
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(tweets::TweetsApi::openapi());
    doc.merge(stream::StreamApi::openapi());
    doc
}

async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}

async fn health() -> &'static str {
    "ok"
}
