//! Tweet CRUD endpoints (/tweets/*)

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use futures::{Stream, StreamExt, TryStreamExt};
use utoipa::OpenApi;

use super::dto::TweetPayload;
use super::extract::ValidJson;
use super::stream::primed;
use crate::AppState;
use crate::domain::tweets::{StoreError, Tweet, TweetStream};
use crate::services::error::ApiError;

#[derive(OpenApi)]
#[openapi(
    paths(list_tweets, create_tweet, get_tweet, update_tweet, delete_tweet),
    components(schemas(Tweet, TweetPayload))
)]
pub struct TweetsApi;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tweets", get(list_tweets).post(create_tweet))
        .route(
            "/tweets/{id}",
            get(get_tweet).put(update_tweet).delete(delete_tweet),
        )
}

/// Encode a tweet stream as a JSON array, one chunk per element
fn json_array(tweets: TweetStream) -> impl Stream<Item = Result<Bytes, StoreError>> + Send {
    let open = futures::stream::once(async { Ok::<_, StoreError>(Bytes::from_static(b"[")) });
    let close = futures::stream::once(async { Ok::<_, StoreError>(Bytes::from_static(b"]")) });

    let items = tweets
        .enumerate()
        .map(|(i, tweet)| -> Result<Bytes, StoreError> {
            let tweet = tweet?;
            let mut buf = if i == 0 { Vec::new() } else { vec![b','] };
            serde_json::to_writer(&mut buf, &tweet)?;
            Ok(Bytes::from(buf))
        })
        .inspect_err(|err| tracing::error!(error = %err, "tweet listing aborted"));

    open.chain(items).chain(close)
}

/// GET /tweets - All tweets, streamed as a JSON array
#[utoipa::path(
    get,
    path = "/tweets",
    responses((status = 200, description = "get All Tweets", body = [Tweet]))
)]
async fn list_tweets(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let tweets = primed(state.store.find_all()).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(json_array(tweets)),
    )
        .into_response())
}

/// POST /tweets - Create a tweet; the store assigns its id
#[utoipa::path(
    post,
    path = "/tweets",
    request_body = TweetPayload,
    responses(
        (status = 200, description = "create Tweets", body = Tweet),
        (status = 400, description = "invalid tweet payload")
    )
)]
async fn create_tweet(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<TweetPayload>,
) -> Result<Json<Tweet>, ApiError> {
    let tweet = state.store.save(Tweet::unsaved(payload.into_text())).await?;
    tracing::info!(tweet_id = %tweet.id, "tweet created");

    Ok(Json(tweet))
}

/// GET /tweets/:id
#[utoipa::path(
    get,
    path = "/tweets/{id}",
    params(("id" = String, Path, description = "Tweet id")),
    responses(
        (status = 200, description = "get Tweet By Id", body = Tweet),
        (status = 404, description = "tweet not found")
    )
)]
async fn get_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.find_by_id(&id).await? {
        Some(tweet) => Ok(Json(tweet).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// PUT /tweets/:id - Replace the text of an existing tweet.
/// The id always comes from the path.
#[utoipa::path(
    put,
    path = "/tweets/{id}",
    params(("id" = String, Path, description = "Tweet id")),
    request_body = TweetPayload,
    responses(
        (status = 200, description = "update Tweet", body = Tweet),
        (status = 400, description = "invalid tweet payload"),
        (status = 404, description = "tweet not found")
    )
)]
async fn update_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<TweetPayload>,
) -> Result<Response, ApiError> {
    let Some(mut existing) = state.store.find_by_id(&id).await? else {
        tracing::debug!(tweet_id = %id, "update of unknown tweet");
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    existing.text = payload.into_text();
    let updated = state.store.save(existing).await?;
    tracing::info!(tweet_id = %updated.id, "tweet updated");

    Ok(Json(updated).into_response())
}

/// DELETE /tweets/:id
#[utoipa::path(
    delete,
    path = "/tweets/{id}",
    params(("id" = String, Path, description = "Tweet id")),
    responses(
        (status = 200, description = "delete Tweet"),
        (status = 404, description = "tweet not found")
    )
)]
async fn delete_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(existing) = state.store.find_by_id(&id).await? else {
        tracing::debug!(tweet_id = %id, "delete of unknown tweet");
        return Ok(StatusCode::NOT_FOUND);
    };

    state.store.delete(&existing).await?;
    tracing::info!(tweet_id = %id, "tweet deleted");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tweets::{MemoryTweetStore, TweetStore};
    use crate::routes::tests::{FailingStore, HalfStore, call, call_json, send};
    use serde_json::json;

    fn memory() -> Arc<dyn TweetStore> {
        Arc::new(MemoryTweetStore::new())
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let store = memory();

        let (s, created) = call_json(&store, "POST", "/tweets", Some(json!({"text": "hello"}))).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(created["text"], "hello");
        let id = created["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let uri = format!("/tweets/{id}");
        let (s, fetched) = call_json(&store, "GET", &uri, None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(fetched, json!({"id": id, "text": "hello"}));

        let (s, updated) = call_json(&store, "PUT", &uri, Some(json!({"text": "world"}))).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(updated, json!({"id": id, "text": "world"}));

        let (s, _, body) = call(store.clone(), "DELETE", &uri, None).await;
        assert_eq!(s, StatusCode::OK);
        assert!(body.is_empty());

        let (s, _, body) = call(store.clone(), "GET", &uri, None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let store = memory();
        let (s, created) = call_json(
            &store,
            "POST",
            "/tweets",
            Some(json!({"id": "chosen", "text": "hi"})),
        )
        .await;
        assert_eq!(s, StatusCode::OK);
        assert_ne!(created["id"], "chosen");
        assert!(store.find_by_id("chosen").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_404_with_empty_body() {
        let store = memory();
        let requests = [
            ("GET", None),
            ("PUT", Some(json!({"text": "x"}))),
            ("DELETE", None),
        ];

        for (method, body) in requests {
            let (s, _, text) = call(store.clone(), method, "/tweets/ghost", body).await;
            assert_eq!(s, StatusCode::NOT_FOUND, "{method} /tweets/ghost");
            assert!(text.is_empty(), "{method} should have an empty body");
        }
    }

    #[tokio::test]
    async fn update_keeps_path_id_over_payload_id() {
        let store = memory();
        let original = store.save(Tweet::unsaved("before")).await.unwrap();

        let uri = format!("/tweets/{}", original.id);
        let (s, updated) =
            call_json(&store, "PUT", &uri, Some(json!({"id": "other", "text": "x"}))).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(updated, json!({"id": original.id, "text": "x"}));

        let stored = store.find_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(stored.text, "x");
        assert!(store.find_by_id("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_delete_is_404() {
        let store = memory();
        let tweet = store.save(Tweet::unsaved("once")).await.unwrap();
        let uri = format!("/tweets/{}", tweet.id);

        let (s, _, _) = call(store.clone(), "DELETE", &uri, None).await;
        assert_eq!(s, StatusCode::OK);
        let (s, _, _) = call(store.clone(), "DELETE", &uri, None).await;
        assert_eq!(s, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_every_tweet_once() {
        let store = memory();

        let (s, listed) = call_json(&store, "GET", "/tweets", None).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(listed, json!([]));

        let mut ids = Vec::new();
        for i in 0..5 {
            let tweet = store.save(Tweet::unsaved(format!("t{i}"))).await.unwrap();
            ids.push(tweet.id);
        }

        let (s, listed) = call_json(&store, "GET", "/tweets", None).await;
        assert_eq!(s, StatusCode::OK);
        let listed_ids: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(listed_ids, ids.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn listing_failure_after_first_tweet_aborts_body() {
        let resp = send(Arc::new(HalfStore), "GET", "/tweets", None).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // A truncated array must never read as a complete one
        let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await;
        assert!(body.is_err());
    }

    #[tokio::test]
    async fn list_is_served_as_json() {
        let (_, headers, _) = call(memory(), "GET", "/tweets", None).await;
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn invalid_payloads_are_400_and_never_stored() {
        let store = memory();
        let payloads = [
            json!({}),
            json!({"text": null}),
            json!({"text": "   "}),
            json!({"text": "a".repeat(141)}),
        ];

        for payload in payloads {
            let (s, body) = call_json(&store, "POST", "/tweets", Some(payload.clone())).await;
            assert_eq!(s, StatusCode::BAD_REQUEST, "payload {payload}");
            assert_eq!(body["error"], "validation failed");
            assert!(body["fields"]["text"].is_array());
        }

        let (_, listed) = call_json(&store, "GET", "/tweets", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn invalid_update_leaves_tweet_untouched() {
        let store = memory();
        let tweet = store.save(Tweet::unsaved("keep")).await.unwrap();

        let uri = format!("/tweets/{}", tweet.id);
        let (s, _) = call_json(&store, "PUT", &uri, Some(json!({"text": ""}))).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
        assert_eq!(store.find_by_id(&tweet.id).await.unwrap().unwrap().text, "keep");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (s, _, _) = call(memory(), "POST", "/tweets", Some(json!("just a string"))).await;
        assert_eq!(s, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_failures_are_500() {
        let store: Arc<dyn TweetStore> = Arc::new(FailingStore);
        let requests = [
            ("GET", "/tweets", None),
            ("POST", "/tweets", Some(json!({"text": "x"}))),
            ("GET", "/tweets/abc", None),
            ("PUT", "/tweets/abc", Some(json!({"text": "x"}))),
            ("DELETE", "/tweets/abc", None),
        ];

        for (method, uri, body) in requests {
            let (s, _, _) = call(store.clone(), method, uri, body).await;
            assert_eq!(s, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        }
    }
}
