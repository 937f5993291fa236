//! Server-sent event stream of tweets (/stream/tweets)

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, Sse},
    routing::get,
};
use futures::{Stream, StreamExt};
use utoipa::OpenApi;

use crate::AppState;
use crate::domain::tweets::{StoreError, Tweet, TweetStream};
use crate::services::error::ApiError;

#[derive(OpenApi)]
#[openapi(paths(stream_tweets))]
pub struct StreamApi;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stream/tweets", get(stream_tweets))
}

/// Wait for the store to answer before committing to a response.
///
/// A failure on the first element becomes a regular error response; later
/// failures can only abort the body that is already on the wire.
pub(crate) async fn primed(mut tweets: TweetStream) -> Result<TweetStream, StoreError> {
    match tweets.next().await {
        Some(Ok(first)) => Ok(futures::stream::once(async move { Ok(first) })
            .chain(tweets)
            .boxed()),
        Some(Err(err)) => Err(err),
        None => Ok(futures::stream::empty().boxed()),
    }
}

/// GET /stream/tweets - Every stored tweet as one event each, then end of stream
#[utoipa::path(
    get,
    path = "/stream/tweets",
    description = "Tweets are Sent to the client as Server Sent Events",
    responses(
        (status = 200, description = "stream All Tweets", body = Tweet, content_type = "text/event-stream")
    )
)]
async fn stream_tweets(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, StoreError>>>, ApiError> {
    let tweets = primed(state.store.find_all()).await?;
    tracing::debug!("streaming tweets as server-sent events");

    let events = tweets
        .map(|tweet| -> Result<Event, StoreError> {
            let tweet = tweet?;
            Ok(Event::default().data(serde_json::to_string(&tweet)?))
        })
        .inspect(|event| {
            if let Err(err) = event {
                tracing::error!(error = %err, "tweet stream aborted");
            }
        });

    Ok(Sse::new(events))
}
