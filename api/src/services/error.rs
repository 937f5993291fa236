//! Error handling utilities for route handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::tweets::StoreError;

/// Failures a handler can surface. Not-found is not an error; handlers
/// answer 404 directly from an empty lookup.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ValidationBody {
    error: &'static str,
    fields: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let fields = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errs)| {
                        let codes = errs.iter().map(|e| e.code.to_string()).collect();
                        (field.to_string(), codes)
                    })
                    .collect();

                let body = ValidationBody {
                    error: "validation failed",
                    fields,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Body(rejection) => {
                let status = match &rejection {
                    JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, rejection.body_text()).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
