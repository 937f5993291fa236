//! Request DTOs for tweet endpoints

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Body of create and update requests. A client-supplied `id` is accepted
/// but ignored; ids come from the store or the request path.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TweetPayload {
    /// Required, not blank, at most 140 characters
    #[schema(required = true, max_length = 140)]
    #[validate(required, length(max = 140), custom(function = "not_blank"))]
    pub text: Option<String>,
}

impl TweetPayload {
    /// Text of a payload that already passed validation
    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
