//! Tweet model definitions

use serde::Serialize;
use utoipa::ToSchema;

/// A persisted tweet document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Tweet {
    /// Store-assigned identity
    pub id: String,
    pub text: String,
}

impl Tweet {
    /// A tweet that has not been saved yet; the store assigns its id
    pub fn unsaved(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            text: text.into(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}
