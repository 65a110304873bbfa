//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "message": ... }` body returned by mutating endpoints and errors.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
