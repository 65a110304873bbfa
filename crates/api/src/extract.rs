//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use diana_core::dinosaur::{parse_id_param, INVALID_ID_PARAM};
use diana_core::error::CoreError;
use diana_core::types::DbId;
use serde_json::Value;

use crate::error::AppError;

/// A required JSON request body, kept untyped for the validators.
///
/// Unlike `axum::Json`, a missing or unparsable body is a
/// [`CoreError::MalformedRequest`] (422), and no `Content-Type` header is
/// required.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::MalformedRequest(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(CoreError::MalformedRequest("Provide JSON body".to_string()).into());
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|_| CoreError::MalformedRequest("Malformed JSON body".to_string()).into())
    }
}

/// The `{id}` path segment of `/dino/{id}`, parsed to a [`DbId`].
///
/// Any failure, including a segment that is not UTF-8 once percent-decoded,
/// is a [`CoreError::MalformedRequest`] (422).
#[derive(Debug, Clone, Copy)]
pub struct DinosaurId(pub DbId);

impl<S> FromRequestParts<S> for DinosaurId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected id path segment");
                CoreError::MalformedRequest(INVALID_ID_PARAM.to_string())
            })?;

        Ok(DinosaurId(parse_id_param(&raw)?))
    }
}
