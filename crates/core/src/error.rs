/// Domain-level failures shared by the data and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client-supplied data violates a field constraint.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request itself is unusable (missing body, malformed path parameter).
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
