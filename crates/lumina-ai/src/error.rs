//! Error types for content generation.

/// Error from the generation service.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AiError {
    /// No API key configured.
    #[error("API key not found")]
    MissingApiKey,

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
