use thiserror::Error;

/// Errors surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure; the request never completed.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Request { status: u16, body: String },
    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
    /// Client-side validation failed; no request was issued.
    #[error(transparent)]
    Validation(#[from] models::errors::ModelError),
}

pub type Result<T> = std::result::Result<T, ApiError>;
