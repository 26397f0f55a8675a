use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server returned HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(String),
}
