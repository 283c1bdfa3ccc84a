use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Search error
#[derive(Error, Debug)]
pub enum SearchError {
    /// The primary search request returned a non-success status
    #[error("Upstream unavailable: status {status}")]
    UpstreamUnavailable { status: u16 },

    /// A per-item follow-up request returned a non-success status
    #[error("Secondary lookup failed: status {status}")]
    SecondaryLookupFailed { status: u16 },

    /// Connection or timeout failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SearchError::MalformedResponse(error.to_string())
        } else {
            SearchError::Transport(error.to_string())
        }
    }
}
