use reqwest::StatusCode;
use thiserror::Error;

/// A forecast request that did not produce a payload.
///
/// Both variants mean the request failed; `Status` is used when the provider
/// answered with a non-success code, `Transport` for everything else
/// (connection, TLS, timeouts, undecodable body).
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ForecastError {
    /// HTTP status returned by the provider, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ForecastError::Status { status, .. } => Some(*status),
            ForecastError::Transport(err) => err.status(),
        }
    }
}
