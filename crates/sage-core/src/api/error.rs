use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single backend round-trip.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, I/O or timeout failure before a response arrived.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{path} returned {status}{}", status_suffix(.message))]
    Status {
        path: String,
        status: StatusCode,
        message: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// A local file needed for the request could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be built (bad base URL, bad MIME type).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Returns the HTTP status for `Status` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
