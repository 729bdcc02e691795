use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single backend call, as seen by a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (connect, timeout, broken body).
    #[error("network failure: {0}")]
    Network(String),
    /// 4xx from the backend.
    #[error("request rejected ({status}): {detail}")]
    Client { status: u16, detail: String },
    /// 5xx, or any status the client does not expect.
    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },
    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Input rejected before anything was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Maps a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, detail: String) -> Self {
        if (400..500).contains(&status) {
            ApiError::Client { status, detail }
        } else {
            ApiError::Server { status, detail }
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{value}': {reason}")]
    ApiBase { value: String, reason: String },
    #[error("invalid HTTP timeout '{0}': expected a positive number of seconds")]
    Timeout(String),
}
