//! Error types for the shared API client.

use serde_json::Value;
use thiserror::Error;

use crate::session::StorageError;

/// Message used when a failure carries no server-provided text.
pub const NETWORK_ERROR: &str = "Network Error";

/// Errors returned by [`ApiClient`](super::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {source}")]
    Build {
        #[source]
        source: reqwest::Error,
    },

    /// Connection, TLS or body-read failure; no usable response
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered 401
    #[error("Unauthorized")]
    Unauthorized { body: Option<Value> },

    /// Server answered with any other non-2xx status
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Build { .. } | ApiError::Transport { .. } => None,
        }
    }

    /// The `message` field of the error body, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Status { body, .. } => {
                body.as_ref().and_then(super::body_message)
            }
            ApiError::Build { .. } | ApiError::Transport { .. } => None,
        }
    }

    /// Best-effort message for display: server text or [`NETWORK_ERROR`].
    pub fn display_message(&self) -> String {
        self.server_message().unwrap_or(NETWORK_ERROR).to_string()
    }
}

/// Failures inside the session-expired hook. Always logged and swallowed.
#[derive(Debug, Error)]
pub enum SessionHookError {
    #[error("store is no longer available")]
    StoreUnavailable,

    #[error("failed to clear stored session: {0}")]
    Storage(#[from] StorageError),
}
