//! Error types for API calls, sessions and configuration.
//!
//! Every API failure is normalised into [`ApiError`], which always carries a
//! message fit to show a user: the server's `message` when it sent one, else
//! a fixed default for the operation, else a generic network message.

use thiserror::Error;

use crate::model::MessageBody;
use crate::ops::OperationKind;

/// Shown when a failure cannot be attributed to a server response.
pub const NETWORK_ERROR: &str = "Network error occurred";

/// API call errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The server rejected the session (HTTP 401). The session is cleared.
    #[error("{message}")]
    Unauthorized { message: String },

    /// No response arrived (connect failure, timeout, bad request setup).
    #[error("{message}")]
    Network { message: String },

    /// A success response whose body was not what the operation expects.
    #[error("{message}")]
    Decode { message: String },

    /// Superseded by a newer operation of the same kind, or cancelled.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Normalise a non-success response.
    pub(crate) fn from_response(kind: OperationKind, status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| kind.failure_message().to_string());

        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Request { status, message }
        }
    }

    /// Normalise a transport failure.
    ///
    /// Failures while talking to the server keep the operation's default
    /// message; anything else (URL or request construction) is a generic
    /// network error.
    pub(crate) fn from_transport(kind: OperationKind, err: &reqwest::Error) -> Self {
        let message = if err.is_connect() || err.is_timeout() || err.is_request() {
            kind.failure_message()
        } else {
            NETWORK_ERROR
        };
        ApiError::Network {
            message: message.to_string(),
        }
    }

    /// Human-readable message for display.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. } | ApiError::NotSignedIn)
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// Durable session storage errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid API base URL {url}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
