//! Error types for the client layer.

use std::fmt;

use crate::status::{ApiError, ErrorKind};

/// Errors produced by the client layer, wrapping transport errors and adding
/// status errors, method lookup, background task and configuration failures.
#[derive(Debug)]
pub enum GoogleCoreError {
    /// The response reported an error status.
    Api(ApiError),
    /// An error from the underlying transport.
    Transport(googlecore_api::Error),
    /// No wrapped method has this name.
    UnknownMethod(String),
    /// A submitted background call panicked or was aborted.
    Join(tokio::task::JoinError),
    /// The operation was cancelled through its cancellation token.
    Cancelled,
    /// Client configuration was missing or invalid.
    Config(String),
}

impl GoogleCoreError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// The status error kind, if this is a status error.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.api_error().map(ApiError::kind)
    }
}

impl fmt::Display for GoogleCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::UnknownMethod(name) => write!(f, "Unknown API method: {}", name),
            Self::Join(e) => write!(f, "Background call failed: {}", e),
            Self::Cancelled => write!(f, "Operation cancelled"),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GoogleCoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Transport(e) => Some(e),
            Self::Join(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for GoogleCoreError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<googlecore_api::Error> for GoogleCoreError {
    fn from(e: googlecore_api::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<tokio::task::JoinError> for GoogleCoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Join(e)
    }
}
