//! Error types returned by the search layer
//!
//! Every failure surfaces to the immediate caller as a [`SearchError`]. Nothing
//! here is retried, logged or swallowed.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors produced while building, sending or decoding a search
#[derive(Error, Debug)]
pub enum SearchError {
    /// Malformed request parameters, detected before anything is sent
    #[error("validation error: {0}")]
    Validation(String),

    /// Unsupported combination of options
    #[error("config error: {0}")]
    Config(String),

    /// The transport failed to deliver the request or read the reply
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response did not have the expected shape
    #[error("decode error: {reason}")]
    Decode { reason: String },

    /// The in-flight request was cancelled by the caller
    #[error("search cancelled")]
    Cancelled,
}

impl SearchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// True for errors raised locally, before the transport was touched
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

/// Failures reported by a [`Transport`](crate::network::Transport)
#[derive(Error, Debug)]
pub enum TransportError {
    /// The engine did not answer within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// The engine answered with a non-success status
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be read as a document
    #[error("malformed response body: {0}")]
    Body(String),

    /// Connection or protocol level failure
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
