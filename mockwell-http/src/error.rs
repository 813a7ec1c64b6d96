//! Error types for dispatcher construction and request dispatch.

use thiserror::Error;

/// Errors raised while registering endpoints.
///
/// Construction is all-or-nothing: one bad descriptor rejects the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A channel (or the dispatcher as a whole) has nothing registered.
    #[error("H001: no endpoints registered for channel {channel:?}")]
    NoEndpoints {
        /// Channel with no descriptors.
        channel: String,
    },

    /// A descriptor lacks a required field.
    #[error("H002: endpoint {index} on channel {channel:?} is missing {missing}")]
    InvalidEndpoint {
        /// Channel the descriptor was registered on.
        channel: String,
        /// Position of the descriptor within its channel.
        index: usize,
        /// Missing fields, comma separated.
        missing: String,
    },

    /// The same channel name was registered twice.
    #[error("H003: channel {0:?} registered more than once")]
    DuplicateChannel(String),
}

/// Errors raised while dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// No registered endpoint matched the request.
    #[error("H100: no mock endpoint matched {method} {url} on channel {channel:?}")]
    NoMockMatch {
        /// Channel the request was issued on.
        channel: String,
        /// Request method.
        method: String,
        /// Request URL.
        url: String,
    },

    /// The request could not be built.
    #[error("H101: invalid request: {0}")]
    InvalidRequest(String),
}
