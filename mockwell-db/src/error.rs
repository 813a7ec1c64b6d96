//! Error types for the collection adapter.

use thiserror::Error;

/// Errors raised by mutation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Strict removal targeted entities that are not in the collection.
    #[error("C001: {missing} of {requested} removal target(s) not present in the collection")]
    EntityNotFound {
        /// Number of targets with no matching entry.
        missing: usize,
        /// Number of targets in the call.
        requested: usize,
    },
}

/// Errors raised while resolving a point lookup.
///
/// [`MockSet::find`](crate::MockSet::find) never produces one of these on
/// its own; they come from the lookup function and are returned unchanged.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The key tuple had the wrong number of components.
    #[error("L001: expected {expected} key value(s), got {actual}")]
    Arity {
        /// Components the lookup expects.
        expected: usize,
        /// Components supplied.
        actual: usize,
    },

    /// A key component had the wrong type.
    #[error("L002: expected {expected} key, got {actual}")]
    KeyType {
        /// Type the lookup expects.
        expected: &'static str,
        /// Type supplied.
        actual: &'static str,
    },

    /// Any other failure raised by a caller-supplied lookup function.
    #[error("L003: lookup failed: {0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LookupError {
    /// Wrap an arbitrary error raised by a lookup function.
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(err.into())
    }
}
