//! Expected invocation counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many times something is expected to have happened.
///
/// Used by the HTTP match log and by log capture verification.
///
/// # Example
///
/// ```
/// use mockwell_core::Times;
///
/// assert!(Times::Once.matches(1));
/// assert!(Times::AtLeast(2).matches(5));
/// assert!(!Times::Between(1, 3).matches(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum Times {
    /// Zero occurrences.
    Never,
    /// Exactly one occurrence.
    #[default]
    Once,
    /// Exactly `n` occurrences.
    Exactly(usize),
    /// `n` or more occurrences.
    AtLeast(usize),
    /// At most `n` occurrences.
    AtMost(usize),
    /// Between `lo` and `hi` occurrences, both inclusive.
    Between(usize, usize),
}

impl Times {
    /// Check whether an observed count satisfies this expectation.
    pub fn matches(&self, count: usize) -> bool {
        match *self {
            Self::Never => count == 0,
            Self::Once => count == 1,
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::AtMost(n) => count <= n,
            Self::Between(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Never => write!(f, "never"),
            Self::Once => write!(f, "exactly once"),
            Self::Exactly(n) => write!(f, "exactly {} times", n),
            Self::AtLeast(n) => write!(f, "at least {} times", n),
            Self::AtMost(n) => write!(f, "at most {} times", n),
            Self::Between(lo, hi) => write!(f, "between {} and {} times", lo, hi),
        }
    }
}
