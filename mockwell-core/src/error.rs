//! Verification errors.

use crate::times::Times;
use thiserror::Error;

/// A verification expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The observed count did not satisfy the expected [`Times`].
    #[error("V001: expected {subject} {expected}, observed {actual}")]
    CountMismatch {
        /// What was being counted.
        subject: String,
        /// Expected count.
        expected: Times,
        /// Observed count.
        actual: usize,
    },

    /// One or more registered expectations were never exercised.
    #[error("V002: never invoked: {}", subjects.join(", "))]
    NeverInvoked {
        /// Descriptions of every expectation that saw no call.
        subjects: Vec<String>,
    },
}

impl VerifyError {
    /// Check `actual` against `expected`, producing a `CountMismatch` on failure.
    pub fn check(subject: impl Into<String>, expected: Times, actual: usize) -> Result<(), Self> {
        if expected.matches(actual) {
            Ok(())
        } else {
            Err(Self::CountMismatch {
                subject: subject.into(),
                expected,
                actual,
            })
        }
    }
}
