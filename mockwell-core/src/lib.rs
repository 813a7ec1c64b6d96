//! Shared building blocks for the mockwell test doubles.
//!
//! This crate holds the pieces every double needs but none of them owns:
//!
//! - **Times**: expected invocation counts for verification
//! - **VerifyError**: the failure returned by every verification surface
//! - **Logging**: capture of `tracing` events emitted by code under test,
//!   with count-based verification
//!
//! # Example
//!
//! ```
//! use mockwell_core::logging::{LogCapture, LogLevel, MessageMatch};
//! use mockwell_core::Times;
//!
//! let capture = LogCapture::new();
//! let _guard = capture.install();
//!
//! tracing::warn!("payment declined for order 42");
//!
//! capture
//!     .verify_logged("payment declined", LogLevel::Warn, Times::Once, MessageMatch::Contains)
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod logging;
pub mod times;

pub use error::VerifyError;
pub use times::Times;
