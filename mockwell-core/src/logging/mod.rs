//! Capture and verification of `tracing` events.
//!
//! Code under test logs through `tracing` as usual. A test installs a
//! [`LogCapture`] as the thread-default subscriber, runs the code, then
//! asserts on what was logged.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ tracing::*!  │────>│ LogCapture   │────>│ verify_logged() │
//! │ (under test) │     │ (buffer)     │     │ by_level() ...  │
//! └──────────────┘     └──────────────┘     └─────────────────┘
//! ```
//!
//! [`init_test_tracing`] is the other half: it routes the doubles' own
//! diagnostics to the test writer, filtered by `RUST_LOG`.

mod capture;
mod event;
mod init;

pub use capture::{CaptureConfig, DEFAULT_CAPTURE_CAPACITY, LogCapture, MessageMatch};
pub use event::{CapturedEvent, LogLevel};
pub use init::init_test_tracing;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Times;

    #[test]
    fn capture_workflow() {
        let capture = LogCapture::new();
        let _guard = capture.install();

        tracing::info!(order_id = 7, "order accepted");
        tracing::error!("inventory service unavailable");
        tracing::info!("order accepted");

        assert_eq!(capture.len(), 3);
        assert_eq!(capture.by_level(LogLevel::Error).len(), 1);
        capture
            .verify_logged(
                "order accepted",
                LogLevel::Info,
                Times::Exactly(2),
                MessageMatch::Exact,
            )
            .unwrap();
        capture
            .verify_logged(
                "unavailable",
                LogLevel::Error,
                Times::Once,
                MessageMatch::Contains,
            )
            .unwrap();
    }
}
