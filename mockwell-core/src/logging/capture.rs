//! In-memory `tracing` layer that records events for later verification.

use super::event::{CapturedEvent, LogLevel};
use crate::error::VerifyError;
use crate::times::Times;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Maximum number of events kept by a default capture.
pub const DEFAULT_CAPTURE_CAPACITY: usize = 10_000;

/// Configuration for a [`LogCapture`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Maximum number of events retained; the oldest are dropped first.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl CaptureConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPTURE_CAPACITY
}

/// How an expected message is compared against captured messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageMatch {
    /// Ordinal equality.
    #[default]
    Exact,
    /// The captured message contains the expected text.
    Contains,
}

impl MessageMatch {
    fn is_match(&self, captured: &str, expected: &str) -> bool {
        match self {
            Self::Exact => captured == expected,
            Self::Contains => captured.contains(expected),
        }
    }
}

struct CaptureInner {
    buffer: RwLock<VecDeque<CapturedEvent>>,
    capacity: usize,
    next_id: AtomicU64,
}

/// A `tracing` layer that buffers every event it sees.
///
/// Cloning is cheap; clones share the same buffer, so one clone can be
/// installed as a subscriber while the test keeps another for assertions.
///
/// # Example
///
/// ```
/// use mockwell_core::logging::{LogCapture, LogLevel, MessageMatch};
/// use mockwell_core::Times;
///
/// let capture = LogCapture::new();
/// {
///     let _guard = capture.install();
///     tracing::info!(user = "ada", "signed in");
/// }
///
/// let events = capture.events();
/// assert_eq!(events[0].message, "signed in");
/// assert_eq!(events[0].field("user"), Some("ada"));
/// assert!(capture
///     .verify_logged("signed in", LogLevel::Info, Times::Once, MessageMatch::Exact)
///     .is_ok());
/// ```
#[derive(Clone)]
pub struct LogCapture {
    inner: Arc<CaptureInner>,
}

impl LogCapture {
    /// Create a capture with default configuration.
    pub fn new() -> Self {
        Self::with_config(CaptureConfig::default())
    }

    /// Create a capture with the given configuration.
    pub fn with_config(config: CaptureConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            inner: Arc::new(CaptureInner {
                buffer: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
                capacity,
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Install this capture as the default subscriber for the current thread.
    ///
    /// Events are captured until the returned guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    /// Record an event directly, bypassing `tracing`.
    pub fn push(&self, level: LogLevel, target: &str, message: &str) {
        self.store(
            level,
            target.to_string(),
            message.to_string(),
            BTreeMap::new(),
        );
    }

    fn store(
        &self,
        level: LogLevel,
        target: String,
        message: String,
        fields: BTreeMap<String, String>,
    ) {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut buffer = self.inner.buffer.write();
        if buffer.len() >= self.inner.capacity {
            buffer.pop_front();
        }
        buffer.push_back(CapturedEvent {
            id,
            level,
            target,
            message,
            fields,
        });
    }

    /// All captured events, oldest first.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.inner.buffer.read().iter().cloned().collect()
    }

    /// Events at exactly `level`.
    pub fn by_level(&self, level: LogLevel) -> Vec<CapturedEvent> {
        self.inner
            .buffer
            .read()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Events whose message contains `text`.
    pub fn containing(&self, text: &str) -> Vec<CapturedEvent> {
        self.inner
            .buffer
            .read()
            .iter()
            .filter(|e| e.message.contains(text))
            .cloned()
            .collect()
    }

    /// Count events at `level` whose message matches `expected`.
    pub fn count(&self, expected: &str, level: LogLevel, mode: MessageMatch) -> usize {
        self.inner
            .buffer
            .read()
            .iter()
            .filter(|e| e.level == level && mode.is_match(&e.message, expected))
            .count()
    }

    /// Verify that `expected` was logged at `level` the expected number of times.
    pub fn verify_logged(
        &self,
        expected: &str,
        level: LogLevel,
        times: Times,
        mode: MessageMatch,
    ) -> Result<(), VerifyError> {
        let actual = self.count(expected, level, mode);
        VerifyError::check(format!("{} log \"{}\"", level, expected), times, actual)
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.inner.buffer.read().len()
    }

    /// Check whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.inner.buffer.read().is_empty()
    }

    /// Drop every buffered event.
    pub fn clear(&self) {
        self.inner.buffer.write().clear();
    }
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogCapture")
            .field("len", &self.len())
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.store(
            LogLevel::from(metadata.level()),
            metadata.target().to_string(),
            visitor.message,
            visitor.fields,
        );
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.insert(field.name().to_string(), rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_message_and_fields() {
        let capture = LogCapture::new();
        let _guard = capture.install();

        tracing::warn!(attempt = 3, reason = "timeout", "retrying upstream");

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, LogLevel::Warn);
        assert_eq!(events[0].message, "retrying upstream");
        assert_eq!(events[0].field("attempt"), Some("3"));
        assert_eq!(events[0].field("reason"), Some("timeout"));
        assert_eq!(events[0].id, 1);
    }

    #[test]
    fn exact_match_is_ordinal() {
        let capture = LogCapture::new();
        capture.push(LogLevel::Info, "app", "Saved item");

        assert!(
            capture
                .verify_logged(
                    "Saved item",
                    LogLevel::Info,
                    Times::Once,
                    MessageMatch::Exact,
                )
                .is_ok()
        );
        assert!(
            capture
                .verify_logged(
                    "saved item",
                    LogLevel::Info,
                    Times::Once,
                    MessageMatch::Exact,
                )
                .is_err()
        );
    }

    #[test]
    fn level_must_match() {
        let capture = LogCapture::new();
        capture.push(LogLevel::Warn, "app", "disk nearly full");

        let err = capture
            .verify_logged("disk", LogLevel::Error, Times::Once, MessageMatch::Contains)
            .unwrap_err();
        assert_eq!(
            err,
            VerifyError::CountMismatch {
                subject: "ERROR log \"disk\"".to_string(),
                expected: Times::Once,
                actual: 0,
            }
        );
    }

    #[test]
    fn capacity_drops_oldest() {
        let capture = LogCapture::with_config(CaptureConfig::new().capacity(2));
        capture.push(LogLevel::Info, "app", "one");
        capture.push(LogLevel::Info, "app", "two");
        capture.push(LogLevel::Info, "app", "three");

        let messages: Vec<_> = capture.events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn clones_share_buffer() {
        let capture = LogCapture::new();
        let other = capture.clone();
        other.push(LogLevel::Debug, "app", "shared");

        assert_eq!(capture.len(), 1);
        capture.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn events_outside_guard_are_not_captured() {
        let capture = LogCapture::new();
        {
            let _guard = capture.install();
            tracing::info!("inside");
        }
        tracing::info!("outside");

        assert_eq!(capture.containing("side").len(), 1);
    }

    #[test]
    fn config_defaults() {
        let config: CaptureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPTURE_CAPACITY);
    }
}
