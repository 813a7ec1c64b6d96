//! Dispatcher configuration.

use serde::{Deserialize, Serialize};

fn default_record_requests() -> bool {
    true
}

/// Configuration for a [`MockHttp`](crate::MockHttp) dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Name of the channel that unnamed clients and [`MockHttp::new`](crate::MockHttp::new)
    /// register on.
    #[serde(default)]
    pub default_channel: String,

    /// Whether dispatched requests are appended to the match log.
    ///
    /// Hit counters used by `hits`/`verify` are kept either way.
    #[serde(default = "default_record_requests")]
    pub record_requests: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_channel: String::new(),
            record_requests: default_record_requests(),
        }
    }
}

impl DispatcherConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default channel name.
    pub fn with_default_channel(mut self, name: impl Into<String>) -> Self {
        self.default_channel = name.into();
        self
    }

    /// Stop recording requests in the match log.
    pub fn without_recording(mut self) -> Self {
        self.record_requests = false;
        self
    }
}
