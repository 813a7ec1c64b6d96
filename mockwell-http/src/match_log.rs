//! Append-only record of dispatched requests and how each was resolved.

use crate::types::HttpRequest;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// One dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Position in dispatch order, starting at 1.
    pub sequence: u64,
    /// Channel the request was issued on.
    pub channel: String,
    /// The request as received.
    pub request: HttpRequest,
    /// Index of the matching endpoint within the channel, if any.
    pub endpoint: Option<usize>,
}

impl MatchRecord {
    /// Check whether an endpoint answered this request.
    pub fn is_matched(&self) -> bool {
        self.endpoint.is_some()
    }

    /// A JSON summary, without body or headers.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "sequence": self.sequence,
            "channel": self.channel,
            "method": self.request.method.as_str(),
            "url": self.request.url,
            "endpoint": self.endpoint,
        })
    }
}

/// Log of every request a dispatcher has seen.
///
/// Thread-safe and can be shared across async tasks.
pub struct MatchLog {
    records: RwLock<Vec<MatchRecord>>,
    next_sequence: AtomicU64,
    enabled: AtomicBool,
}

impl MatchLog {
    /// Create an empty, enabled log.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_sequence: AtomicU64::new(1),
            enabled: AtomicBool::new(true),
        }
    }

    /// Append a record. Does nothing while recording is disabled.
    pub fn record(&self, channel: &str, request: &HttpRequest, endpoint: Option<usize>) {
        if !self.is_enabled() {
            return;
        }
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        self.records.write().push(MatchRecord {
            sequence,
            channel: channel.to_string(),
            request: request.clone(),
            endpoint,
        });
    }

    /// All records in dispatch order.
    pub fn records(&self) -> Vec<MatchRecord> {
        self.records.read().clone()
    }

    /// Records no endpoint answered.
    pub fn unmatched(&self) -> Vec<MatchRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| !r.is_matched())
            .cloned()
            .collect()
    }

    /// Records issued on `channel`.
    pub fn for_channel(&self, channel: &str) -> Vec<MatchRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.channel == channel)
            .cloned()
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Drop every record. Sequence numbers keep increasing.
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Enable or disable recording.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Check if recording is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Record summaries as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        let records = self.records.read();
        let summaries: Vec<_> = records.iter().map(MatchRecord::summary).collect();
        serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for MatchLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatchLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLog")
            .field("records", &self.len())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let log = MatchLog::new();
        log.record("", &HttpRequest::get("https://a/1"), Some(0));
        log.record("", &HttpRequest::get("https://a/2"), None);

        let records = log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, 1);
        assert_eq!(records[1].sequence, 2);
        assert!(records[0].is_matched());
        assert_eq!(log.unmatched().len(), 1);
        assert_eq!(log.unmatched()[0].request.url, "https://a/2");
    }

    #[test]
    fn disabled_log_ignores_records() {
        let log = MatchLog::new();
        log.set_enabled(false);
        log.record("", &HttpRequest::get("https://a/1"), Some(0));
        assert!(log.is_empty());
    }

    #[test]
    fn clear_keeps_sequence_monotonic() {
        let log = MatchLog::new();
        log.record("x", &HttpRequest::get("https://a/1"), None);
        log.clear();
        log.record("x", &HttpRequest::get("https://a/1"), None);
        assert_eq!(log.records()[0].sequence, 2);
    }

    #[test]
    fn json_summary() {
        let log = MatchLog::new();
        log.record("github", &HttpRequest::post("https://a/1"), Some(3));

        let parsed: serde_json::Value = serde_json::from_str(&log.to_json()).unwrap();
        assert_eq!(parsed[0]["channel"], "github");
        assert_eq!(parsed[0]["method"], "POST");
        assert_eq!(parsed[0]["endpoint"], 3);
        assert_eq!(log.for_channel("github").len(), 1);
        assert!(log.for_channel("other").is_empty());
    }
}
