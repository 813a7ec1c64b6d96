//! Integration tests for log capture and verification.

use mockwell_core::logging::{CaptureConfig, LogCapture, LogLevel, MessageMatch, init_test_tracing};
use mockwell_core::{Times, VerifyError};

struct WeatherService;

impl WeatherService {
    fn forecast(&self, city: &str) -> Option<i32> {
        tracing::info!(city, "Fetching forecast");
        if city.is_empty() {
            tracing::warn!("Empty city name supplied");
            return None;
        }
        tracing::info!(city, temperature = 21, "Forecast ready");
        Some(21)
    }
}

#[test]
fn test_verify_exact_message() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    WeatherService.forecast("Oslo");

    capture
        .verify_logged(
            "Fetching forecast",
            LogLevel::Info,
            Times::Once,
            MessageMatch::Exact,
        )
        .unwrap();
    capture
        .verify_logged(
            "Forecast ready",
            LogLevel::Info,
            Times::Once,
            MessageMatch::Exact,
        )
        .unwrap();
    capture
        .verify_logged(
            "Empty city",
            LogLevel::Warn,
            Times::Never,
            MessageMatch::Contains,
        )
        .unwrap();
}

#[test]
fn test_verify_reports_observed_count() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    WeatherService.forecast("");

    let err = capture
        .verify_logged(
            "Forecast ready",
            LogLevel::Info,
            Times::AtLeast(1),
            MessageMatch::Exact,
        )
        .unwrap_err();

    match err {
        VerifyError::CountMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, Times::AtLeast(1));
            assert_eq!(actual, 0);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_exact_does_not_match_substring() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    WeatherService.forecast("");

    assert!(
        capture
            .verify_logged(
                "Empty city",
                LogLevel::Warn,
                Times::Once,
                MessageMatch::Exact,
            )
            .is_err()
    );
    capture
        .verify_logged(
            "Empty city",
            LogLevel::Warn,
            Times::Once,
            MessageMatch::Contains,
        )
        .unwrap();
}

#[test]
fn test_structured_fields_are_captured() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    WeatherService.forecast("Lima");

    let events = capture.by_level(LogLevel::Info);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.field("city") == Some("Lima")));
    assert_eq!(events[1].field("temperature"), Some("21"));
    assert!(events[0].id < events[1].id);
}

#[test]
fn test_bounded_capture() {
    let capture = LogCapture::with_config(CaptureConfig::new().capacity(1));
    let _guard = capture.install();

    WeatherService.forecast("");

    let events = capture.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, LogLevel::Warn);
}

#[test]
fn test_capture_overrides_global_subscriber() {
    init_test_tracing();
    assert!(!init_test_tracing());

    let capture = LogCapture::new();
    {
        let _guard = capture.install();
        tracing::error!("captured");
    }
    tracing::error!("not captured");

    assert_eq!(capture.len(), 1);
    capture.clear();
    assert!(capture.is_empty());
}
