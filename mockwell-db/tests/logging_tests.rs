//! Mutations emit debug events; strict rejections emit a warning.

mod common;

use common::{Blog, seeded};
use mockwell_core::Times;
use mockwell_core::logging::{LogCapture, LogLevel, MessageMatch};
use mockwell_db::prelude::*;

#[test]
fn test_mutations_are_logged_at_debug() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let set = MockSet::new(seeded(&[1]));
    set.add(Blog::new(2));
    set.add_range([Blog::new(3), Blog::new(4)]);
    set.remove(&Blog::new(1)).unwrap();
    set.clear();

    capture
        .verify_logged(
            "Added entity",
            LogLevel::Debug,
            Times::Once,
            MessageMatch::Exact,
        )
        .unwrap();
    capture
        .verify_logged(
            "Added entities",
            LogLevel::Debug,
            Times::Once,
            MessageMatch::Exact,
        )
        .unwrap();
    capture
        .verify_logged(
            "Removed",
            LogLevel::Debug,
            Times::Once,
            MessageMatch::Contains,
        )
        .unwrap();

    let cleared = capture.containing("Cleared");
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].field("count"), Some("3"));
}

#[test]
fn test_strict_rejection_is_logged_as_warning() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let set = MockSet::with_config(seeded(&[1]), CollectionConfig::new().strict());
    assert!(set.remove(&Blog::new(9)).is_err());

    capture
        .verify_logged(
            "Strict removal rejected",
            LogLevel::Warn,
            Times::Once,
            MessageMatch::Exact,
        )
        .unwrap();
    assert!(capture.by_level(LogLevel::Debug).is_empty());
}
