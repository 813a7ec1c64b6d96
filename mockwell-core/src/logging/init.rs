//! Test-time subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Route `tracing` output to the test harness writer.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`. Safe to call
/// from every test: only the first call installs the global subscriber, and
/// the return value reports whether this call was the one that did.
pub fn init_test_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().with_target(true))
        .try_init()
        .is_ok()
}
