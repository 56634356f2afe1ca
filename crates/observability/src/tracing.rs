//! Subscriber setup: one JSON object per event on stdout.

use tracing_subscriber::EnvFilter;

// Rendering and spreadsheet crates are chatty at `info`.
const QUIET_DEPENDENCIES: &[&str] = &["printpdf=warn", "calamine=warn", "hyper=warn"];

/// Filter used when `RUST_LOG` is unset or does not parse.
pub fn default_filter(level: &str) -> String {
    std::iter::once(level)
        .chain(QUIET_DEPENDENCIES.iter().copied())
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the JSON subscriber.
///
/// Every event carries the fields of its innermost span, so log lines emitted
/// inside a request span include its `request_id`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false)
        .try_init();
}
