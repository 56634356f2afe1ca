//! Shared tracing setup and request correlation.

/// Initialize process-wide logging with `info` as the default level.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Subscriber configuration.
pub mod tracing;

/// Request correlation ids.
pub mod correlation;

pub use correlation::{RequestId, request_span};
