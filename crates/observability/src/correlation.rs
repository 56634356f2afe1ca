use std::fmt;

use uuid::Uuid;

/// Identifier attached to every span of one request.
///
/// UUIDv7, so ids sort by creation time in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Span for one unit of work, tagged with a fresh request id.
pub fn request_span(operation: &'static str) -> (RequestId, tracing::Span) {
    let id = RequestId::new();
    let span = tracing::info_span!("request", op = operation, request_id = %id);
    (id, span)
}
