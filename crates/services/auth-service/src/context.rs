//! Per-call request context.
//!
//! A `RequestContext` is created when an RPC enters the service and is passed
//! by reference to every stage. It owns the call's tracing span; the span is
//! closed when the context is dropped, whichever way the call ends.

use std::time::Instant;

use tonic::metadata::MetadataMap;
use tracing::{debug, info_span, Span};
use uuid::Uuid;

/// Metadata key used to propagate a caller-supplied request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Context for a single RPC.
#[derive(Debug)]
pub struct RequestContext {
    request_id: String,
    operation: &'static str,
    span: Span,
    started_at: Instant,
}

impl RequestContext {
    /// Open a context for `operation`, reusing the caller's request id if present.
    pub fn start(operation: &'static str, metadata: &MetadataMap) -> Self {
        let request_id = metadata
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = info_span!("rpc", otel.name = operation, request_id = %request_id);

        Self {
            request_id,
            operation,
            span,
            started_at: Instant::now(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Handle to the call span, for instrumenting futures.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for RequestContext {
    fn drop(&mut self) {
        let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        self.span
            .in_scope(|| debug!(operation = self.operation, elapsed_ms, "span closed"));
    }
}
