//! Logger injected into gRPC handlers.

use std::fmt;

use tracing::error;

use crate::context::RequestContext;

/// Stage of the `Register` pipeline a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ConvertRequest,
    ValidateCandidate,
    RegisterUser,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ConvertRequest => "convert_request",
            Stage::ValidateCandidate => "validate_candidate",
            Stage::RegisterUser => "register_user",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure sink for request handlers.
pub trait Logger: Send + Sync {
    /// Record a failure detected at `stage`.
    fn stage_failed(&self, ctx: &RequestContext, stage: Stage, error: &dyn fmt::Display);
}

/// [`Logger`] backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn stage_failed(&self, ctx: &RequestContext, stage: Stage, error: &dyn fmt::Display) {
        ctx.span().in_scope(|| {
            error!(
                stage = stage.as_str(),
                request_id = ctx.request_id(),
                operation = ctx.operation(),
                "request failed: {}",
                error
            );
        });
    }
}
