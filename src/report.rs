//! Run reporting
//!
//! The orchestrator reports through an injected [`Reporter`] instead of
//! writing to a global logger, so tests can silence or capture it.

use std::fmt::Debug;
use tracing::{debug, error};

/// Sink for debug events and swallowed errors of a run
pub trait Reporter: Send + Sync {
    /// Record a debug event with a tag and a payload
    fn debug(&self, tag: &str, payload: &dyn Debug);

    /// Record an error that did not abort the run
    fn error(&self, err: &dyn std::error::Error);
}

/// Reporter that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn debug(&self, tag: &str, payload: &dyn Debug) {
        debug!(tag, payload = ?payload);
    }

    fn error(&self, err: &dyn std::error::Error) {
        error!(error = %err, "non-fatal error");
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn debug(&self, _tag: &str, _payload: &dyn Debug) {}

    fn error(&self, _err: &dyn std::error::Error) {}
}
