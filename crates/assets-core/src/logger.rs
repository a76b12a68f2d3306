//! Diagnostic sink for tree building and batch progress

/// Receives human-readable progress and diagnostic messages.
///
/// Structured detail goes through `tracing`; this sink carries the few
/// messages a host (CLI, deployment hook) shows to its user.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// [`Logger`] that forwards every message to `tracing` at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
