//! Port for structured tool invocation logging.
//!
//! Defines the [`InvocationLogger`] trait for recording every tool execution
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per invocation (JSONL).

use chrono::{DateTime, Utc};

/// One finished tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    pub tool_name: String,
    /// Prompt variant, when the tool takes one
    pub variant: Option<String>,
    pub success: bool,
    /// Failure message, when `success` is false
    pub error: Option<String>,
    pub duration_ms: u64,
    pub started_at: DateTime<Utc>,
}

/// Port for logging tool invocations.
///
/// The `log` method is synchronous and non-fallible so that a logging
/// problem never changes a tool's result; failures are silently ignored.
pub trait InvocationLogger: Send + Sync {
    fn log(&self, record: InvocationRecord);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _record: InvocationRecord) {}
}
