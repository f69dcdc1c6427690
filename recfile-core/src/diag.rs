//! Advisory diagnostics for record store operations.
//!
//! Every store operation emits a human-readable status line describing its
//! outcome. These lines are advisory only: they never change control flow,
//! and an embedder may route them to any observability sink (or discard
//! them) without affecting correctness.
//!
//! The sink is an injected capability of the store, not a global. The
//! default [`TracingSink`] forwards lines to the `tracing` ecosystem, where
//! a fmt subscriber renders them as color-coded console output; [`NullSink`]
//! drops everything.

use std::fmt;

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// An operation completed and mutated or created the store.
    Success,
    /// The operation proceeded, but not the way the caller asked (e.g. an
    /// insert id collision remapped to the next free id).
    Warning,
    /// The operation was refused over store contents (e.g. a missing record id).
    Error,
    /// The operation failed at the store level: missing store, unreadable or
    /// unwritable document.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// Sink for the advisory status lines emitted by store operations.
///
/// Implementations must tolerate being called from multiple threads.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    /// Consumes one status line.
    fn emit(&self, severity: Severity, message: &str);
}

/// Routes diagnostics to the `tracing` ecosystem.
///
/// This is the default sink of a
/// [`RecordStore`](crate::store::RecordStore). Severities map onto tracing
/// levels: `Info` and `Success` are emitted at info level (`Success` with an
/// `outcome` field), `Warning` at warn, `Error` and `Fatal` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{}", message),
            Severity::Success => tracing::info!(outcome = "success", "{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
            Severity::Fatal => tracing::error!(fatal = true, "{}", message),
        }
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _severity: Severity, _message: &str) {}
}
