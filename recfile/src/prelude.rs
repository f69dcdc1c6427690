//! Convenient re-exports of commonly used types from recfile.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use recfile::prelude::*;
//! ```
//!
//! This provides access to:
//! - The record store and its backend traits
//! - The persisted document model
//! - Diagnostic severities and sinks
//! - Error types and result types

pub use recfile_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    diag::{DiagnosticSink, NullSink, Severity, TracingSink},
    document::{Document, Meta, RecordId},
    error::{RecordStoreError, RecordStoreResult},
    store::RecordStore,
};
