//! Main recfile crate: a minimal single-file JSON record store.
//!
//! This crate is the primary entry point for users of recfile. It re-exports
//! the core types and functionality from the sub-crates and provides
//! convenient access to the storage backends.
//!
//! A store persists one JSON document of the shape
//! `{ "meta": { "name", "description" }, "data": { "<id>": <value> } }` and
//! exposes record-level operations over an auto-incrementing integer key
//! space: `create`, `insert`, `update`, `read`, `delete`, `list`,
//! `truncate`, `exists`. Every operation is a synchronous whole-document
//! read/transform/write cycle; there is no query language, no indexing and
//! no concurrency control beyond what the file system provides.
//!
//! # Quick Start
//!
//! ```ignore
//! use recfile::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> RecordStoreResult<()> {
//!     // Bind a store to a file; relative paths resolve against the
//!     // current working directory at construction time.
//!     let store = recfile::open("shop.json")?;
//!     store.create("shop", "items")?;
//!
//!     // Ids are assigned 0, 1, 2, ... reusing gaps left by deletes.
//!     let apple = store.insert(json!({ "name": "apple" }))?;
//!     let banana = store.insert(json!({ "name": "banana" }))?;
//!
//!     store.update(banana, json!({ "name": "cavendish" }))?;
//!     store.delete(apple)?;
//!
//!     for (id, value) in store.list()? {
//!         println!("{id}: {value}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error model
//!
//! Operations return typed errors ([`RecordStoreError`](error::RecordStoreError))
//! so callers can tell a missing store from a missing record from an I/O
//! failure. Alongside the returned errors, every operation emits an advisory
//! status line through an injectable [`DiagnosticSink`](diag::DiagnosticSink);
//! the default sink routes to `tracing`.
//!
//! # Backends
//!
//! - [`json`] - One pretty-printed JSON file on disk (the default)
//! - [`memory`] - Ephemeral in-memory storage (requires the `memory` feature)

pub mod prelude;

pub use recfile_core::{backend, diag, document, error, store};

use std::path::Path;

use recfile_core::{error::RecordStoreResult, store::RecordStore};
use recfile_json::JsonFileStore;

/// JSON-file storage backend implementations.
pub mod json {
    pub use recfile_json::{JsonFileStore, JsonFileStoreBuilder};
}

/// In-memory storage backend implementations.
///
/// This module is only available when the `memory` feature is enabled.
#[cfg(feature = "memory")]
pub mod memory {
    pub use recfile_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// Opens a record store backed by a JSON file at `path`.
///
/// This is shorthand for constructing a [`JsonFileStore`] and wrapping it in
/// a [`RecordStore`]. The file itself is not created until
/// [`create`](RecordStore::create) is called.
///
/// # Errors
///
/// Returns an I/O error if a relative `path` cannot be resolved against the
/// current working directory.
pub fn open(path: impl AsRef<Path>) -> RecordStoreResult<RecordStore<JsonFileStore>> {
    Ok(RecordStore::new(JsonFileStore::new(path)?))
}
