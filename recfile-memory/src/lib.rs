//! In-memory storage backend for recfile.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `StoreBackend` trait. It holds the whole document behind a read-write
//! lock and is ideal for tests and ephemeral stores that never touch disk.
//!
//! # Quick Start
//!
//! ```ignore
//! use recfile_core::store::RecordStore;
//! use recfile_memory::InMemoryStore;
//! use serde_json::json;
//!
//! let store = RecordStore::new(InMemoryStore::new());
//! store.create("scratch", "ephemeral records")?;
//!
//! let id = store.insert(json!({ "name": "apple" }))?;
//! # Ok::<(), recfile_core::error::RecordStoreError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as recfile_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
