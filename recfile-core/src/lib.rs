//! A minimal single-file JSON record store: one persisted document, record-level CRUD.
//!
//! This crate is the core of the recfile project and provides:
//!
//! - **Document model** ([`document`]) - The persisted unit: metadata plus the record table
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing different storage backends
//! - **Record store** ([`store`]) - Record-level operations over a whole-document backend
//! - **Diagnostics** ([`diag`]) - Advisory status reporting through an injectable sink
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use recfile_core::store::RecordStore;
//! use recfile_json::JsonFileStore;
//! use serde_json::json;
//!
//! let store = RecordStore::new(JsonFileStore::new("shop.json")?);
//! store.create("shop", "items")?;
//!
//! let id = store.insert(json!({ "name": "apple" }))?;
//! assert_eq!(store.read(id)?, json!({ "name": "apple" }));
//! ```

#[allow(unused_extern_crates)]
extern crate self as recfile_core;

pub mod backend;
pub mod diag;
pub mod document;
pub mod error;
pub mod store;
