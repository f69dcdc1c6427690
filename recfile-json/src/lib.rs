//! Single-file JSON storage backend for recfile.
//!
//! This crate provides the primary implementation of the `StoreBackend`
//! trait: the whole document lives in one pretty-printed JSON file on disk.
//! Every operation is a blocking whole-file read or write; no file handle is
//! held open between calls.
//!
//! # Features
//!
//! - **Human-readable files** - UTF-8, pretty-printed JSON with 2-space indent
//! - **Atomic creation** - `create` refuses to overwrite an existing file
//! - **Crash-safe saves** - Writes go to a sibling temp file renamed over the target
//!
//! # Quick Start
//!
//! ```ignore
//! use recfile_core::store::RecordStore;
//! use recfile_json::JsonFileStore;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RecordStore::new(JsonFileStore::new("shop.json")?);
//!     store.create("shop", "items")?;
//!
//!     let id = store.insert(json!({ "name": "apple" }))?;
//!     println!("inserted record {id}");
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recfile_json;

pub mod store;

pub use store::{JsonFileStore, JsonFileStoreBuilder};
