//! The persisted document model: store metadata plus the record table.
//!
//! A store holds exactly one [`Document`], read and written whole. Records
//! live in the `data` table keyed by non-negative integer ids; values are
//! arbitrary JSON. On disk the table is a JSON object whose keys are the ids
//! encoded as decimal strings, which is exactly what serde_json produces for
//! an integer-keyed map.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identifier of a record within a store's `data` table.
pub type RecordId = u64;

/// Human-readable metadata persisted alongside the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Name of the store.
    pub name: String,
    /// Free-form description of the store.
    pub description: String,
}

/// The whole persisted unit: metadata plus the record table.
///
/// Every store operation is a read of this document, an in-memory transform,
/// and a write of the transformed document. Nothing is cached between
/// operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store metadata; untouched by record-level operations.
    pub meta: Meta,
    /// The record table, keyed by id.
    pub data: BTreeMap<RecordId, Value>,
}

impl Document {
    /// Creates a document with the given metadata and an empty record table.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                name: name.into(),
                description: description.into(),
            },
            data: BTreeMap::new(),
        }
    }

    /// Returns the smallest non-negative id not present in the record table.
    ///
    /// Ids freed by deletes are reused: on `{0, 1}` this is 2, but after
    /// deleting 0 it is 0 again.
    pub fn first_free_id(&self) -> RecordId {
        let mut id = 0;
        while self.data.contains_key(&id) {
            id += 1;
        }
        id
    }
}
