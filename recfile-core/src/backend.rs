//! Storage backend abstraction for the record store.
//!
//! This module defines the traits that abstract over different persistence
//! media, allowing the record store to work with various backends (a JSON
//! file on disk, an in-memory slot, etc.).
//!
//! # Overview
//!
//! A backend persists exactly one [`Document`] and knows nothing about
//! records: the [`StoreBackend`] trait exposes whole-document load and save
//! plus an existence check, and every record-level operation in
//! [`RecordStore`](crate::store::RecordStore) is built as a
//! load/transform/save cycle on top of it. Each call stands alone; backends
//! hold no document state between calls.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use recfile_core::backend::StoreBackend;
//! use recfile_core::document::Document;
//!
//! // Use a concrete backend implementation
//! let backend = MyBackendImpl::new();
//!
//! backend.create(&Document::new("shop", "items"))?;
//! let document = backend.load()?;
//! # Ok::<(), recfile_core::error::RecordStoreError>(())
//! ```

use std::fmt::Debug;

use crate::{document::Document, error::RecordStoreResult};

/// Abstract interface for whole-document storage backends.
///
/// Implementers of this trait provide a concrete home for the persisted
/// document, from a single file on disk to an in-memory slot. The record
/// store never partially updates a backend: it always loads the whole
/// document and saves a whole replacement.
///
/// # Concurrency
///
/// Load and save are not mutually exclusive across handles: two concurrent
/// read-modify-write cycles against the same location race, and the last
/// writer wins. Implementations must not corrupt the stored document under
/// such races, but lost updates are accepted behavior.
///
/// # Error Handling
///
/// Operations return [`RecordStoreResult<T>`](crate::error::RecordStoreResult).
/// Implementers should map a missing document to
/// [`RecordStoreError::NotFound`](crate::error::RecordStoreError::NotFound)
/// and unparsable contents to
/// [`RecordStoreError::Serialization`](crate::error::RecordStoreError::Serialization).
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns a human-readable location of the persisted document.
    ///
    /// Used in diagnostics and error values (e.g. the file path for a
    /// file-backed store).
    fn location(&self) -> String;

    /// Reports whether a document has been created at this backend's location.
    ///
    /// This is a pure existence check; the document is not read or parsed.
    fn exists(&self) -> bool;

    /// Persists a brand-new document.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyExists`](crate::error::RecordStoreError::AlreadyExists)
    /// if a document is already present at the location, leaving it untouched.
    fn create(&self, document: &Document) -> RecordStoreResult<()>;

    /// Loads the current document in full.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](crate::error::RecordStoreError::NotFound) if no
    /// document exists at the location, or
    /// [`Serialization`](crate::error::RecordStoreError::Serialization) if
    /// the stored bytes do not parse.
    fn load(&self) -> RecordStoreResult<Document>;

    /// Replaces the persisted document in full.
    ///
    /// If the document vanished between a load and this save (an external
    /// delete under the racy concurrency contract), the save recreates it.
    fn save(&self, document: &Document) -> RecordStoreResult<()>;
}

impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    fn location(&self) -> String {
        (*self).location()
    }

    fn exists(&self) -> bool {
        (*self).exists()
    }

    fn create(&self, document: &Document) -> RecordStoreResult<()> {
        (*self).create(document)
    }

    fn load(&self) -> RecordStoreResult<Document> {
        (*self).load()
    }

    fn save(&self, document: &Document) -> RecordStoreResult<()> {
        (*self).save(document)
    }
}

impl StoreBackend for Box<dyn StoreBackend> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn create(&self, document: &Document) -> RecordStoreResult<()> {
        (**self).create(document)
    }

    fn load(&self) -> RecordStoreResult<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> RecordStoreResult<()> {
        (**self).save(document)
    }
}

/// Factory trait for constructing backend instances.
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    fn build(self) -> RecordStoreResult<Self::Backend>;
}
