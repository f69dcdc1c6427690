//! In-memory storage implementation for record stores.

use parking_lot::RwLock;
use std::sync::Arc;

use recfile_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    error::{RecordStoreError, RecordStoreResult},
};

/// Thread-safe in-memory storage backend.
///
/// The whole document lives in an `Arc`-shared slot behind a read-write
/// lock, so clones of the same instance operate on the same store. An empty
/// slot behaves exactly like a missing file: every operation except `create`
/// fails with `NotFound` until the document is created.
///
/// # Example
///
/// ```ignore
/// use recfile_memory::InMemoryStore;
/// use recfile_core::backend::StoreBackend;
/// use recfile_core::document::Document;
///
/// let backend = InMemoryStore::new();
/// assert!(!backend.exists());
///
/// backend.create(&Document::new("scratch", "ephemeral records"))?;
/// assert!(backend.exists());
/// # Ok::<(), recfile_core::error::RecordStoreError>(())
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    document: Arc<RwLock<Option<Document>>>,
}

impl InMemoryStore {
    /// Creates a new backend with no document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

impl StoreBackend for InMemoryStore {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn exists(&self) -> bool {
        self.document.read().is_some()
    }

    fn create(&self, document: &Document) -> RecordStoreResult<()> {
        let mut slot = self.document.write();

        if slot.is_some() {
            return Err(RecordStoreError::AlreadyExists(self.location()));
        }
        *slot = Some(document.clone());

        Ok(())
    }

    fn load(&self) -> RecordStoreResult<Document> {
        self.document
            .read()
            .clone()
            .ok_or_else(|| RecordStoreError::NotFound(self.location()))
    }

    fn save(&self, document: &Document) -> RecordStoreResult<()> {
        *self.document.write() = Some(document.clone());

        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    fn build(self) -> RecordStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_slot_behaves_like_missing_file() {
        let backend = InMemoryStore::new();

        assert!(!backend.exists());
        assert!(matches!(
            backend.load().unwrap_err(),
            RecordStoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_create_twice_fails() {
        let backend = InMemoryStore::new();

        backend.create(&Document::new("scratch", "a")).unwrap();
        let err = backend.create(&Document::new("scratch", "b")).unwrap_err();

        assert!(matches!(err, RecordStoreError::AlreadyExists(_)));
        assert_eq!(backend.load().unwrap().meta.description, "a");
    }

    #[test]
    fn test_clones_share_the_document() {
        let backend = InMemoryStore::new();
        let other = backend.clone();

        backend.create(&Document::new("scratch", "shared")).unwrap();

        let mut document = other.load().unwrap();
        document.data.insert(0, json!("apple"));
        other.save(&document).unwrap();

        assert_eq!(backend.load().unwrap().data[&0], json!("apple"));
    }

    #[test]
    fn test_builder_builds() {
        let backend = InMemoryStore::builder().build().unwrap();
        assert!(!backend.exists());
    }
}
