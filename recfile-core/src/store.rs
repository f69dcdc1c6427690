//! Record-level operations over a whole-document backend.
//!
//! This module provides the primary API for working with record stores.
//! [`RecordStore`] is generic over a [`StoreBackend`] and implements every
//! operation as a synchronous whole-document cycle: load the document,
//! transform it in memory, save it back. Nothing is cached between calls,
//! so concurrent stores bound to the same location race (last writer wins).
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
//! let id = store.insert(json!({ "name": "apple" }))?;
//! ```

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    backend::StoreBackend,
    diag::{DiagnosticSink, Severity, TracingSink},
    document::{Document, Meta, RecordId},
    error::{RecordStoreError, RecordStoreResult},
};

/// A record store bound to a specific backend implementation.
///
/// The store holds no document state of its own: every operation re-reads
/// the persisted document from the backend and writes the whole transformed
/// document back. The only state carried across calls is the backend handle
/// and the diagnostic sink.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
///
/// # Example
///
/// ```ignore
/// let store = RecordStore::new(my_backend);
/// store.create("shop", "items")?;
/// ```
#[derive(Debug)]
pub struct RecordStore<B: StoreBackend> {
    backend: B,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<B: StoreBackend> RecordStore<B> {
    /// Creates a new record store with the given backend.
    ///
    /// Diagnostics go to the default [`TracingSink`].
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Creates a new record store with the given backend and diagnostic sink.
    ///
    /// Diagnostics are advisory only; swapping the sink never changes the
    /// outcome of any operation.
    pub fn with_diagnostics(backend: B, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            backend,
            diagnostics,
        }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates the persisted document with the given metadata and an empty record table.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::AlreadyExists`] if a document already
    /// exists at the backend's location; the existing document is left
    /// untouched.
    pub fn create(&self, name: &str, description: &str) -> RecordStoreResult<()> {
        let document = Document::new(name, description);

        match self.backend.create(&document) {
            Ok(()) => {
                self.report(
                    Severity::Success,
                    format!("Store '{}' created at {}.", name, self.backend.location()),
                );
                Ok(())
            }
            Err(err @ RecordStoreError::AlreadyExists(_)) => {
                self.report(Severity::Fatal, format!("Store '{}' already exists.", name));
                Err(err)
            }
            Err(err) => {
                self.report(
                    Severity::Fatal,
                    format!("Failed to create store '{}': {}", name, err),
                );
                Err(err)
            }
        }
    }

    /// Inserts a record under the first unused id, scanning 0, 1, 2, … in order.
    ///
    /// Ids freed by deletes are reused. The store must already exist; insert
    /// never creates it.
    ///
    /// # Returns
    ///
    /// The id the record was written under.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] if the store does not exist,
    /// or a serialization/I/O error if the cycle fails. No record is written
    /// on any error path.
    pub fn insert(&self, value: impl Serialize) -> RecordStoreResult<RecordId> {
        let value = self.to_json(value)?;
        self.insert_value(None, value)
    }

    /// Inserts a record under `id` if unused, or under the first unused id otherwise.
    ///
    /// An occupied `id` is not an error: the existing record is never
    /// overwritten. Instead a warning diagnostic is emitted and the record
    /// is written under the first unused id, exactly as [`insert`] would
    /// assign it.
    ///
    /// # Returns
    ///
    /// The id the record was actually written under, which on a collision
    /// differs from the requested `id`.
    ///
    /// [`insert`]: RecordStore::insert
    pub fn insert_with_id(&self, id: RecordId, value: impl Serialize) -> RecordStoreResult<RecordId> {
        let value = self.to_json(value)?;
        self.insert_value(Some(id), value)
    }

    /// Replaces the value of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::RecordNotFound`] if `id` is absent; the
    /// persisted document is left unchanged.
    pub fn update(&self, id: RecordId, value: impl Serialize) -> RecordStoreResult<()> {
        let value = self.to_json(value)?;
        let mut document = self.load()?;

        if !document.data.contains_key(&id) {
            return Err(self.missing_record(id));
        }
        document.data.insert(id, value);

        self.persist(
            &document,
            format!("Wrote record {} to store at {}.", id, self.backend.location()),
            "Failed to write record",
        )
    }

    /// Reads the value of a record. No write is performed.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::RecordNotFound`] if `id` is absent.
    pub fn read(&self, id: RecordId) -> RecordStoreResult<Value> {
        let document = self.load()?;

        match document.data.get(&id) {
            Some(value) => Ok(value.clone()),
            None => Err(self.missing_record(id)),
        }
    }

    /// Reads a record and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Serialization`] if the stored value does
    /// not deserialize into `T`.
    pub fn read_as<T: DeserializeOwned>(&self, id: RecordId) -> RecordStoreResult<T> {
        let value = self.read(id)?;

        match serde_json::from_value(value) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.report(
                    Severity::Fatal,
                    format!("Failed to deserialize record {}: {}", id, err),
                );
                Err(err.into())
            }
        }
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::RecordNotFound`] if `id` is absent.
    pub fn delete(&self, id: RecordId) -> RecordStoreResult<()> {
        let mut document = self.load()?;

        if document.data.remove(&id).is_none() {
            return Err(self.missing_record(id));
        }

        self.persist(
            &document,
            format!(
                "Deleted record {} from store at {}.",
                id,
                self.backend.location()
            ),
            "Failed to delete record",
        )
    }

    /// Returns the full record table.
    pub fn list(&self) -> RecordStoreResult<BTreeMap<RecordId, Value>> {
        Ok(self.load()?.data)
    }

    /// Replaces the record table with an empty one. Metadata is unchanged.
    pub fn truncate(&self) -> RecordStoreResult<()> {
        let mut document = self.load()?;
        document.data.clear();

        self.persist(
            &document,
            format!("Cleared store at {}.", self.backend.location()),
            "Failed to clear store",
        )
    }

    /// Reports whether the persisted document exists.
    ///
    /// This is a pure existence check; the document is never parsed.
    pub fn exists(&self) -> bool {
        self.backend.exists()
    }

    /// Returns the stored metadata.
    pub fn meta(&self) -> RecordStoreResult<Meta> {
        Ok(self.load()?.meta)
    }

    fn insert_value(&self, requested: Option<RecordId>, value: Value) -> RecordStoreResult<RecordId> {
        let mut document = self.load()?;

        let id = match requested {
            Some(id) if !document.data.contains_key(&id) => id,
            Some(id) => {
                self.report(
                    Severity::Warning,
                    format!(
                        "Id {} already exists in store at {}. Will use next available id.",
                        id,
                        self.backend.location()
                    ),
                );
                document.first_free_id()
            }
            None => document.first_free_id(),
        };
        document.data.insert(id, value);

        self.persist(
            &document,
            format!(
                "Appended record {} to store at {}.",
                id,
                self.backend.location()
            ),
            "Failed to append record",
        )?;

        Ok(id)
    }

    fn to_json(&self, value: impl Serialize) -> RecordStoreResult<Value> {
        match serde_json::to_value(value) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.report(
                    Severity::Fatal,
                    format!("Failed to serialize record value: {}", err),
                );
                Err(err.into())
            }
        }
    }

    fn load(&self) -> RecordStoreResult<Document> {
        match self.backend.load() {
            Ok(document) => Ok(document),
            Err(err @ RecordStoreError::NotFound(_)) => {
                self.report(
                    Severity::Fatal,
                    format!("Store at {} does not exist.", self.backend.location()),
                );
                Err(err)
            }
            Err(err) => {
                self.report(
                    Severity::Fatal,
                    format!(
                        "Failed to read store at {}: {}",
                        self.backend.location(),
                        err
                    ),
                );
                Err(err)
            }
        }
    }

    fn persist(
        &self,
        document: &Document,
        success: String,
        failure: &str,
    ) -> RecordStoreResult<()> {
        match self.backend.save(document) {
            Ok(()) => {
                self.report(Severity::Success, success);
                Ok(())
            }
            Err(err) => {
                self.report(
                    Severity::Fatal,
                    format!(
                        "{} in store at {}: {}",
                        failure,
                        self.backend.location(),
                        err
                    ),
                );
                Err(err)
            }
        }
    }

    fn missing_record(&self, id: RecordId) -> RecordStoreError {
        self.report(
            Severity::Error,
            format!(
                "Id {} does not exist in store at {}.",
                id,
                self.backend.location()
            ),
        );
        RecordStoreError::RecordNotFound(id, self.backend.location())
    }

    fn report(&self, severity: Severity, message: impl AsRef<str>) {
        self.diagnostics.emit(severity, message.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Backend over a shared in-process slot, with an optional save failure
    /// switch for exercising the I/O error paths.
    #[derive(Debug, Default, Clone)]
    struct TestBackend {
        slot: Arc<Mutex<Option<Document>>>,
        fail_saves: bool,
    }

    impl TestBackend {
        fn new() -> Self {
            Self::default()
        }

        fn failing_saves(self) -> Self {
            Self {
                fail_saves: true,
                ..self
            }
        }
    }

    impl StoreBackend for TestBackend {
        fn location(&self) -> String {
            "<test>".to_string()
        }

        fn exists(&self) -> bool {
            self.slot.lock().unwrap().is_some()
        }

        fn create(&self, document: &Document) -> RecordStoreResult<()> {
            let mut slot = self.slot.lock().unwrap();
            if slot.is_some() {
                return Err(RecordStoreError::AlreadyExists(self.location()));
            }
            *slot = Some(document.clone());
            Ok(())
        }

        fn load(&self) -> RecordStoreResult<Document> {
            self.slot
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| RecordStoreError::NotFound(self.location()))
        }

        fn save(&self, document: &Document) -> RecordStoreResult<()> {
            if self.fail_saves {
                return Err(RecordStoreError::Io("disk full".to_string()));
            }
            *self.slot.lock().unwrap() = Some(document.clone());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<(Severity, String)> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn emit(&self, severity: Severity, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    fn store() -> RecordStore<TestBackend> {
        let store = RecordStore::new(TestBackend::new());
        store.create("shop", "items").unwrap();
        store
    }

    #[test]
    fn test_create_twice_fails() {
        let store = RecordStore::new(TestBackend::new());
        assert!(!store.exists());

        store.create("shop", "items").unwrap();
        assert!(store.exists());

        let err = store.create("shop", "items").unwrap_err();
        assert!(matches!(err, RecordStoreError::AlreadyExists(_)));
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = store();
        assert_eq!(store.insert("a").unwrap(), 0);
        assert_eq!(store.insert("b").unwrap(), 1);
        assert_eq!(store.insert("c").unwrap(), 2);
    }

    #[test]
    fn test_insert_requires_existing_store() {
        let store = RecordStore::new(TestBackend::new());
        let err = store.insert("a").unwrap_err();
        assert!(matches!(err, RecordStoreError::NotFound(_)));
        assert!(!store.exists());
    }

    #[test]
    fn test_insert_with_unused_id_is_honored() {
        let store = store();
        assert_eq!(store.insert_with_id(5, "e").unwrap(), 5);
        assert_eq!(store.read(5).unwrap(), Value::from("e"));
    }

    #[test]
    fn test_insert_collision_remaps_and_warns() {
        let sink = Arc::new(RecordingSink::default());
        let store = RecordStore::with_diagnostics(TestBackend::new(), sink.clone());
        store.create("shop", "items").unwrap();

        store.insert_with_id(0, "original").unwrap();
        let id = store.insert_with_id(0, "collider").unwrap();

        // The occupied id is never overwritten; the record lands on the
        // first free id, which is what the call returns.
        assert_eq!(id, 1);
        assert_eq!(store.read(0).unwrap(), Value::from("original"));
        assert_eq!(store.read(1).unwrap(), Value::from("collider"));

        let warnings: Vec<_> = sink
            .lines()
            .into_iter()
            .filter(|(severity, _)| *severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].1.contains("next available id"));
    }

    #[test]
    fn test_insert_reuses_deleted_ids() {
        let store = store();
        store.insert("a").unwrap();
        store.insert("b").unwrap();
        store.delete(0).unwrap();

        assert_eq!(store.insert("c").unwrap(), 0);
    }

    #[test]
    fn test_update_replaces_value() {
        let store = store();
        let id = store.insert("before").unwrap();

        store.update(id, "after").unwrap();
        assert_eq!(store.read(id).unwrap(), Value::from("after"));
    }

    #[test]
    fn test_update_absent_id_changes_nothing() {
        let store = store();
        store.insert("a").unwrap();

        let err = store.update(7, "x").unwrap_err();
        assert!(matches!(err, RecordStoreError::RecordNotFound(7, _)));
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.read(0).unwrap(), Value::from("a"));
    }

    #[test]
    fn test_delete_removes_record() {
        let store = store();
        let id = store.insert("a").unwrap();

        store.delete(id).unwrap();
        assert!(matches!(
            store.read(id).unwrap_err(),
            RecordStoreError::RecordNotFound(..)
        ));
        assert!(!store.list().unwrap().contains_key(&id));
    }

    #[test]
    fn test_truncate_clears_records_keeps_meta() {
        let store = store();
        store.insert("a").unwrap();
        store.insert("b").unwrap();

        store.truncate().unwrap();
        assert!(store.list().unwrap().is_empty());

        let meta = store.meta().unwrap();
        assert_eq!(meta.name, "shop");
        assert_eq!(meta.description, "items");
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let backend = TestBackend::new();
        RecordStore::new(backend.clone())
            .create("shop", "items")
            .unwrap();

        let store = RecordStore::new(backend.clone().failing_saves());
        let err = store.insert("a").unwrap_err();
        assert!(matches!(err, RecordStoreError::Io(_)));

        // The slot still holds the pre-insert document.
        assert!(RecordStore::new(backend).list().unwrap().is_empty());
    }

    #[test]
    fn test_read_as_deserializes() {
        let store = store();
        let id = store.insert(vec![1u32, 2, 3]).unwrap();

        let values: Vec<u32> = store.read_as(id).unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let err = store.read_as::<String>(id).unwrap_err();
        assert!(matches!(err, RecordStoreError::Serialization(_)));
    }
}
