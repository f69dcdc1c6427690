//! File-backed storage implementation for record stores.
//!
//! This module provides a backend that persists the whole document as one
//! pretty-printed JSON file. The file is opened, read or written, and closed
//! on every call; nothing is cached in the handle beyond the resolved path.

use std::{
    env, fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use recfile_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    error::{RecordStoreError, RecordStoreResult},
};

/// Backend persisting the document as a single JSON file on disk.
///
/// The on-disk shape is UTF-8, pretty-printed JSON with 2-space indent:
///
/// ```json
/// {
///   "meta": { "name": "shop", "description": "items" },
///   "data": { "0": { "name": "apple" } }
/// }
/// ```
///
/// # Concurrency
///
/// No locking, no optimistic-concurrency token. Two handles bound to the
/// same path race: interleaved read-modify-write cycles can lose updates
/// (last writer wins). Saves rename a fully-written temp file over the
/// target, so a crash mid-write never leaves a truncated document behind.
///
/// # Example
///
/// ```ignore
/// use recfile_json::JsonFileStore;
/// use recfile_core::backend::StoreBackend;
/// use recfile_core::document::Document;
///
/// let backend = JsonFileStore::new("shop.json")?;
/// backend.create(&Document::new("shop", "items"))?;
/// assert!(backend.exists());
/// # Ok::<(), recfile_core::error::RecordStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Absolute path of the backing file, resolved at construction time.
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a backend bound to `path`.
    ///
    /// A relative path is resolved against the process's current working
    /// directory at construction time; later directory changes do not move
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the current working directory cannot be
    /// determined while resolving a relative path.
    pub fn new(path: impl AsRef<Path>) -> RecordStoreResult<Self> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };

        Ok(Self { path })
    }

    /// Returns the resolved path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates a builder for constructing a `JsonFileStore`.
    pub fn builder() -> JsonFileStoreBuilder {
        JsonFileStoreBuilder::default()
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn render(document: &Document) -> RecordStoreResult<String> {
        Ok(serde_json::to_string_pretty(document)?)
    }
}

impl StoreBackend for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn create(&self, document: &Document) -> RecordStoreResult<()> {
        let rendered = Self::render(document)?;

        // create_new makes the exists-check and the creation one atomic
        // step, so a concurrent create cannot clobber the winner's file.
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(rendered.as_bytes())?;
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                Err(RecordStoreError::AlreadyExists(self.location()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn load(&self) -> RecordStoreResult<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(RecordStoreError::NotFound(self.location()));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, document: &Document) -> RecordStoreResult<()> {
        let rendered = Self::render(document)?;
        let temp = self.temp_path();

        fs::write(&temp, rendered)?;
        fs::rename(&temp, &self.path)?;

        Ok(())
    }
}

/// Builder for constructing [`JsonFileStore`] instances.
///
/// # Example
///
/// ```ignore
/// use recfile_json::JsonFileStore;
/// use recfile_core::backend::StoreBackendBuilder;
///
/// let backend = JsonFileStore::builder().path("shop.json").build()?;
/// # Ok::<(), recfile_core::error::RecordStoreError>(())
/// ```
#[derive(Debug, Default)]
pub struct JsonFileStoreBuilder {
    path: Option<PathBuf>,
}

impl JsonFileStoreBuilder {
    /// Sets the path of the backing file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl StoreBackendBuilder for JsonFileStoreBuilder {
    type Backend = JsonFileStore;

    fn build(self) -> RecordStoreResult<Self::Backend> {
        let path = self.path.ok_or_else(|| {
            RecordStoreError::Initialization("no path configured for JsonFileStore".to_string())
        })?;

        JsonFileStore::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn backend_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("store.json")).unwrap()
    }

    #[test]
    fn test_new_resolves_relative_paths() {
        let backend = JsonFileStore::new("store.json").unwrap();
        assert!(backend.path().is_absolute());
        assert!(backend.path().ends_with("store.json"));
    }

    #[test]
    fn test_create_writes_pretty_json() {
        let dir = tempdir().unwrap();
        let backend = backend_in(&dir);

        backend.create(&Document::new("shop", "items")).unwrap();

        let raw = fs::read_to_string(backend.path()).unwrap();
        assert!(raw.contains("\n  \"meta\""));
        assert!(raw.contains("\"data\": {}"));
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let backend = backend_in(&dir);

        backend.create(&Document::new("first", "one")).unwrap();
        let before = fs::read(backend.path()).unwrap();

        let err = backend
            .create(&Document::new("second", "two"))
            .unwrap_err();
        assert!(matches!(err, RecordStoreError::AlreadyExists(_)));

        // The losing create leaves the winner byte-for-byte unchanged.
        assert_eq!(fs::read(backend.path()).unwrap(), before);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let backend = backend_in(&dir);

        assert!(!backend.exists());
        let err = backend.load().unwrap_err();
        assert!(matches!(err, RecordStoreError::NotFound(_)));
    }

    #[test]
    fn test_load_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let backend = backend_in(&dir);

        fs::write(backend.path(), "{ not json").unwrap();

        let err = backend.load().unwrap_err();
        assert!(matches!(err, RecordStoreError::Serialization(_)));
    }

    #[test]
    fn test_save_round_trips_document() {
        let dir = tempdir().unwrap();
        let backend = backend_in(&dir);

        backend.create(&Document::new("shop", "items")).unwrap();

        let mut document = backend.load().unwrap();
        document.data.insert(0, json!({ "name": "apple" }));
        backend.save(&document).unwrap();

        assert_eq!(backend.load().unwrap(), document);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let backend = backend_in(&dir);

        backend.create(&Document::new("shop", "items")).unwrap();
        backend.save(&Document::new("shop", "items")).unwrap();

        assert!(backend.path().exists());
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn test_builder_requires_path() {
        let err = JsonFileStore::builder().build().unwrap_err();
        assert!(matches!(err, RecordStoreError::Initialization(_)));

        let dir = tempdir().unwrap();
        let backend = JsonFileStore::builder()
            .path(dir.path().join("store.json"))
            .build()
            .unwrap();
        assert!(!backend.exists());
    }
}
