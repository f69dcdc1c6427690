//! Error types and result types for record store operations.
//!
//! This module provides error handling for all record store operations.
//! Use [`RecordStoreResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;

use crate::document::RecordId;

/// Represents all possible errors that can occur when interacting with a record store.
///
/// This enum covers serialization errors, the store lifecycle, record lookup,
/// and backend I/O failures. An id collision on insert is deliberately *not*
/// an error: the store remaps to the next free id and emits a warning
/// diagnostic instead.
#[derive(Error, Debug)]
pub enum RecordStoreError {
    /// Serialization/deserialization error when converting between record values and JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during backend construction or builder misuse.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A store already exists at the given location, so `create` refused to overwrite it.
    #[error("Store already exists at {0}")]
    AlreadyExists(String),
    /// No store exists at the given location; only `create` may run against a missing store.
    #[error("Store does not exist at {0}")]
    NotFound(String),
    /// The requested record id is not present in the store.
    /// The first argument is the record id, the second is the store location.
    #[error("Record {0} not found in store at {1}")]
    RecordNotFound(RecordId, String),
    /// An I/O error occurred while reading or writing the persisted document.
    #[error("I/O error: {0}")]
    Io(String),
}

/// A specialized `Result` type for record store operations.
///
/// This type alias is used throughout the crate to indicate operations that may fail
/// with a [`RecordStoreError`].
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

impl From<SerdeJsonError> for RecordStoreError {
    fn from(err: SerdeJsonError) -> Self {
        RecordStoreError::Serialization(err.to_string())
    }
}

impl From<IoError> for RecordStoreError {
    fn from(err: IoError) -> Self {
        RecordStoreError::Io(err.to_string())
    }
}
