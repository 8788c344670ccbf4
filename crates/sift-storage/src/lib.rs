//! # sift-storage
//!
//! SQLite persistence for the Sift index: chunks, postings, term/corpus
//! stats, embeddings, configuration versions, and eval results.
//! Single write connection + read pool over WAL; index replacement and
//! config promotion are single transactions.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StoreEngine;

use sift_core::errors::{SiftError, StorageError};

/// Wrap a low-level SQLite error message into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> SiftError {
    SiftError::Storage(StorageError::SqliteError { message })
}
