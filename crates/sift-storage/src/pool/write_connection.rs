//! The single write connection, serialized behind a mutex.
//!
//! All mutations (index replacement, config promotion, eval inserts) go
//! through here, which also makes promotion mutually exclusive with itself.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use sift_core::errors::{SiftError, SiftResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Owns the one connection allowed to write.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> SiftResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> SiftResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> SiftResult<T>
    where
        F: FnOnce(&mut Connection) -> SiftResult<T>,
    {
        let mut guard = self.conn.lock().map_err(|e| {
            SiftError::Storage(StorageError::PoolPoisoned {
                details: e.to_string(),
            })
        })?;
        f(&mut guard)
    }
}
