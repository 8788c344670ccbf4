//! Versioned schema migrations, tracked via `PRAGMA user_version`.

mod v001_index_tables;
mod v002_config_tables;
mod v003_eval_tables;

use rusqlite::Connection;
use tracing::info;

use sift_core::errors::{SiftError, SiftResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> SiftResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_index_tables::migrate),
    (2, v002_config_tables::migrate),
    (3, v003_eval_tables::migrate),
];

/// Run all pending migrations against the write connection.
pub fn run_migrations(conn: &Connection) -> SiftResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            SiftError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        info!(version, "applied schema migration");
    }

    Ok(())
}
