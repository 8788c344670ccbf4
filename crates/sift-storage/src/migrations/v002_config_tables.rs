//! v002: config_versions and the single-row active_config pointer.

use rusqlite::Connection;

use sift_core::errors::SiftResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SiftResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS config_versions (
            version     INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            config_json TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS active_config (
            id           INTEGER PRIMARY KEY CHECK (id = 1),
            version      INTEGER NOT NULL REFERENCES config_versions(version),
            activated_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
