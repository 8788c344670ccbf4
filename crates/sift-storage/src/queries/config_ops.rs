//! Configuration version storage and the active-pointer CAS.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use sift_core::config::SearchConfig;
use sift_core::errors::{DeployError, SiftError, SiftResult};
use sift_core::results::ConfigVersion;

use crate::to_storage_err;

/// Store a new immutable config version; returns the version number.
pub fn insert_config(conn: &Connection, config: &SearchConfig) -> SiftResult<i64> {
    let json = config
        .to_json()
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO config_versions (name, config_json, created_at) VALUES (?1, ?2, ?3)",
        params![config.name, json, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Fetch one stored config version.
pub fn get_config(conn: &Connection, version: i64) -> SiftResult<Option<ConfigVersion>> {
    conn.query_row(
        "SELECT version, name, config_json, created_at
         FROM config_versions WHERE version = ?1",
        params![version],
        config_from_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// The currently active configuration, if one has been promoted.
pub fn active_config(conn: &Connection) -> SiftResult<Option<ConfigVersion>> {
    conn.query_row(
        "SELECT cv.version, cv.name, cv.config_json, cv.created_at
         FROM active_config ac JOIN config_versions cv ON cv.version = ac.version
         WHERE ac.id = 1",
        [],
        config_from_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Compare-and-swap the active pointer inside one transaction.
///
/// Promotes `version` only if the current active version still equals
/// `expected` (`None` = no config active yet). A mismatch leaves the
/// pointer untouched and reports a conflict.
pub fn promote_config(
    conn: &mut Connection,
    version: i64,
    expected: Option<i64>,
) -> SiftResult<()> {
    let tx = conn
        .transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let current: Option<i64> = tx
        .query_row("SELECT version FROM active_config WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    if current != expected {
        return Err(SiftError::Deploy(DeployError::Conflict { expected }));
    }

    tx.execute(
        "INSERT OR REPLACE INTO active_config (id, version, activated_at)
         VALUES (1, ?1, ?2)",
        params![version, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    info!(version, "configuration promoted to active");
    Ok(())
}

fn config_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConfigVersion> {
    let json: String = row.get(2)?;
    let created_at: String = row.get(3)?;
    let config = SearchConfig::from_json(&json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(ConfigVersion {
        version: row.get(0)?,
        name: row.get(1)?,
        config,
        created_at: super::parse_timestamp(3, &created_at)?,
    })
}
