//! v003: eval_results, tagged with config version and index build.

use rusqlite::Connection;

use sift_core::errors::SiftResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SiftResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS eval_results (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            config_version INTEGER NOT NULL REFERENCES config_versions(version),
            build_id       TEXT NOT NULL REFERENCES index_builds(id),
            query          TEXT,
            is_aggregate   INTEGER NOT NULL DEFAULT 0,
            metrics_json   TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_eval_config_build
            ON eval_results(config_version, build_id, is_aggregate);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
