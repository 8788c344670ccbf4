//! Eval result persistence, keyed by config version and index build.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use sift_core::errors::SiftResult;
use sift_core::results::{Aggregate, QueryEval};

use crate::to_storage_err;

/// Persist one per-query metric row.
pub fn insert_query_eval(
    conn: &Connection,
    config_version: i64,
    build_id: &str,
    eval: &QueryEval,
) -> SiftResult<()> {
    let metrics = serde_json::to_string(eval).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO eval_results
         (config_version, build_id, query, is_aggregate, metrics_json, created_at)
         VALUES (?1, ?2, ?3, 0, ?4, ?5)",
        params![
            config_version,
            build_id,
            eval.query,
            metrics,
            Utc::now().to_rfc3339()
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Persist the aggregate row for one evaluation run.
pub fn insert_aggregate_eval(
    conn: &Connection,
    config_version: i64,
    build_id: &str,
    aggregate: &Aggregate,
) -> SiftResult<()> {
    let metrics =
        serde_json::to_string(aggregate).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO eval_results
         (config_version, build_id, query, is_aggregate, metrics_json, created_at)
         VALUES (?1, ?2, NULL, 1, ?3, ?4)",
        params![config_version, build_id, metrics, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// The most recent stored aggregate for a config version on a build.
pub fn latest_aggregate(
    conn: &Connection,
    config_version: i64,
    build_id: &str,
) -> SiftResult<Option<Aggregate>> {
    let metrics: Option<String> = conn
        .query_row(
            "SELECT metrics_json FROM eval_results
             WHERE config_version = ?1 AND build_id = ?2 AND is_aggregate = 1
             ORDER BY id DESC LIMIT 1",
            params![config_version, build_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match metrics {
        Some(json) => {
            let agg = serde_json::from_str(&json).map_err(|e| to_storage_err(e.to_string()))?;
            Ok(Some(agg))
        }
        None => Ok(None),
    }
}
