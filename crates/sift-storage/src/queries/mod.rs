//! Query modules: free functions over `&Connection`, one file per concern.

pub mod chunk_ops;
pub mod config_ops;
pub mod eval_ops;
pub mod index_ops;

use chrono::{DateTime, Utc};

/// Parse a stored RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(
    idx: usize,
    s: &str,
) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
