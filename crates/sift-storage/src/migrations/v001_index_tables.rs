//! v001: chunks, postings, term_stats, corpus_stats, index_builds.

use rusqlite::Connection;

use sift_core::errors::SiftResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> SiftResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS chunks (
            id          TEXT PRIMARY KEY,
            doc_id      TEXT NOT NULL,
            seq         INTEGER NOT NULL,
            start_char  INTEGER NOT NULL,
            end_char    INTEGER NOT NULL,
            text        TEXT NOT NULL,
            token_len   INTEGER NOT NULL,
            embedding   BLOB
        );

        CREATE INDEX IF NOT EXISTS idx_chunks_doc ON chunks(doc_id);

        CREATE TABLE IF NOT EXISTS postings (
            term     TEXT NOT NULL,
            chunk_id TEXT NOT NULL,
            tf       REAL NOT NULL,
            PRIMARY KEY (term, chunk_id)
        ) WITHOUT ROWID;

        CREATE TABLE IF NOT EXISTS term_stats (
            term TEXT PRIMARY KEY,
            df   INTEGER NOT NULL
        ) WITHOUT ROWID;

        CREATE TABLE IF NOT EXISTS corpus_stats (
            id            INTEGER PRIMARY KEY CHECK (id = 1),
            total_chunks  INTEGER NOT NULL,
            avg_chunk_len REAL    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS index_builds (
            id                 TEXT PRIMARY KEY,
            corpus_fingerprint TEXT NOT NULL,
            chunk_count        INTEGER NOT NULL,
            posting_count      INTEGER NOT NULL,
            embedded           INTEGER NOT NULL DEFAULT 0,
            built_at           TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
