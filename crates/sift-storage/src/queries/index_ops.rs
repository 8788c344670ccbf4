//! Index build replacement and lexical-statistics reads.

use std::collections::HashMap;

use rusqlite::{params, Connection};
use tracing::info;

use sift_core::errors::SiftResult;
use sift_core::index::{Chunk, CorpusStats, IndexBuild, Posting, TermStat};

use super::chunk_ops::f32_vec_to_bytes;
use crate::to_storage_err;

/// Replace the entire index inside one transaction.
///
/// Deletes all derived tables, inserts the new build, and appends the
/// index_builds row. Readers on WAL snapshots see either the old or the
/// new build in full.
pub fn replace_index(
    conn: &mut Connection,
    chunks: &[Chunk],
    embeddings: Option<&[Vec<f32>]>,
    postings: &[Posting],
    term_stats: &[TermStat],
    corpus: &CorpusStats,
    build: &IndexBuild,
) -> SiftResult<()> {
    let tx = conn
        .transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;

    tx.execute_batch(
        "DELETE FROM chunks;
         DELETE FROM postings;
         DELETE FROM term_stats;",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO chunks
                 (id, doc_id, seq, start_char, end_char, text, token_len, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for (i, chunk) in chunks.iter().enumerate() {
            let blob = embeddings.map(|embs| f32_vec_to_bytes(&embs[i]));
            stmt.execute(params![
                chunk.id,
                chunk.doc_id,
                chunk.seq,
                chunk.start as i64,
                chunk.end as i64,
                chunk.text,
                chunk.token_len as i64,
                blob,
            ])
            .map_err(|e| to_storage_err(e.to_string()))?;
        }

        let mut stmt = tx
            .prepare("INSERT INTO postings (term, chunk_id, tf) VALUES (?1, ?2, ?3)")
            .map_err(|e| to_storage_err(e.to_string()))?;
        for posting in postings {
            stmt.execute(params![posting.term, posting.chunk_id, posting.tf])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }

        let mut stmt = tx
            .prepare("INSERT INTO term_stats (term, df) VALUES (?1, ?2)")
            .map_err(|e| to_storage_err(e.to_string()))?;
        for stat in term_stats {
            stmt.execute(params![stat.term, stat.df as i64])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }

    tx.execute(
        "INSERT OR REPLACE INTO corpus_stats (id, total_chunks, avg_chunk_len)
         VALUES (1, ?1, ?2)",
        params![corpus.total_chunks as i64, corpus.avg_chunk_len],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.execute(
        "INSERT INTO index_builds
         (id, corpus_fingerprint, chunk_count, posting_count, embedded, built_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            build.id,
            build.corpus_fingerprint,
            build.chunk_count as i64,
            build.posting_count as i64,
            build.embedded,
            build.built_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;

    info!(
        build_id = %build.id,
        chunks = chunks.len(),
        postings = postings.len(),
        "index build committed"
    );
    Ok(())
}

/// The most recently committed build, if any.
pub fn current_build(conn: &Connection) -> SiftResult<Option<IndexBuild>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, corpus_fingerprint, chunk_count, posting_count, embedded, built_at
             FROM index_builds ORDER BY built_at DESC, rowid DESC LIMIT 1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map([], |row| {
            let built_at: String = row.get(5)?;
            Ok(IndexBuild {
                id: row.get(0)?,
                corpus_fingerprint: row.get(1)?,
                chunk_count: row.get::<_, i64>(2)? as u64,
                posting_count: row.get::<_, i64>(3)? as u64,
                embedded: row.get(4)?,
                built_at: super::parse_timestamp(5, &built_at)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

/// Corpus stats row, absent until the first build commits.
pub fn corpus_stats(conn: &Connection) -> SiftResult<Option<CorpusStats>> {
    let mut stmt = conn
        .prepare("SELECT total_chunks, avg_chunk_len FROM corpus_stats WHERE id = 1")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map([], |row| {
            Ok(CorpusStats {
                total_chunks: row.get::<_, i64>(0)? as u64,
                avg_chunk_len: row.get(1)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

/// Document frequency for the given terms only.
pub fn term_stats(conn: &Connection, terms: &[String]) -> SiftResult<HashMap<String, u64>> {
    if terms.is_empty() {
        return Ok(HashMap::new());
    }
    let placeholders = vec!["?"; terms.len()].join(",");
    let sql = format!("SELECT term, df FROM term_stats WHERE term IN ({placeholders})");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(rusqlite::params_from_iter(terms.iter()), |row| {
            let term: String = row.get(0)?;
            let df: i64 = row.get(1)?;
            Ok((term, df as u64))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = HashMap::new();
    for row in rows {
        let (term, df) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.insert(term, df);
    }
    Ok(out)
}

/// Postings grouped by term: term → [(chunk_id, tf)].
pub fn postings_for_terms(
    conn: &Connection,
    terms: &[String],
) -> SiftResult<HashMap<String, Vec<(String, f64)>>> {
    if terms.is_empty() {
        return Ok(HashMap::new());
    }
    let placeholders = vec!["?"; terms.len()].join(",");
    let sql =
        format!("SELECT term, chunk_id, tf FROM postings WHERE term IN ({placeholders})");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(rusqlite::params_from_iter(terms.iter()), |row| {
            let term: String = row.get(0)?;
            let chunk_id: String = row.get(1)?;
            let tf: f64 = row.get(2)?;
            Ok((term, chunk_id, tf))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out: HashMap<String, Vec<(String, f64)>> = HashMap::new();
    for row in rows {
        let (term, chunk_id, tf) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.entry(term).or_default().push((chunk_id, tf));
    }
    Ok(out)
}
