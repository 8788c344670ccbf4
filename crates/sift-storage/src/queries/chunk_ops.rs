//! Chunk row access and embedding blob (de)serialization.

use rusqlite::{params, Connection, Row};

use sift_core::errors::SiftResult;
use sift_core::index::Chunk;

use crate::to_storage_err;

/// Convert an f32 slice to little-endian bytes for BLOB storage.
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert BLOB bytes back to an f32 vec.
pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn chunk_from_row(row: &Row<'_>) -> rusqlite::Result<Chunk> {
    Ok(Chunk {
        id: row.get(0)?,
        doc_id: row.get(1)?,
        seq: row.get(2)?,
        start: row.get::<_, i64>(3)? as usize,
        end: row.get::<_, i64>(4)? as usize,
        text: row.get(5)?,
        token_len: row.get::<_, i64>(6)? as u64,
    })
}

/// Fetch a single chunk by id.
pub fn get_chunk(conn: &Connection, chunk_id: &str) -> SiftResult<Option<Chunk>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, doc_id, seq, start_char, end_char, text, token_len
             FROM chunks WHERE id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map(params![chunk_id], chunk_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

/// All (chunk_id, embedding) pairs with a stored embedding.
pub fn chunk_embeddings(conn: &Connection) -> SiftResult<Vec<(String, Vec<f32>)>> {
    let mut stmt = conn
        .prepare("SELECT id, embedding FROM chunks WHERE embedding IS NOT NULL")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            Ok((id, blob))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, blob) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push((id, bytes_to_f32_vec(&blob)));
    }
    Ok(out)
}

/// Token length of every chunk, keyed by chunk id.
pub fn chunk_lengths(
    conn: &Connection,
) -> SiftResult<std::collections::HashMap<String, u64>> {
    let mut stmt = conn
        .prepare("SELECT id, token_len FROM chunks")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let len: i64 = row.get(1)?;
            Ok((id, len as u64))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = std::collections::HashMap::new();
    for row in rows {
        let (id, len) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.insert(id, len);
    }
    Ok(out)
}
