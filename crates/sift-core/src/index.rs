//! Index data model: documents, chunks, postings, and build records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An input document. Immutable once ingested in a given indexing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable external identifier.
    pub id: String,
    pub text: String,
}

/// A contiguous span of a document's text, produced by the chunker.
///
/// Never mutated after creation, only replaced wholesale by a re-index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// `"{doc_id}#{seq}"` — deterministic under re-indexing.
    pub id: String,
    pub doc_id: String,
    /// Position within the parent document, 0-based.
    pub seq: u32,
    /// Character offset of the span start in the document text.
    pub start: usize,
    /// Character offset one past the span end.
    pub end: usize,
    pub text: String,
    /// Tokenized length, used by BM25 length normalization.
    pub token_len: u64,
}

impl Chunk {
    pub fn make_id(doc_id: &str, seq: u32) -> String {
        format!("{doc_id}#{seq}")
    }
}

/// Inverted-index entry: term → chunk with term frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub term: String,
    pub chunk_id: String,
    pub tf: f64,
}

/// Per-term document frequency across chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct TermStat {
    pub term: String,
    /// Number of distinct chunks containing the term.
    pub df: u64,
}

/// Global corpus aggregates for BM25 length normalization.
/// One row per index build, overwritten on re-index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_chunks: u64,
    pub avg_chunk_len: f64,
}

/// Record of one committed index build.
///
/// Eval results reference a build id; results from older builds are never
/// compared against the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexBuild {
    pub id: String,
    /// blake3 fingerprint over the corpus snapshot (doc ids + texts).
    pub corpus_fingerprint: String,
    pub chunk_count: u64,
    pub posting_count: u64,
    /// Whether this build stored embeddings.
    pub embedded: bool,
    pub built_at: DateTime<Utc>,
}

/// Summary returned to the caller after a successful build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub build_id: String,
    pub documents: usize,
    pub chunks: usize,
    pub terms: usize,
    pub postings: usize,
    pub embedded: bool,
    pub duration_ms: u64,
}
