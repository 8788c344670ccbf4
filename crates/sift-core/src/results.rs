//! Search and evaluation output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the text preview carried on each ranked result.
const PREVIEW_LEN: usize = 150;

/// One ranked search result with its source-signal breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct RankedChunk {
    pub chunk_id: String,
    pub doc_id: String,
    /// Fused score (RRF in hybrid mode, the signal's own score otherwise).
    pub score: f64,
    /// 1-based rank in the lexical signal, if the chunk appeared there.
    pub lexical_rank: Option<usize>,
    /// 1-based rank in the semantic signal, if the chunk appeared there.
    pub semantic_rank: Option<usize>,
    pub preview: String,
}

impl RankedChunk {
    /// Truncate chunk text to a preview, respecting char boundaries.
    pub fn make_preview(text: &str) -> String {
        match text.char_indices().nth(PREVIEW_LEN) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        }
    }
}

/// Query-level cross-signal disagreement diagnostic.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisagreementReport {
    /// Overlap fraction of the lexical and semantic top-N id sets.
    pub overlap: f64,
    /// True when overlap fell below the configured threshold.
    pub conflicted: bool,
}

/// The full outcome of one search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<RankedChunk>,
    /// Present only when both signals ran and disagreement reporting is on.
    pub disagreement: Option<DisagreementReport>,
    /// True when the query fell back to lexical-only after an embedding
    /// failure (requires the config's explicit opt-in).
    pub degraded: bool,
}

/// Per-query evaluation metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEval {
    pub query: String,
    pub udcg: f64,
    pub ideal_udcg: f64,
    pub nudcg: f64,
    pub precision_at_k: f64,
    pub distractor_count: u32,
    /// Whether the searcher flagged cross-signal disagreement.
    pub disagreement_flagged: bool,
}

/// Aggregate metrics over a full golden set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aggregate {
    pub mean_nudcg: f64,
    pub mean_precision: f64,
    pub total_distractors: u32,
}

/// One evaluation run of a configuration against a golden set.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub config_name: String,
    /// Version row the evaluated config was stored under, if persisted.
    pub config_version: Option<i64>,
    /// Index build the evaluation ran against.
    pub build_id: String,
    pub per_query: Vec<QueryEval>,
    pub aggregate: Aggregate,
    pub evaluated_at: DateTime<Utc>,
}

/// A stored configuration version row.
#[derive(Debug, Clone)]
pub struct ConfigVersion {
    pub version: i64,
    pub name: String,
    pub config: crate::config::SearchConfig,
    pub created_at: DateTime<Utc>,
}
