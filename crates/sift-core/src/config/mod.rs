//! Retrieval configuration: a named, versioned set of parameters.
//!
//! Configurations are immutable once created — editing one produces a new
//! version row in the store. Exactly one version is active at a time.

mod chunking;
mod defaults;
mod ranking;

use serde::{Deserialize, Serialize};

pub use chunking::{ChunkUnit, ChunkingPolicy};
pub use ranking::{Bm25Params, DisagreementPolicy, DynamicKPolicy, FusionParams, ResultLimits};

/// Which retrieval signals a configuration uses.
///
/// Chosen once at validation time; the searcher dispatches on this variant
/// rather than inspecting flags per query. `Semantic` and `Hybrid` require
/// embeddings both at index time and at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    Lexical,
    Semantic,
    Hybrid,
}

impl SearchMethod {
    /// Whether this method needs a query embedding.
    pub fn needs_embeddings(self) -> bool {
        !matches!(self, SearchMethod::Lexical)
    }
}

/// The full retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Human-readable configuration name.
    pub name: String,
    /// Chunking policy applied at index time.
    pub chunking: ChunkingPolicy,
    /// BM25 lexical scoring parameters.
    pub bm25: Bm25Params,
    /// Retrieval signal selection.
    pub method: SearchMethod,
    /// When true, a query-time embedding failure degrades to lexical-only
    /// results instead of failing the query. Off by default: failures
    /// surface unless explicitly opted into.
    pub allow_lexical_fallback: bool,
    /// Rank-fusion parameters (hybrid only).
    pub fusion: FusionParams,
    /// Result count limits.
    pub limits: ResultLimits,
    /// Score-gap based result cutoff.
    pub dynamic_k: DynamicKPolicy,
    /// Cross-signal disagreement reporting (hybrid only).
    pub disagreement: DisagreementPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            chunking: ChunkingPolicy::default(),
            bm25: Bm25Params::default(),
            method: SearchMethod::Hybrid,
            allow_lexical_fallback: false,
            fusion: FusionParams::default(),
            limits: ResultLimits::default(),
            dynamic_k: DynamicKPolicy::default(),
            disagreement: DisagreementPolicy::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for persistence in the config_versions table.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
