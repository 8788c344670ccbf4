use serde::{Deserialize, Serialize};

use super::defaults;

/// BM25 lexical scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term-frequency saturation. Must be >= 0.
    pub k1: f64,
    /// Length normalization strength, in [0, 1].
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: defaults::DEFAULT_BM25_K1,
            b: defaults::DEFAULT_BM25_B,
        }
    }
}

/// Reciprocal Rank Fusion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionParams {
    /// RRF smoothing constant. Higher values dampen rank-1 outliers.
    pub rrf_k: u32,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
        }
    }
}

/// Hard result-count limits applied before dynamic-k.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultLimits {
    pub top_k: usize,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
        }
    }
}

/// Score-gap based result cutoff.
///
/// Cuts the fused ranking at the first position where the score drop
/// relative to the top score exceeds `cutoff`, subject to `min_results`
/// and `max_results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicKPolicy {
    pub enabled: bool,
    /// Relative score-drop threshold, in (0, 1].
    pub cutoff: f64,
    pub min_results: usize,
    pub max_results: usize,
}

impl Default for DynamicKPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            cutoff: defaults::DEFAULT_DYNAMIC_K_CUTOFF,
            min_results: defaults::DEFAULT_DYNAMIC_K_MIN,
            max_results: defaults::DEFAULT_DYNAMIC_K_MAX,
        }
    }
}

/// Cross-signal disagreement reporting.
///
/// Compares the lexical and semantic top-N id sets; when the overlap
/// fraction falls below `min_overlap`, the query is flagged. Diagnostic
/// only — never changes the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisagreementPolicy {
    pub enabled: bool,
    /// How many results from each signal to compare.
    pub top_n: usize,
    /// Overlap fraction below which the signals are considered in conflict.
    pub min_overlap: f64,
}

impl Default for DisagreementPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            top_n: defaults::DEFAULT_DISAGREEMENT_TOP_N,
            min_overlap: defaults::DEFAULT_DISAGREEMENT_MIN_OVERLAP,
        }
    }
}
