//! Reciprocal Rank Fusion: score = Σ 1/(k + rank) over the signals in
//! which a chunk appears.
//!
//! Combines the lexical and semantic rankings without normalizing their
//! raw scores against each other. A chunk absent from one signal's list
//! simply contributes no term for that signal — it is not assigned a
//! default rank.

use std::collections::HashMap;

/// A candidate after fusion, carrying its per-signal ranks.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub chunk_id: String,
    pub score: f64,
    /// 1-based rank in the lexical list, if present there.
    pub lexical_rank: Option<usize>,
    /// 1-based rank in the semantic list, if present there.
    pub semantic_rank: Option<usize>,
}

/// Fuse two ranked lists. `k` is the smoothing constant (typically 60);
/// higher values dampen the influence of rank-1 outliers.
pub fn fuse(
    lexical: &[(String, f64)],
    semantic: &[(String, f64)],
    k: u32,
) -> Vec<FusedCandidate> {
    let lexical_ranks: HashMap<&str, usize> = lexical
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (id.as_str(), i + 1))
        .collect();
    let semantic_ranks: HashMap<&str, usize> = semantic
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (id.as_str(), i + 1))
        .collect();

    let mut ids: Vec<&str> = lexical_ranks.keys().copied().collect();
    for id in semantic_ranks.keys() {
        if !lexical_ranks.contains_key(id) {
            ids.push(id);
        }
    }

    let k = k as f64;
    let mut fused: Vec<FusedCandidate> = ids
        .into_iter()
        .map(|id| {
            let lexical_rank = lexical_ranks.get(id).copied();
            let semantic_rank = semantic_ranks.get(id).copied();
            let mut score = 0.0;
            if let Some(rank) = lexical_rank {
                score += 1.0 / (k + rank as f64);
            }
            if let Some(rank) = semantic_rank {
                score += 1.0 / (k + rank as f64);
            }
            FusedCandidate {
                chunk_id: id.to_string(),
                score,
                lexical_rank,
                semantic_rank,
            }
        })
        .collect();

    fused.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
    fused
}
