//! Cross-signal disagreement: do the lexical and semantic top-N sets
//! overlap enough to trust the fused ranking?
//!
//! Overlap is `|A ∩ B| / min(|A|, |B|)` over the top-N ids of each signal.
//! Purely diagnostic — the flag is surfaced alongside results so callers
//! and the evaluator can spot configurations whose signals conflict, but
//! the ranking itself is never changed.

use std::collections::HashSet;

use sift_core::config::DisagreementPolicy;
use sift_core::results::DisagreementReport;

/// Measure top-N overlap between the two signal rankings.
///
/// Returns `None` when either signal produced nothing to compare.
pub fn measure(
    lexical: &[(String, f64)],
    semantic: &[(String, f64)],
    policy: &DisagreementPolicy,
) -> Option<DisagreementReport> {
    if lexical.is_empty() || semantic.is_empty() {
        return None;
    }

    let top_lexical: HashSet<&str> = lexical
        .iter()
        .take(policy.top_n)
        .map(|(id, _)| id.as_str())
        .collect();
    let top_semantic: HashSet<&str> = semantic
        .iter()
        .take(policy.top_n)
        .map(|(id, _)| id.as_str())
        .collect();

    let intersection = top_lexical.intersection(&top_semantic).count();
    let denom = top_lexical.len().min(top_semantic.len());
    let overlap = intersection as f64 / denom as f64;

    Some(DisagreementReport {
        overlap,
        conflicted: overlap < policy.min_overlap,
    })
}
