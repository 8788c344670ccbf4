//! Behavioral stage: a live probe query under the candidate config.
//!
//! The only stage that touches the index store or external services.
//! Skipped when no index build exists yet. A probe that raises a runtime
//! fault (index gone, embedding service unreachable for a hybrid config)
//! rejects the candidate.

use tracing::debug;

use sift_core::config::SearchConfig;
use sift_core::traits::IIndexStore;
use sift_embeddings::EmbeddingEngine;
use sift_retrieval::Searcher;

use crate::engine::Violation;

/// Fixed, cheap probe. The stage detects runtime faults, not quality, so
/// one short query is enough.
pub const PROBE_QUERY: &str = "probe";

pub fn check(
    store: &dyn IIndexStore,
    embedder: Option<&EmbeddingEngine>,
    config: &SearchConfig,
) -> Vec<Violation> {
    let searcher = Searcher::new(store, embedder);
    match searcher.search(config, PROBE_QUERY) {
        Ok(outcome) => {
            debug!(results = outcome.results.len(), "behavioral probe passed");
            Vec::new()
        }
        Err(e) => vec![Violation {
            field: "behavioral".to_string(),
            message: format!("probe query failed: {e}"),
        }],
    }
}
