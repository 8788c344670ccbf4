//! The search pipeline: tokenize → signals → fuse → dynamic-k →
//! disagreement → ranked results.

use tracing::{debug, warn};

use sift_core::config::{SearchConfig, SearchMethod};
use sift_core::errors::{SearchError, SiftError, SiftResult};
use sift_core::results::{RankedChunk, SearchOutcome};
use sift_core::traits::IIndexStore;
use sift_embeddings::EmbeddingEngine;
use sift_index::tokenizer::tokenize;

use crate::rrf::FusedCandidate;
use crate::{bm25, disagreement, dynamic_k, rrf, vector};

/// Read-only query engine over a committed index.
///
/// Stateless apart from its borrowed collaborators; any number of
/// searches may run concurrently.
pub struct Searcher<'a> {
    store: &'a dyn IIndexStore,
    /// Required for semantic and hybrid configurations.
    embedder: Option<&'a EmbeddingEngine>,
}

impl<'a> Searcher<'a> {
    pub fn new(store: &'a dyn IIndexStore, embedder: Option<&'a EmbeddingEngine>) -> Self {
        Self { store, embedder }
    }

    /// Run one query under the given (validated) configuration.
    pub fn search(&self, config: &SearchConfig, query: &str) -> SiftResult<SearchOutcome> {
        if self.store.current_build()?.is_none() {
            return Err(SiftError::Search(SearchError::IndexNotFound));
        }

        let query_terms = tokenize(query);

        let lexical = match config.method {
            SearchMethod::Semantic => Vec::new(),
            _ => bm25::bm25_search(self.store, &query_terms, &config.bm25)?,
        };

        let (semantic, degraded) = if config.method.needs_embeddings() {
            match self.semantic_signal(query) {
                Ok(ranked) => (ranked, false),
                Err(e) if config.allow_lexical_fallback => {
                    warn!(error = %e, "embedding failed; degrading to lexical-only");
                    (Vec::new(), true)
                }
                Err(e) => return Err(e),
            }
        } else {
            (Vec::new(), false)
        };

        // Degraded semantic-only has no lexical list to fall back on yet.
        let lexical = if degraded && lexical.is_empty() {
            bm25::bm25_search(self.store, &query_terms, &config.bm25)?
        } else {
            lexical
        };

        let report = if config.method == SearchMethod::Hybrid && config.disagreement.enabled {
            disagreement::measure(&lexical, &semantic, &config.disagreement)
        } else {
            None
        };

        let fused = fuse_signals(&lexical, &semantic, config);
        let results = self.materialize(fused, config)?;

        debug!(
            query_terms = query_terms.len(),
            results = results.len(),
            degraded,
            "search complete"
        );
        Ok(SearchOutcome {
            results,
            disagreement: report,
            degraded,
        })
    }

    /// Embed the query and rank chunks by cosine similarity.
    fn semantic_signal(&self, query: &str) -> SiftResult<Vec<(String, f64)>> {
        let Some(embedder) = self.embedder else {
            return Err(SiftError::Search(SearchError::SearchFailed {
                reason: "configuration requires embeddings but no provider is configured"
                    .to_string(),
            }));
        };
        let query_embedding = embedder.embed_query(query)?;
        vector::vector_search(self.store, &query_embedding)
    }

    /// Apply top-k and dynamic-k, then resolve chunk metadata.
    fn materialize(
        &self,
        mut fused: Vec<FusedCandidate>,
        config: &SearchConfig,
    ) -> SiftResult<Vec<RankedChunk>> {
        fused.truncate(config.limits.top_k);

        if config.dynamic_k.enabled && !fused.is_empty() {
            let scores: Vec<f64> = fused.iter().map(|c| c.score).collect();
            fused.truncate(dynamic_k::cut_length(&scores, &config.dynamic_k));
        }

        let mut results = Vec::with_capacity(fused.len());
        for candidate in fused {
            let Some(chunk) = self.store.get_chunk(&candidate.chunk_id)? else {
                continue;
            };
            results.push(RankedChunk {
                chunk_id: candidate.chunk_id,
                doc_id: chunk.doc_id,
                score: candidate.score,
                lexical_rank: candidate.lexical_rank,
                semantic_rank: candidate.semantic_rank,
                preview: RankedChunk::make_preview(&chunk.text),
            });
        }
        Ok(results)
    }
}

/// Fuse the two signals per the configured method.
///
/// RRF only applies when both signals actually produced rankings; with a
/// single live signal the fused score is that signal's own score.
fn fuse_signals(
    lexical: &[(String, f64)],
    semantic: &[(String, f64)],
    config: &SearchConfig,
) -> Vec<FusedCandidate> {
    if !lexical.is_empty() && !semantic.is_empty() {
        return rrf::fuse(lexical, semantic, config.fusion.rrf_k);
    }
    if !lexical.is_empty() {
        return single_signal(lexical, true);
    }
    if !semantic.is_empty() {
        return single_signal(semantic, false);
    }
    Vec::new()
}

fn single_signal(ranked: &[(String, f64)], is_lexical: bool) -> Vec<FusedCandidate> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, (id, score))| FusedCandidate {
            chunk_id: id.clone(),
            score: *score,
            lexical_rank: is_lexical.then_some(i + 1),
            semantic_rank: (!is_lexical).then_some(i + 1),
        })
        .collect()
}
