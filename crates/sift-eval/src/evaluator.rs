//! Evaluates a configuration against a golden set, one search per query.

use chrono::Utc;
use rayon::prelude::*;
use tracing::info;

use sift_core::config::SearchConfig;
use sift_core::errors::{EvalError, SearchError, SiftError, SiftResult};
use sift_core::golden::GoldenSet;
use sift_core::results::{Aggregate, EvalReport, QueryEval};
use sift_core::traits::IIndexStore;
use sift_embeddings::EmbeddingEngine;
use sift_retrieval::Searcher;

use crate::udcg;

/// Batch evaluator. Queries are independent and run in parallel; the
/// aggregate is computed only after all of them complete.
pub struct Evaluator<'a> {
    store: &'a dyn IIndexStore,
    embedder: Option<&'a EmbeddingEngine>,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a dyn IIndexStore, embedder: Option<&'a EmbeddingEngine>) -> Self {
        Self { store, embedder }
    }

    /// Evaluate without persisting (for ad-hoc comparisons).
    pub fn evaluate(&self, config: &SearchConfig, golden: &GoldenSet) -> SiftResult<EvalReport> {
        self.run(config, golden, None)
    }

    /// Evaluate and persist per-query and aggregate rows under the given
    /// stored config version.
    pub fn evaluate_and_store(
        &self,
        config_version: i64,
        config: &SearchConfig,
        golden: &GoldenSet,
    ) -> SiftResult<EvalReport> {
        self.run(config, golden, Some(config_version))
    }

    fn run(
        &self,
        config: &SearchConfig,
        golden: &GoldenSet,
        config_version: Option<i64>,
    ) -> SiftResult<EvalReport> {
        if golden.queries.is_empty() {
            return Err(SiftError::Eval(EvalError::EmptyTestSet));
        }
        let build = self
            .store
            .current_build()?
            .ok_or(SiftError::Search(SearchError::IndexNotFound))?;

        let searcher = Searcher::new(self.store, self.embedder);
        let k = config.limits.top_k;

        let per_query: Vec<QueryEval> = golden
            .queries
            .par_iter()
            .map(|gq| {
                let outcome = searcher.search(config, &gq.query)?;
                let flagged = outcome
                    .disagreement
                    .map(|d| d.conflicted)
                    .unwrap_or(false);
                Ok(udcg::score_query(&outcome.results, gq, k, flagged))
            })
            .collect::<SiftResult<Vec<_>>>()?;

        let n = per_query.len() as f64;
        let aggregate = Aggregate {
            mean_nudcg: per_query.iter().map(|q| q.nudcg).sum::<f64>() / n,
            mean_precision: per_query.iter().map(|q| q.precision_at_k).sum::<f64>() / n,
            total_distractors: per_query.iter().map(|q| q.distractor_count).sum(),
        };

        if let Some(version) = config_version {
            for eval in &per_query {
                self.store.insert_query_eval(version, &build.id, eval)?;
            }
            self.store
                .insert_aggregate_eval(version, &build.id, &aggregate)?;
        }

        info!(
            config = %config.name,
            build_id = %build.id,
            queries = per_query.len(),
            mean_nudcg = aggregate.mean_nudcg,
            distractors = aggregate.total_distractors,
            "evaluation complete"
        );

        Ok(EvalReport {
            config_name: config.name.clone(),
            config_version,
            build_id: build.id,
            per_query,
            aggregate,
            evaluated_at: Utc::now(),
        })
    }
}
