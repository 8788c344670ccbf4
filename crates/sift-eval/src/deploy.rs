//! Evaluation-gated promotion: a candidate becomes active only when its
//! aggregate nUDCG does not regress against the current active config.

use tracing::{info, warn};

use sift_core::config::SearchConfig;
use sift_core::errors::{DeployError, SearchError, SiftError, SiftResult};
use sift_core::golden::GoldenSet;
use sift_core::results::Aggregate;
use sift_core::traits::IIndexStore;
use sift_embeddings::EmbeddingEngine;
use sift_validation::Validator;

use crate::evaluator::Evaluator;

/// Outcome of a successful promotion.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// The stored version the candidate was promoted as.
    pub version: i64,
    pub aggregate: Aggregate,
    /// The version that was active before, if any.
    pub displaced: Option<i64>,
}

/// Orchestrates validate → evaluate → gate → compare-and-swap.
pub struct Deployer<'a> {
    store: &'a dyn IIndexStore,
    embedder: Option<&'a EmbeddingEngine>,
}

impl<'a> Deployer<'a> {
    pub fn new(store: &'a dyn IIndexStore, embedder: Option<&'a EmbeddingEngine>) -> Self {
        Self { store, embedder }
    }

    /// Try to promote `candidate` to active.
    ///
    /// The active config's aggregate is taken from its stored eval on the
    /// *current* build; a stored aggregate from an older build is stale
    /// (re-indexing invalidates prior evals) and is recomputed here.
    /// The pointer swap is a compare-and-swap: if another promotion landed
    /// in between, this one fails with a conflict and changes nothing.
    pub fn deploy(
        &self,
        candidate: &SearchConfig,
        golden: &GoldenSet,
    ) -> SiftResult<DeployOutcome> {
        let validator = Validator::new(self.store, self.embedder);
        let verdict = validator.validate(candidate)?;
        if !verdict.passed {
            return Err(SiftError::Deploy(DeployError::InvalidCandidate {
                summary: verdict.summary(),
            }));
        }

        if self.store.current_build()?.is_none() {
            return Err(SiftError::Search(SearchError::IndexNotFound));
        }

        let active = self.store.active_config()?;
        let expected = active.as_ref().map(|a| a.version);

        let evaluator = Evaluator::new(self.store, self.embedder);
        let candidate_version = self.store.insert_config(candidate)?;
        let report = evaluator.evaluate_and_store(candidate_version, candidate, golden)?;

        if let Some(active) = &active {
            let active_aggregate = self.active_aggregate(&evaluator, active, golden)?;
            if report.aggregate.mean_nudcg < active_aggregate.mean_nudcg {
                warn!(
                    candidate = %candidate.name,
                    candidate_nudcg = report.aggregate.mean_nudcg,
                    active_nudcg = active_aggregate.mean_nudcg,
                    "promotion refused: candidate regresses"
                );
                return Err(SiftError::Deploy(DeployError::Regression {
                    candidate: candidate.name.clone(),
                    candidate_nudcg: report.aggregate.mean_nudcg,
                    active_nudcg: active_aggregate.mean_nudcg,
                }));
            }
        }

        self.store.promote_config(candidate_version, expected)?;

        info!(
            candidate = %candidate.name,
            version = candidate_version,
            displaced = ?expected,
            "candidate promoted to active"
        );
        Ok(DeployOutcome {
            version: candidate_version,
            aggregate: report.aggregate,
            displaced: expected,
        })
    }

    /// The active config's aggregate on the current build, recomputing it
    /// when no stored eval for this build exists yet.
    fn active_aggregate(
        &self,
        evaluator: &Evaluator<'_>,
        active: &sift_core::results::ConfigVersion,
        golden: &GoldenSet,
    ) -> SiftResult<Aggregate> {
        let build = self
            .store
            .current_build()?
            .ok_or(SiftError::Search(SearchError::IndexNotFound))?;

        if let Some(stored) = self.store.latest_aggregate(active.version, &build.id)? {
            return Ok(stored);
        }

        info!(
            active_version = active.version,
            build_id = %build.id,
            "no stored eval for the active config on this build; re-evaluating"
        );
        let report = evaluator.evaluate_and_store(active.version, &active.config, golden)?;
        Ok(report.aggregate)
    }
}
