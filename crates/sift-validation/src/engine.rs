//! Staged validation engine with short-circuit semantics.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::info;

use sift_core::config::SearchConfig;
use sift_core::errors::SiftResult;
use sift_core::traits::IIndexStore;
use sift_embeddings::EmbeddingEngine;

use crate::{behavioral, semantic, syntactic};

/// A single violated field/rule.
#[derive(Debug, Clone)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Which stage produced the verdict's violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Syntactic,
    Semantic,
    Behavioral,
}

/// Accept/reject outcome with the reasoned violation list.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub passed: bool,
    /// The stage that failed, when `passed` is false.
    pub failed_stage: Option<Stage>,
    pub violations: Vec<Violation>,
}

impl Verdict {
    fn accept() -> Self {
        Self {
            passed: true,
            failed_stage: None,
            violations: Vec::new(),
        }
    }

    fn reject(stage: Stage, violations: Vec<Violation>) -> Self {
        Self {
            passed: false,
            failed_stage: Some(stage),
            violations,
        }
    }

    /// One-line summary of all violations, for error payloads.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Runs the three stages in order; the first failing stage short-circuits
/// and reports only its own violations. Never mutates state.
pub struct Validator<'a> {
    store: &'a dyn IIndexStore,
    embedder: Option<&'a EmbeddingEngine>,
    probe_count: AtomicU32,
}

impl<'a> Validator<'a> {
    pub fn new(store: &'a dyn IIndexStore, embedder: Option<&'a EmbeddingEngine>) -> Self {
        Self {
            store,
            embedder,
            probe_count: AtomicU32::new(0),
        }
    }

    /// Validate a parsed configuration.
    pub fn validate(&self, config: &SearchConfig) -> SiftResult<Verdict> {
        let violations = syntactic::check(config);
        if !violations.is_empty() {
            return Ok(Verdict::reject(Stage::Syntactic, violations));
        }

        let violations = semantic::check(config);
        if !violations.is_empty() {
            return Ok(Verdict::reject(Stage::Semantic, violations));
        }

        // Behavioral needs an index to probe; with none built yet the
        // stage is skipped entirely.
        if self.store.current_build()?.is_some() {
            self.probe_count.fetch_add(1, Ordering::SeqCst);
            let violations = behavioral::check(self.store, self.embedder, config);
            if !violations.is_empty() {
                return Ok(Verdict::reject(Stage::Behavioral, violations));
            }
        }

        info!(config = %config.name, "configuration accepted");
        Ok(Verdict::accept())
    }

    /// Validate raw JSON. A shape or type error is itself a syntactic
    /// rejection, not a process error.
    pub fn validate_json(&self, json: &str) -> SiftResult<Verdict> {
        match SearchConfig::from_json(json) {
            Ok(config) => self.validate(&config),
            Err(e) => Ok(Verdict::reject(
                Stage::Syntactic,
                vec![Violation {
                    field: "<root>".to_string(),
                    message: format!("invalid configuration JSON: {e}"),
                }],
            )),
        }
    }

    /// How many behavioral probes this validator has executed.
    pub fn probe_count(&self) -> u32 {
        self.probe_count.load(Ordering::SeqCst)
    }
}
