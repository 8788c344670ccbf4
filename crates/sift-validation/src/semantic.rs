//! Semantic stage: cross-field consistency.
//!
//! Runs only after the syntactic stage passed, so individual fields are
//! already inside their domains. Lexical configurations deliberately do
//! NOT error on fusion or disagreement fields — those are simply unused.

use sift_core::config::{SearchConfig, SearchMethod};

use crate::engine::Violation;

pub fn check(config: &SearchConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    if config.dynamic_k.enabled && config.dynamic_k.min_results > config.dynamic_k.max_results {
        violations.push(Violation {
            field: "dynamic_k.min_results".to_string(),
            message: format!(
                "min_results ({}) must be <= max_results ({})",
                config.dynamic_k.min_results, config.dynamic_k.max_results
            ),
        });
    }

    if config.disagreement.enabled && config.method != SearchMethod::Hybrid {
        violations.push(Violation {
            field: "disagreement.enabled".to_string(),
            message: "disagreement reporting measures the gap between lexical and \
                      semantic rankings and therefore requires method = hybrid"
                .to_string(),
        });
    }

    if config.allow_lexical_fallback && config.method == SearchMethod::Lexical {
        violations.push(Violation {
            field: "allow_lexical_fallback".to_string(),
            message: "lexical-only configurations have nothing to fall back from".to_string(),
        });
    }

    violations
}
