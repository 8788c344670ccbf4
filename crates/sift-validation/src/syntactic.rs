//! Syntactic stage: every numeric field inside its declared domain.
//!
//! Shape and type errors are caught earlier, when the JSON fails to
//! deserialize into `SearchConfig`; this stage checks the values.

use sift_core::config::SearchConfig;

use crate::engine::Violation;

pub fn check(config: &SearchConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut fail = |field: &str, message: String| {
        violations.push(Violation {
            field: field.to_string(),
            message,
        });
    };

    if config.name.trim().is_empty() {
        fail("name", "must be a non-empty string".to_string());
    }

    if config.chunking.max_size == 0 {
        fail("chunking.max_size", "must be at least 1".to_string());
    } else if config.chunking.overlap >= config.chunking.max_size {
        fail(
            "chunking.overlap",
            format!(
                "overlap ({}) must be smaller than max_size ({})",
                config.chunking.overlap, config.chunking.max_size
            ),
        );
    }

    if !(config.bm25.k1 >= 0.0) {
        fail("bm25.k1", format!("must be >= 0, got {}", config.bm25.k1));
    }
    if !(0.0..=1.0).contains(&config.bm25.b) {
        fail(
            "bm25.b",
            format!("must be within [0, 1], got {}", config.bm25.b),
        );
    }

    if config.fusion.rrf_k == 0 {
        fail("fusion.rrf_k", "must be a positive integer".to_string());
    }

    if config.limits.top_k == 0 {
        fail("limits.top_k", "must be a positive integer".to_string());
    }

    if config.dynamic_k.enabled {
        if !(config.dynamic_k.cutoff > 0.0 && config.dynamic_k.cutoff <= 1.0) {
            fail(
                "dynamic_k.cutoff",
                format!("must be within (0, 1], got {}", config.dynamic_k.cutoff),
            );
        }
        if config.dynamic_k.min_results == 0 {
            fail("dynamic_k.min_results", "must be at least 1".to_string());
        }
        if config.dynamic_k.max_results == 0 {
            fail("dynamic_k.max_results", "must be at least 1".to_string());
        }
    }

    if config.disagreement.enabled {
        if config.disagreement.top_n == 0 {
            fail("disagreement.top_n", "must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&config.disagreement.min_overlap) {
            fail(
                "disagreement.min_overlap",
                format!(
                    "must be within [0, 1], got {}",
                    config.disagreement.min_overlap
                ),
            );
        }
    }

    violations
}
