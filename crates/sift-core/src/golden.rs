//! Labeled test set for evaluation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, SiftError};

/// Grade assigned to a distractor: a result that looks relevant but is
/// actively harmful if surfaced.
pub const DISTRACTOR_GRADE: i32 = -1;

/// One labeled query: the query text plus a map from chunk or document
/// identifiers to relevance grades. Grade > 0 means relevant at some
/// degree, 0 means unlabeled, -1 marks a distractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenQuery {
    pub query: String,
    #[serde(default)]
    pub labels: HashMap<String, i32>,
}

impl GoldenQuery {
    /// Grades of all positively-labeled entries, unsorted.
    pub fn positive_grades(&self) -> Vec<i32> {
        self.labels.values().copied().filter(|&g| g > 0).collect()
    }
}

/// An ordered collection of golden queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenSet {
    pub queries: Vec<GoldenQuery>,
}

impl GoldenSet {
    /// Parse a golden set from JSON, rejecting empty sets.
    pub fn from_json(json: &str) -> Result<Self, SiftError> {
        let set: GoldenSet = serde_json::from_str(json).map_err(|e| {
            SiftError::Eval(EvalError::MalformedTestSet {
                reason: e.to_string(),
            })
        })?;
        if set.queries.is_empty() {
            return Err(SiftError::Eval(EvalError::EmptyTestSet));
        }
        Ok(set)
    }
}
