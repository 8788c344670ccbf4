//! Side-by-side comparison of two configurations on the same index build
//! and test set.

use serde::Serialize;
use serde_json::Value;

use sift_core::config::SearchConfig;
use sift_core::errors::SiftResult;
use sift_core::golden::GoldenSet;
use sift_core::results::EvalReport;

use crate::evaluator::Evaluator;

/// Per-query metric movement between two configurations.
#[derive(Debug, Clone, Serialize)]
pub struct QueryDelta {
    pub query: String,
    pub nudcg_a: f64,
    pub nudcg_b: f64,
    pub delta: f64,
    /// True when config B scored strictly worse than config A here.
    pub regressed: bool,
    pub distractors_a: u32,
    pub distractors_b: u32,
}

/// A configuration field whose value differs between the two configs.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub a: Value,
    pub b: Value,
}

/// The full comparison: both evaluations, per-query deltas, and the
/// config fields that changed.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub report_a: EvalReport,
    pub report_b: EvalReport,
    pub deltas: Vec<QueryDelta>,
    pub aggregate_nudcg_delta: f64,
    pub aggregate_distractor_delta: i64,
    pub config_diff: Vec<FieldDiff>,
}

/// Evaluate both configs against the same golden set and diff the results.
pub fn compare_configs(
    evaluator: &Evaluator<'_>,
    config_a: &SearchConfig,
    config_b: &SearchConfig,
    golden: &GoldenSet,
) -> SiftResult<ComparisonReport> {
    let report_a = evaluator.evaluate(config_a, golden)?;
    let report_b = evaluator.evaluate(config_b, golden)?;

    let deltas: Vec<QueryDelta> = report_a
        .per_query
        .iter()
        .zip(&report_b.per_query)
        .map(|(qa, qb)| QueryDelta {
            query: qa.query.clone(),
            nudcg_a: qa.nudcg,
            nudcg_b: qb.nudcg,
            delta: qb.nudcg - qa.nudcg,
            regressed: qb.nudcg < qa.nudcg,
            distractors_a: qa.distractor_count,
            distractors_b: qb.distractor_count,
        })
        .collect();

    let config_diff = diff_configs(config_a, config_b)?;

    Ok(ComparisonReport {
        aggregate_nudcg_delta: report_b.aggregate.mean_nudcg - report_a.aggregate.mean_nudcg,
        aggregate_distractor_delta: report_b.aggregate.total_distractors as i64
            - report_a.aggregate.total_distractors as i64,
        report_a,
        report_b,
        deltas,
        config_diff,
    })
}

/// Walk both configs as JSON values and collect the leaves that differ.
fn diff_configs(a: &SearchConfig, b: &SearchConfig) -> SiftResult<Vec<FieldDiff>> {
    let a = serde_json::to_value(a).map_err(comparison_err)?;
    let b = serde_json::to_value(b).map_err(comparison_err)?;

    let mut diffs = Vec::new();
    diff_values(&a, &b, "", &mut diffs);
    Ok(diffs)
}

fn comparison_err(e: serde_json::Error) -> sift_core::errors::SiftError {
    sift_core::errors::SiftError::Eval(sift_core::errors::EvalError::ComparisonFailed {
        reason: e.to_string(),
    })
}

fn diff_values(a: &Value, b: &Value, prefix: &str, out: &mut Vec<FieldDiff>) {
    match (a, b) {
        (Value::Object(map_a), Value::Object(map_b)) => {
            let mut keys: Vec<&String> = map_a.keys().chain(map_b.keys()).collect();
            keys.sort_unstable();
            keys.dedup();
            for key in keys {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                let va = map_a.get(key).unwrap_or(&Value::Null);
                let vb = map_b.get(key).unwrap_or(&Value::Null);
                diff_values(va, vb, &path, out);
            }
        }
        _ => {
            if a != b {
                out.push(FieldDiff {
                    field: prefix.to_string(),
                    a: a.clone(),
                    b: b.clone(),
                });
            }
        }
    }
}
