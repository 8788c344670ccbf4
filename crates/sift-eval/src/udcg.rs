//! Utility-weighted Discounted Cumulative Gain.
//!
//! Like nDCG, but a grade can be negative: a distractor surfacing in the
//! ranking is a genuine penalty, not a neutral zero, so a configuration
//! that returns confidently-wrong results scores worse than one that
//! returns nothing.
//!
//! Document-level dedup: once a document's highest-ranked chunk has been
//! graded, later chunks of the same document contribute zero utility
//! (they still consume their rank position's discount slot).

use std::collections::HashSet;

use sift_core::golden::{GoldenQuery, DISTRACTOR_GRADE};
use sift_core::results::{QueryEval, RankedChunk};

/// Grade for one result: the chunk's own label wins over its document's.
fn grade_for(result: &RankedChunk, golden: &GoldenQuery) -> i32 {
    golden
        .labels
        .get(&result.chunk_id)
        .or_else(|| golden.labels.get(&result.doc_id))
        .copied()
        .unwrap_or(0)
}

/// Score one query's ranking against its golden labels, over the top `k`.
pub fn score_query(
    results: &[RankedChunk],
    golden: &GoldenQuery,
    k: usize,
    disagreement_flagged: bool,
) -> QueryEval {
    let considered = &results[..results.len().min(k)];

    let mut seen_docs: HashSet<&str> = HashSet::new();
    let mut udcg = 0.0;
    let mut relevant_in_top_k = 0u32;
    let mut distractor_count = 0u32;

    for (i, result) in considered.iter().enumerate() {
        let position = (i + 1) as f64;
        if !seen_docs.insert(&result.doc_id) {
            continue;
        }

        let grade = grade_for(result, golden);
        if grade > 0 {
            relevant_in_top_k += 1;
        } else if grade == DISTRACTOR_GRADE {
            distractor_count += 1;
        }

        udcg += grade as f64 / (position + 1.0).log2();
    }

    // Ideal ranking: known positive grades, best first, capped to the
    // result count actually returned.
    let mut positive = golden.positive_grades();
    positive.sort_unstable_by(|a, b| b.cmp(a));
    let ideal_udcg: f64 = positive
        .iter()
        .take(considered.len())
        .enumerate()
        .map(|(i, &g)| g as f64 / ((i + 2) as f64).log2())
        .sum();

    let nudcg = if ideal_udcg > 0.0 {
        udcg / ideal_udcg
    } else {
        0.0
    };

    QueryEval {
        query: golden.query.clone(),
        udcg,
        ideal_udcg,
        nudcg,
        precision_at_k: if k > 0 {
            relevant_in_top_k as f64 / k as f64
        } else {
            0.0
        },
        distractor_count,
        disagreement_flagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn result(chunk_id: &str, doc_id: &str) -> RankedChunk {
        RankedChunk {
            chunk_id: chunk_id.to_string(),
            doc_id: doc_id.to_string(),
            score: 1.0,
            lexical_rank: Some(1),
            semantic_rank: None,
            preview: String::new(),
        }
    }

    fn golden(query: &str, labels: &[(&str, i32)]) -> GoldenQuery {
        GoldenQuery {
            query: query.to_string(),
            labels: labels
                .iter()
                .map(|(id, g)| (id.to_string(), *g))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn relevant_at_rank_one_scores_full() {
        let results = vec![result("a#0", "a")];
        let eval = score_query(&results, &golden("q", &[("a", 1)]), 10, false);
        assert!((eval.udcg - 1.0).abs() < 1e-9);
        assert!((eval.nudcg - 1.0).abs() < 1e-9);
    }

    #[test]
    fn distractor_scores_strictly_below_empty() {
        let labeled = golden("q", &[("good", 1), ("bad", -1)]);

        let with_distractor = score_query(&[result("bad#0", "bad")], &labeled, 10, false);
        let empty = score_query(&[], &labeled, 10, false);

        assert!(with_distractor.nudcg < empty.nudcg);
        assert_eq!(with_distractor.distractor_count, 1);
        assert_eq!(empty.nudcg, 0.0);
    }

    #[test]
    fn later_positions_are_discounted() {
        let labeled = golden("q", &[("a", 1)]);
        let first = score_query(
            &[result("a#0", "a"), result("x#0", "x")],
            &labeled,
            10,
            false,
        );
        let second = score_query(
            &[result("x#0", "x"), result("a#0", "a")],
            &labeled,
            10,
            false,
        );
        assert!(first.udcg > second.udcg);
    }

    #[test]
    fn duplicate_doc_chunks_contribute_once() {
        let labeled = golden("q", &[("a", 1)]);
        let eval = score_query(
            &[result("a#0", "a"), result("a#1", "a")],
            &labeled,
            10,
            false,
        );
        // Second chunk of the same doc adds nothing.
        assert!((eval.udcg - 1.0).abs() < 1e-9);
    }

    #[test]
    fn chunk_label_wins_over_doc_label() {
        let labeled = golden("q", &[("a#0", 2), ("a", 1)]);
        let eval = score_query(&[result("a#0", "a")], &labeled, 10, false);
        assert!((eval.udcg - 2.0).abs() < 1e-9);
    }

    #[test]
    fn graded_ideal_sorts_descending() {
        // Returned: grade-1 doc first, grade-3 doc second.
        let labeled = golden("q", &[("low", 1), ("high", 3)]);
        let eval = score_query(
            &[result("low#0", "low"), result("high#0", "high")],
            &labeled,
            10,
            false,
        );
        let ideal = 3.0 + 1.0 / 3.0_f64.log2();
        assert!((eval.ideal_udcg - ideal).abs() < 1e-9);
        assert!(eval.nudcg < 1.0);
    }

    #[test]
    fn unlabeled_results_are_neutral() {
        let labeled = golden("q", &[("a", 1)]);
        let eval = score_query(&[result("x#0", "x")], &labeled, 10, false);
        assert_eq!(eval.udcg, 0.0);
        assert_eq!(eval.nudcg, 0.0);
    }

    #[test]
    fn no_positive_labels_defines_nudcg_zero() {
        let labeled = golden("q", &[("bad", -1)]);
        let eval = score_query(&[result("x#0", "x")], &labeled, 10, false);
        assert_eq!(eval.ideal_udcg, 0.0);
        assert_eq!(eval.nudcg, 0.0);
    }

    #[test]
    fn k_truncates_consideration() {
        let labeled = golden("q", &[("a", 1)]);
        let eval = score_query(
            &[result("x#0", "x"), result("a#0", "a")],
            &labeled,
            1,
            false,
        );
        assert_eq!(eval.udcg, 0.0);
    }
}
