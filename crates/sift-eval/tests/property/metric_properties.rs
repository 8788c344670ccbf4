//! Property tests for the UDCG metric.

use std::collections::HashMap;

use proptest::prelude::*;

use sift_core::golden::GoldenQuery;
use sift_core::results::RankedChunk;
use sift_eval::udcg::score_query;

fn result(doc: usize) -> RankedChunk {
    RankedChunk {
        chunk_id: format!("d{doc}#0"),
        doc_id: format!("d{doc}"),
        score: 1.0,
        lexical_rank: Some(1),
        semantic_rank: None,
        preview: String::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Without distractors, nUDCG stays within [0, 1] whenever at least
    /// one positively-labeled chunk exists.
    #[test]
    fn nudcg_bounded_without_distractors(
        // Which of 8 docs are returned, in ranked order.
        ranking in proptest::collection::vec(0usize..8, 0..8),
        // Positive grades assigned to a subset of docs.
        grades in proptest::collection::btree_map(0usize..8, 1i32..4, 1..8),
        k in 1usize..10,
    ) {
        let results: Vec<RankedChunk> = ranking.iter().map(|&d| result(d)).collect();
        let labels: HashMap<String, i32> = grades
            .iter()
            .map(|(d, g)| (format!("d{d}"), *g))
            .collect();
        let golden = GoldenQuery { query: "q".to_string(), labels };

        let eval = score_query(&results, &golden, k, false);
        prop_assert!(eval.nudcg >= 0.0, "nudcg {} < 0", eval.nudcg);
        prop_assert!(eval.nudcg <= 1.0 + 1e-9, "nudcg {} > 1", eval.nudcg);
    }

    /// Adding a distractor label to a surfaced doc never raises the score.
    #[test]
    fn distractor_label_never_helps(
        ranking in proptest::collection::vec(0usize..6, 1..6),
        victim in 0usize..6,
        k in 1usize..10,
    ) {
        let results: Vec<RankedChunk> = ranking.iter().map(|&d| result(d)).collect();

        let mut labels: HashMap<String, i32> = HashMap::new();
        labels.insert("d0".to_string(), 1);
        let clean = GoldenQuery { query: "q".to_string(), labels: labels.clone() };

        labels.insert(format!("d{victim}"), -1);
        let poisoned = GoldenQuery { query: "q".to_string(), labels };

        let clean_eval = score_query(&results, &clean, k, false);
        let poisoned_eval = score_query(&results, &poisoned, k, false);
        prop_assert!(poisoned_eval.udcg <= clean_eval.udcg + 1e-12);
    }
}
