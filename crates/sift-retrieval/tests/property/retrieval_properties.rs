//! Property tests: BM25 term-frequency monotonicity and RRF fairness.

use chrono::Utc;
use proptest::prelude::*;

use sift_core::config::{Bm25Params, DynamicKPolicy};
use sift_core::index::{Chunk, CorpusStats, IndexBuild, Posting, TermStat};
use sift_core::traits::IIndexStore;
use sift_retrieval::{bm25, dynamic_k, rrf};
use sift_storage::StoreEngine;

/// Store with two chunks of equal length where only the term frequency of
/// "needle" differs.
fn store_with_tf_pair(len: u64, tf_low: f64, tf_high: f64) -> StoreEngine {
    let store = StoreEngine::open_in_memory().unwrap();
    let chunks = vec![
        Chunk {
            id: "low#0".to_string(),
            doc_id: "low".to_string(),
            seq: 0,
            start: 0,
            end: 0,
            text: String::new(),
            token_len: len,
        },
        Chunk {
            id: "high#0".to_string(),
            doc_id: "high".to_string(),
            seq: 0,
            start: 0,
            end: 0,
            text: String::new(),
            token_len: len,
        },
    ];
    let postings = vec![
        Posting {
            term: "needle".to_string(),
            chunk_id: "low#0".to_string(),
            tf: tf_low,
        },
        Posting {
            term: "needle".to_string(),
            chunk_id: "high#0".to_string(),
            tf: tf_high,
        },
    ];
    let term_stats = vec![TermStat {
        term: "needle".to_string(),
        df: 2,
    }];
    let corpus = CorpusStats {
        total_chunks: 2,
        avg_chunk_len: len as f64,
    };
    let build = IndexBuild {
        id: "prop".to_string(),
        corpus_fingerprint: "prop".to_string(),
        chunk_count: 2,
        posting_count: 2,
        embedded: false,
        built_at: Utc::now(),
    };
    store
        .replace_index(&chunks, None, &postings, &term_stats, &corpus, &build)
        .unwrap();
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Adding an occurrence of a query term never decreases the score.
    #[test]
    fn bm25_tf_monotonicity(
        len in 1u64..500,
        tf in 1u32..50,
        extra in 1u32..10,
        k1 in 0.0f64..3.0,
        b in 0.0f64..1.0,
    ) {
        let store = store_with_tf_pair(len, tf as f64, (tf + extra) as f64);
        let params = Bm25Params { k1, b };
        let ranked = bm25::bm25_search(&store, &["needle".to_string()], &params).unwrap();

        prop_assert_eq!(ranked.len(), 2);
        let low = ranked.iter().find(|(id, _)| id == "low#0").unwrap().1;
        let high = ranked.iter().find(|(id, _)| id == "high#0").unwrap().1;
        prop_assert!(high >= low);
        // k1 scales the gain; away from zero it must be strict.
        if k1 >= 0.01 {
            prop_assert!(high > low);
        }
    }

    /// A chunk ranked #1 in both signals beats any chunk ranked #1 in
    /// only one signal.
    #[test]
    fn rrf_double_first_beats_single_first(
        k in 1u32..200,
        tail in 0usize..20,
    ) {
        let mut lexical = vec![("both".to_string(), 1.0)];
        let mut semantic = vec![("both".to_string(), 1.0)];
        for i in 0..tail {
            lexical.push((format!("lex{i}"), 0.5));
            semantic.push((format!("sem{i}"), 0.5));
        }
        // A competitor that is #1 in one signal only.
        let solo = vec![("solo".to_string(), 1.0)];

        let fused_both = rrf::fuse(&lexical, &semantic, k);
        let fused_solo = rrf::fuse(&solo, &[], k);

        let both_score = fused_both
            .iter()
            .find(|c| c.chunk_id == "both")
            .unwrap()
            .score;
        let solo_score = fused_solo[0].score;
        prop_assert!(both_score > solo_score);
    }

    /// Dynamic-k never returns fewer than min (when available) nor more
    /// than max.
    #[test]
    fn dynamic_k_respects_bounds(
        scores in proptest::collection::vec(0.0f64..10.0, 1..40),
        cutoff in 0.01f64..1.0,
        min in 1usize..6,
        max in 6usize..20,
    ) {
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        let policy = DynamicKPolicy { enabled: true, cutoff, min_results: min, max_results: max };

        let cut = dynamic_k::cut_length(&sorted, &policy);
        prop_assert!(cut <= max);
        prop_assert!(cut <= sorted.len());
        prop_assert!(cut >= min.min(sorted.len().min(max)));
    }
}
