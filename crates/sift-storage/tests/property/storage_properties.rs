//! Property tests: build replacement roundtrips arbitrary chunk content.

use chrono::Utc;
use proptest::prelude::*;

use sift_core::index::{Chunk, CorpusStats, IndexBuild, Posting, TermStat};
use sift_core::traits::IIndexStore;
use sift_storage::StoreEngine;

fn make_build(chunk_count: u64) -> IndexBuild {
    IndexBuild {
        id: "prop-build".to_string(),
        corpus_fingerprint: "prop-fp".to_string(),
        chunk_count,
        posting_count: 0,
        embedded: false,
        built_at: Utc::now(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn chunk_text_roundtrips(text in "[a-zA-Z0-9 .,;!?]{0,200}") {
        let store = StoreEngine::open_in_memory().unwrap();
        let chunk = Chunk {
            id: "d#0".to_string(),
            doc_id: "d".to_string(),
            seq: 0,
            start: 0,
            end: text.chars().count(),
            text: text.clone(),
            token_len: text.split_whitespace().count() as u64,
        };
        let corpus = CorpusStats { total_chunks: 1, avg_chunk_len: chunk.token_len as f64 };
        store
            .replace_index(&[chunk], None, &[], &[], &corpus, &make_build(1))
            .unwrap();

        let loaded = store.get_chunk("d#0").unwrap().unwrap();
        prop_assert_eq!(&loaded.text, &text);
        prop_assert_eq!(loaded.end, text.chars().count());
    }

    #[test]
    fn postings_roundtrip_by_term(
        terms in proptest::collection::hash_set("[a-z]{1,10}", 1..20)
    ) {
        let store = StoreEngine::open_in_memory().unwrap();
        let chunk = Chunk {
            id: "d#0".to_string(),
            doc_id: "d".to_string(),
            seq: 0,
            start: 0,
            end: 0,
            text: String::new(),
            token_len: terms.len() as u64,
        };
        let postings: Vec<Posting> = terms
            .iter()
            .map(|t| Posting { term: t.clone(), chunk_id: "d#0".to_string(), tf: 1.0 })
            .collect();
        let term_stats: Vec<TermStat> = terms
            .iter()
            .map(|t| TermStat { term: t.clone(), df: 1 })
            .collect();
        let corpus = CorpusStats { total_chunks: 1, avg_chunk_len: terms.len() as f64 };
        store
            .replace_index(&[chunk], None, &postings, &term_stats, &corpus, &make_build(1))
            .unwrap();

        let query: Vec<String> = terms.iter().cloned().collect();
        let loaded = store.postings_for_terms(&query).unwrap();
        prop_assert_eq!(loaded.len(), terms.len());
        let df = store.term_stats(&query).unwrap();
        prop_assert!(df.values().all(|&d| d == 1));
    }
}
