//! Index pipeline integration tests: build summaries, determinism,
//! all-or-nothing commits on embedding failure.

use sift_core::config::{ChunkUnit, ChunkingPolicy};
use sift_core::errors::{EmbeddingError, IndexError, SiftError, SiftResult};
use sift_core::index::Document;
use sift_core::traits::{IEmbeddingProvider, IIndexStore};
use sift_embeddings::{EmbeddingEngine, EngineOptions, HashProvider};
use sift_index::Indexer;
use sift_storage::StoreEngine;

fn docs() -> Vec<Document> {
    vec![
        Document {
            id: "auth.md".to_string(),
            text: "auth tokens expire after ninety days".to_string(),
        },
        Document {
            id: "webhooks.md".to_string(),
            text: "webhooks retry five times with backoff".to_string(),
        },
    ]
}

fn char_policy(max_size: usize, overlap: usize) -> ChunkingPolicy {
    ChunkingPolicy {
        max_size,
        overlap,
        unit: ChunkUnit::Chars,
    }
}

/// Provider that always fails, for abort-path tests.
struct DownProvider;

impl IEmbeddingProvider for DownProvider {
    fn embed_batch(&self, _texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        Err(SiftError::Embedding(EmbeddingError::ServiceFailed {
            attempts: 1,
            reason: "connection refused".to_string(),
        }))
    }

    fn dimensions(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "down"
    }
}

#[test]
fn build_summary_counts_everything() {
    let store = StoreEngine::open_in_memory().unwrap();
    let indexer = Indexer::new(&store, None);

    let summary = indexer.build(&docs(), &char_policy(200, 0)).unwrap();
    assert_eq!(summary.documents, 2);
    assert_eq!(summary.chunks, 2);
    assert!(summary.terms > 0);
    assert!(summary.postings >= summary.terms);
    assert!(!summary.embedded);

    let build = store.current_build().unwrap().unwrap();
    assert_eq!(build.id, summary.build_id);
    assert_eq!(build.chunk_count, 2);
}

#[test]
fn reindexing_same_input_yields_identical_chunks() {
    let store = StoreEngine::open_in_memory().unwrap();
    let indexer = Indexer::new(&store, None);
    let policy = char_policy(15, 5);

    indexer.build(&docs(), &policy).unwrap();
    let first = store.get_chunk("auth.md#1").unwrap().unwrap();

    indexer.build(&docs(), &policy).unwrap();
    let second = store.get_chunk("auth.md#1").unwrap().unwrap();

    assert_eq!(first.start, second.start);
    assert_eq!(first.end, second.end);
    assert_eq!(first.text, second.text);
}

#[test]
fn same_corpus_has_same_fingerprint_across_builds() {
    let store = StoreEngine::open_in_memory().unwrap();
    let indexer = Indexer::new(&store, None);

    indexer.build(&docs(), &char_policy(200, 0)).unwrap();
    let fp1 = store.current_build().unwrap().unwrap().corpus_fingerprint;
    indexer.build(&docs(), &char_policy(200, 0)).unwrap();
    let fp2 = store.current_build().unwrap().unwrap().corpus_fingerprint;
    assert_eq!(fp1, fp2);
}

#[test]
fn zero_length_documents_yield_zero_chunks() {
    let store = StoreEngine::open_in_memory().unwrap();
    let indexer = Indexer::new(&store, None);
    let corpus = vec![Document {
        id: "empty.md".to_string(),
        text: String::new(),
    }];

    let summary = indexer.build(&corpus, &char_policy(100, 10)).unwrap();
    assert_eq!(summary.chunks, 0);
    assert_eq!(store.corpus_stats().unwrap().unwrap().total_chunks, 0);
}

#[test]
fn embedded_build_stores_one_vector_per_chunk() {
    let store = StoreEngine::open_in_memory().unwrap();
    let engine = EmbeddingEngine::new(Box::new(HashProvider::new(32)), EngineOptions::default());
    let indexer = Indexer::new(&store, Some(&engine));

    let summary = indexer.build(&docs(), &char_policy(200, 0)).unwrap();
    assert!(summary.embedded);

    let embeddings = store.chunk_embeddings().unwrap();
    assert_eq!(embeddings.len(), summary.chunks);
    assert!(embeddings.iter().all(|(_, v)| v.len() == 32));
}

#[test]
fn embedding_failure_aborts_without_partial_commit() {
    let store = StoreEngine::open_in_memory().unwrap();

    // A healthy lexical build first: this must remain authoritative.
    let indexer = Indexer::new(&store, None);
    indexer.build(&docs(), &char_policy(200, 0)).unwrap();
    let before = store.current_build().unwrap().unwrap();

    let engine = EmbeddingEngine::new(
        Box::new(DownProvider),
        EngineOptions {
            batch_size: 1,
            max_retries: 1,
            cache_size: 4,
        },
    );
    let failing = Indexer::new(&store, Some(&engine));
    let err = failing.build(&docs(), &char_policy(200, 0)).unwrap_err();
    assert!(matches!(
        err,
        SiftError::Index(IndexError::BuildFailed { .. })
    ));

    // The prior build is untouched and still queryable.
    let after = store.current_build().unwrap().unwrap();
    assert_eq!(before.id, after.id);
    assert!(store.get_chunk("auth.md#0").unwrap().is_some());
}

#[test]
fn invalid_policy_is_rejected_before_any_work() {
    let store = StoreEngine::open_in_memory().unwrap();
    let indexer = Indexer::new(&store, None);

    let err = indexer.build(&docs(), &char_policy(10, 10)).unwrap_err();
    assert!(matches!(
        err,
        SiftError::Index(IndexError::InvalidPolicy { .. })
    ));
    assert!(store.current_build().unwrap().is_none());
}
