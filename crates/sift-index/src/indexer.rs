//! The index build pipeline: chunk → postings → embeddings → atomic commit.

use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, warn};
use uuid::Uuid;

use sift_core::config::ChunkingPolicy;
use sift_core::errors::{IndexError, SiftError, SiftResult};
use sift_core::index::{BuildSummary, Chunk, Document, IndexBuild};
use sift_core::traits::IIndexStore;
use sift_embeddings::EmbeddingEngine;

use crate::chunker::chunk_document;
use crate::postings::build_postings;

/// Builds a complete index from a corpus snapshot.
///
/// One build is one logical transaction: either the full set of chunks,
/// postings, stats, and embeddings commits, or nothing does and the prior
/// index stays authoritative.
pub struct Indexer<'a> {
    store: &'a dyn IIndexStore,
    /// Present when the build should store embeddings.
    embedder: Option<&'a EmbeddingEngine>,
}

impl<'a> Indexer<'a> {
    pub fn new(store: &'a dyn IIndexStore, embedder: Option<&'a EmbeddingEngine>) -> Self {
        Self { store, embedder }
    }

    /// Build and commit an index for the corpus snapshot.
    pub fn build(
        &self,
        documents: &[Document],
        policy: &ChunkingPolicy,
    ) -> SiftResult<BuildSummary> {
        validate_policy(policy)?;
        let started = Instant::now();

        // Chunking is embarrassingly parallel across documents; collect
        // preserves input order, so chunk ids stay deterministic.
        let mut chunks: Vec<Chunk> = documents
            .par_iter()
            .map(|doc| chunk_document(doc, policy))
            .flatten()
            .collect();

        let (postings, term_stats, corpus) = build_postings(&mut chunks);

        let embeddings = match self.embedder {
            Some(engine) => {
                let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
                let vectors = engine.embed_corpus(&texts).map_err(|e| {
                    warn!(error = %e, "aborting build: embedding failed");
                    SiftError::Index(IndexError::BuildFailed {
                        stage: "embed".to_string(),
                        reason: e.to_string(),
                    })
                })?;
                Some(vectors)
            }
            None => None,
        };

        let build = IndexBuild {
            id: Uuid::new_v4().to_string(),
            corpus_fingerprint: corpus_fingerprint(documents),
            chunk_count: chunks.len() as u64,
            posting_count: postings.len() as u64,
            embedded: embeddings.is_some(),
            built_at: Utc::now(),
        };

        self.store.replace_index(
            &chunks,
            embeddings.as_deref(),
            &postings,
            &term_stats,
            &corpus,
            &build,
        )?;

        let summary = BuildSummary {
            build_id: build.id.clone(),
            documents: documents.len(),
            chunks: chunks.len(),
            terms: term_stats.len(),
            postings: postings.len(),
            embedded: build.embedded,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            build_id = %summary.build_id,
            documents = summary.documents,
            chunks = summary.chunks,
            terms = summary.terms,
            embedded = summary.embedded,
            "index build finished"
        );
        Ok(summary)
    }
}

fn validate_policy(policy: &ChunkingPolicy) -> SiftResult<()> {
    if policy.max_size == 0 {
        return Err(SiftError::Index(IndexError::InvalidPolicy {
            reason: "chunk max_size must be at least 1".to_string(),
        }));
    }
    if policy.overlap >= policy.max_size {
        return Err(SiftError::Index(IndexError::InvalidPolicy {
            reason: format!(
                "chunk overlap ({}) must be smaller than max_size ({})",
                policy.overlap, policy.max_size
            ),
        }));
    }
    Ok(())
}

/// blake3 fingerprint over the corpus snapshot, stable across runs.
fn corpus_fingerprint(documents: &[Document]) -> String {
    let mut hasher = blake3::Hasher::new();
    for doc in documents {
        hasher.update(doc.id.as_bytes());
        hasher.update(&[0]);
        hasher.update(doc.text.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize().to_hex().to_string()
}
