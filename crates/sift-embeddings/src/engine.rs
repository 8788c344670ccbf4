//! EmbeddingEngine — batching, bounded retries, and a query cache on top
//! of a provider.
//!
//! The indexer uses `embed_corpus` (bounded concurrent batches, any batch
//! failure aborts the whole call); the searcher uses `embed_query`
//! (single text through a moka L1 cache).

use moka::sync::Cache;
use rayon::prelude::*;
use tracing::{debug, warn};

use sift_core::errors::{EmbeddingError, SiftError, SiftResult};
use sift_core::traits::IEmbeddingProvider;

/// Batching and retry options.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Texts per service call.
    pub batch_size: usize,
    /// Retries per batch on service failure before escalating.
    pub max_retries: u32,
    /// Max entries in the query-embedding cache.
    pub cache_size: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            batch_size: 64,
            max_retries: 2,
            cache_size: 1024,
        }
    }
}

/// Wraps a provider with batching, bounded retries, and a query cache.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    options: EngineOptions,
    query_cache: Cache<String, Vec<f32>>,
}

impl EmbeddingEngine {
    pub fn new(provider: Box<dyn IEmbeddingProvider>, options: EngineOptions) -> Self {
        let query_cache = Cache::builder().max_capacity(options.cache_size).build();
        Self {
            provider,
            options,
            query_cache,
        }
    }

    /// Embed a whole corpus of chunk texts.
    ///
    /// Batches run concurrently; output order matches input order. A batch
    /// that keeps failing after the bounded retries fails the entire call,
    /// so the caller never commits a partially embedded build.
    pub fn embed_corpus(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<Vec<Vec<f32>>> = texts
            .par_chunks(self.options.batch_size)
            .map(|batch| self.embed_with_retry(batch))
            .collect::<SiftResult<Vec<_>>>()?;

        debug!(
            texts = texts.len(),
            batches = batches.len(),
            provider = self.provider.name(),
            "corpus embedding complete"
        );
        Ok(batches.into_iter().flatten().collect())
    }

    /// Embed a single query string through the L1 cache.
    pub fn embed_query(&self, query: &str) -> SiftResult<Vec<f32>> {
        let key = blake3::hash(query.as_bytes()).to_hex().to_string();
        if let Some(cached) = self.query_cache.get(&key) {
            return Ok(cached);
        }

        let vec = self
            .embed_with_retry(std::slice::from_ref(&query.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                SiftError::Embedding(EmbeddingError::MalformedResponse {
                    reason: "provider returned an empty batch".to_string(),
                })
            })?;
        self.query_cache.insert(key, vec.clone());
        Ok(vec)
    }

    /// The provider's embedding dimensionality.
    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    /// Retry a batch on service failure, up to the bounded attempt count.
    /// Malformed responses and dimension mismatches are not retried — the
    /// service answered, just wrongly.
    fn embed_with_retry(&self, batch: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        let attempts = self.options.max_retries + 1;
        let mut last_reason = String::new();

        for attempt in 1..=attempts {
            match self.provider.embed_batch(batch) {
                Ok(vectors) => return Ok(vectors),
                Err(SiftError::Embedding(EmbeddingError::ServiceFailed { reason, .. })) => {
                    warn!(attempt, attempts, %reason, "embedding batch failed");
                    last_reason = reason;
                }
                Err(other) => return Err(other),
            }
        }

        Err(SiftError::Embedding(EmbeddingError::ServiceFailed {
            attempts,
            reason: last_reason,
        }))
    }
}
