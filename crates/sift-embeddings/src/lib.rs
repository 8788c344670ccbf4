//! # sift-embeddings
//!
//! Embedding generation for the Sift engine: an HTTP provider for the
//! external embedding service, a deterministic hash provider for
//! air-gapped use, and a batching engine with bounded retries and a
//! query-embedding cache.
//!
//! There is no silent fallback between providers: a service failure
//! surfaces as an error, and only the searcher's explicit degraded-mode
//! opt-in may downgrade a query to lexical-only.

pub mod engine;
pub mod providers;

pub use engine::{EmbeddingEngine, EngineOptions};
pub use providers::{HashProvider, HttpProvider, HttpProviderConfig};
