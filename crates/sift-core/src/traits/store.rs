use std::collections::HashMap;

use crate::config::SearchConfig;
use crate::errors::SiftResult;
use crate::index::{Chunk, CorpusStats, IndexBuild, Posting, TermStat};
use crate::results::{Aggregate, ConfigVersion, QueryEval};

/// The persistent index store.
///
/// Durable tables for chunks, postings, term/corpus stats, embeddings,
/// configuration versions, and eval results. Indexing replaces the derived
/// tables atomically; reads see either the old or the new build, never a mix.
pub trait IIndexStore: Send + Sync {
    // --- Index build ---

    /// Atomically replace the entire index with a new build.
    /// `embeddings`, when present, is aligned index-for-index with `chunks`.
    #[allow(clippy::too_many_arguments)]
    fn replace_index(
        &self,
        chunks: &[Chunk],
        embeddings: Option<&[Vec<f32>]>,
        postings: &[Posting],
        term_stats: &[TermStat],
        corpus: &CorpusStats,
        build: &IndexBuild,
    ) -> SiftResult<()>;

    /// The most recently committed build, if any.
    fn current_build(&self) -> SiftResult<Option<IndexBuild>>;

    // --- Lexical reads ---

    fn corpus_stats(&self) -> SiftResult<Option<CorpusStats>>;

    /// Document frequency per term, for the given terms only.
    fn term_stats(&self, terms: &[String]) -> SiftResult<HashMap<String, u64>>;

    /// Postings grouped by term: term → [(chunk_id, tf)].
    fn postings_for_terms(&self, terms: &[String])
        -> SiftResult<HashMap<String, Vec<(String, f64)>>>;

    /// Token length of every chunk, keyed by chunk id.
    fn chunk_lengths(&self) -> SiftResult<HashMap<String, u64>>;

    // --- Chunk reads ---

    fn get_chunk(&self, chunk_id: &str) -> SiftResult<Option<Chunk>>;

    /// All stored (chunk_id, embedding) pairs. Empty when the current
    /// build was indexed without embeddings.
    fn chunk_embeddings(&self) -> SiftResult<Vec<(String, Vec<f32>)>>;

    // --- Configuration versions ---

    /// Store a new immutable config version; returns the version number.
    fn insert_config(&self, config: &SearchConfig) -> SiftResult<i64>;

    fn get_config(&self, version: i64) -> SiftResult<Option<ConfigVersion>>;

    /// The currently active configuration, if one has been promoted.
    fn active_config(&self) -> SiftResult<Option<ConfigVersion>>;

    /// Compare-and-swap the active pointer: promote `version` only if the
    /// active version still equals `expected`. A mismatch fails with
    /// `DeployError::Conflict` and leaves the pointer unchanged.
    fn promote_config(&self, version: i64, expected: Option<i64>) -> SiftResult<()>;

    // --- Eval results ---

    fn insert_query_eval(
        &self,
        config_version: i64,
        build_id: &str,
        eval: &QueryEval,
    ) -> SiftResult<()>;

    fn insert_aggregate_eval(
        &self,
        config_version: i64,
        build_id: &str,
        aggregate: &Aggregate,
    ) -> SiftResult<()>;

    /// The most recent stored aggregate for a config version on a build.
    fn latest_aggregate(
        &self,
        config_version: i64,
        build_id: &str,
    ) -> SiftResult<Option<Aggregate>>;
}
