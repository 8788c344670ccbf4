//! StoreEngine — owns the ConnectionPool and implements IIndexStore.

use std::collections::HashMap;
use std::path::Path;

use sift_core::config::SearchConfig;
use sift_core::errors::SiftResult;
use sift_core::index::{Chunk, CorpusStats, IndexBuild, Posting, TermStat};
use sift_core::results::{Aggregate, ConfigVersion, QueryEval};
use sift_core::traits::IIndexStore;

use crate::migrations;
use crate::pool::ConnectionPool;

/// The persistent index store. Owns the connection pool and provides the
/// full IIndexStore interface.
pub struct StoreEngine {
    pool: ConnectionPool,
}

impl StoreEngine {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> SiftResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory store (for testing). All reads route through the
    /// writer because an in-memory database is private to its connection.
    pub fn open_in_memory() -> SiftResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the write connection.
    fn initialize(&self) -> SiftResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> SiftResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> SiftResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(|conn| f(conn)),
        }
    }
}

impl IIndexStore for StoreEngine {
    fn replace_index(
        &self,
        chunks: &[Chunk],
        embeddings: Option<&[Vec<f32>]>,
        postings: &[Posting],
        term_stats: &[TermStat],
        corpus: &CorpusStats,
        build: &IndexBuild,
    ) -> SiftResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::index_ops::replace_index(
                conn, chunks, embeddings, postings, term_stats, corpus, build,
            )
        })
    }

    fn current_build(&self) -> SiftResult<Option<IndexBuild>> {
        self.with_reader(crate::queries::index_ops::current_build)
    }

    fn corpus_stats(&self) -> SiftResult<Option<CorpusStats>> {
        self.with_reader(crate::queries::index_ops::corpus_stats)
    }

    fn term_stats(&self, terms: &[String]) -> SiftResult<HashMap<String, u64>> {
        self.with_reader(|conn| crate::queries::index_ops::term_stats(conn, terms))
    }

    fn postings_for_terms(
        &self,
        terms: &[String],
    ) -> SiftResult<HashMap<String, Vec<(String, f64)>>> {
        self.with_reader(|conn| crate::queries::index_ops::postings_for_terms(conn, terms))
    }

    fn chunk_lengths(&self) -> SiftResult<HashMap<String, u64>> {
        self.with_reader(crate::queries::chunk_ops::chunk_lengths)
    }

    fn get_chunk(&self, chunk_id: &str) -> SiftResult<Option<Chunk>> {
        self.with_reader(|conn| crate::queries::chunk_ops::get_chunk(conn, chunk_id))
    }

    fn chunk_embeddings(&self) -> SiftResult<Vec<(String, Vec<f32>)>> {
        self.with_reader(crate::queries::chunk_ops::chunk_embeddings)
    }

    fn insert_config(&self, config: &SearchConfig) -> SiftResult<i64> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::config_ops::insert_config(conn, config))
    }

    fn get_config(&self, version: i64) -> SiftResult<Option<ConfigVersion>> {
        self.with_reader(|conn| crate::queries::config_ops::get_config(conn, version))
    }

    fn active_config(&self) -> SiftResult<Option<ConfigVersion>> {
        self.with_reader(crate::queries::config_ops::active_config)
    }

    fn promote_config(&self, version: i64, expected: Option<i64>) -> SiftResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::config_ops::promote_config(conn, version, expected)
        })
    }

    fn insert_query_eval(
        &self,
        config_version: i64,
        build_id: &str,
        eval: &QueryEval,
    ) -> SiftResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::eval_ops::insert_query_eval(conn, config_version, build_id, eval)
        })
    }

    fn insert_aggregate_eval(
        &self,
        config_version: i64,
        build_id: &str,
        aggregate: &Aggregate,
    ) -> SiftResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::eval_ops::insert_aggregate_eval(
                conn,
                config_version,
                build_id,
                aggregate,
            )
        })
    }

    fn latest_aggregate(
        &self,
        config_version: i64,
        build_id: &str,
    ) -> SiftResult<Option<Aggregate>> {
        self.with_reader(|conn| {
            crate::queries::eval_ops::latest_aggregate(conn, config_version, build_id)
        })
    }
}
