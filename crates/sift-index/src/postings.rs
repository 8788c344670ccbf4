//! Lexical statistics: postings, document frequencies, corpus aggregates.

use std::collections::HashMap;

use sift_core::index::{Chunk, CorpusStats, Posting, TermStat};

use crate::tokenizer::tokenize;

/// Build the inverted index structures from a chunk set.
///
/// Also fills in each chunk's `token_len`, which BM25 length
/// normalization reads at query time.
pub fn build_postings(chunks: &mut [Chunk]) -> (Vec<Posting>, Vec<TermStat>, CorpusStats) {
    let mut postings: Vec<Posting> = Vec::new();
    let mut doc_freq: HashMap<String, u64> = HashMap::new();
    let mut total_tokens: u64 = 0;

    for chunk in chunks.iter_mut() {
        let tokens = tokenize(&chunk.text);
        chunk.token_len = tokens.len() as u64;
        total_tokens += chunk.token_len;

        let mut tf_counts: HashMap<String, u64> = HashMap::new();
        for token in tokens {
            *tf_counts.entry(token).or_default() += 1;
        }

        // Each distinct term in this chunk bumps its document frequency once.
        for (term, count) in tf_counts {
            *doc_freq.entry(term.clone()).or_default() += 1;
            postings.push(Posting {
                term,
                chunk_id: chunk.id.clone(),
                tf: count as f64,
            });
        }
    }

    let total_chunks = chunks.len() as u64;
    let avg_chunk_len = if total_chunks > 0 {
        total_tokens as f64 / total_chunks as f64
    } else {
        0.0
    };

    let term_stats: Vec<TermStat> = doc_freq
        .into_iter()
        .map(|(term, df)| TermStat { term, df })
        .collect();

    (
        postings,
        term_stats,
        CorpusStats {
            total_chunks,
            avg_chunk_len,
        },
    )
}
