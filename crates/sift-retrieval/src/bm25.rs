//! BM25 lexical scoring over the stored inverted index.

use std::collections::HashMap;

use sift_core::config::Bm25Params;
use sift_core::errors::SiftResult;
use sift_core::traits::IIndexStore;

/// Score chunks by BM25 for the given query terms.
///
/// Returns `(chunk_id, score)` pairs, best first. Terms with no postings
/// contribute nothing; a query of entirely unknown terms yields an empty
/// list, which is a valid result, not an error.
pub fn bm25_search(
    store: &dyn IIndexStore,
    query_terms: &[String],
    params: &Bm25Params,
) -> SiftResult<Vec<(String, f64)>> {
    let Some(corpus) = store.corpus_stats()? else {
        return Ok(Vec::new());
    };
    if corpus.total_chunks == 0 || query_terms.is_empty() {
        return Ok(Vec::new());
    }
    let n = corpus.total_chunks as f64;
    let avg_len = corpus.avg_chunk_len.max(f64::EPSILON);

    let df_map = store.term_stats(query_terms)?;
    let postings_map = store.postings_for_terms(query_terms)?;
    let length_map = store.chunk_lengths()?;

    let mut scores: HashMap<String, f64> = HashMap::new();

    for term in query_terms {
        let Some(&df) = df_map.get(term) else {
            continue;
        };
        if df == 0 {
            continue;
        }
        let idf = ((n - df as f64 + 0.5) / (df as f64 + 0.5) + 1.0).ln();

        for (chunk_id, tf) in postings_map.get(term).into_iter().flatten() {
            let tf = *tf;
            let len = length_map
                .get(chunk_id)
                .map(|&l| l as f64)
                .unwrap_or(avg_len);
            let numerator = tf * (params.k1 + 1.0);
            let denominator = tf + params.k1 * (1.0 - params.b + params.b * len / avg_len);
            *scores.entry(chunk_id.clone()).or_default() += idf * numerator / denominator;
        }
    }

    let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();
    // Descending score; chunk id breaks ties so ranks are deterministic.
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok(ranked)
}
