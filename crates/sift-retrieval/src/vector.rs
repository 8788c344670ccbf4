//! Cosine similarity over stored chunk embeddings.

use sift_core::errors::SiftResult;
use sift_core::traits::IIndexStore;

/// Rank chunks by cosine similarity to a query embedding, best first.
///
/// Returns an empty list when no embeddings are stored (the build ran
/// without them) or the query embedding has zero norm. Stored vectors
/// with a different dimensionality are skipped.
pub fn vector_search(
    store: &dyn IIndexStore,
    query_embedding: &[f32],
) -> SiftResult<Vec<(String, f64)>> {
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(Vec::new());
    }

    let mut scored: Vec<(String, f64)> = Vec::new();
    for (chunk_id, stored) in store.chunk_embeddings()? {
        if stored.len() != query_embedding.len() {
            continue;
        }
        let sim = cosine_similarity(query_embedding, &stored);
        if sim > 0.0 {
            scored.push((chunk_id, sim));
        }
    }

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok(scored)
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![0.5f32, 0.5, 0.1];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn zero_norm_is_guarded() {
        let a = vec![0.0f32, 0.0];
        let b = vec![1.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
