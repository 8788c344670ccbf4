use crate::errors::{EmbeddingError, SiftError, SiftResult};

/// Embedding generation provider.
///
/// The capability boundary to the external embedding service:
/// `embed_batch(texts) -> fixed-length vectors`. Implementations must have
/// a bounded request timeout; failures surface as errors, never hang.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> SiftResult<Vec<f32>> {
        let batch = self.embed_batch(std::slice::from_ref(&text.to_string()))?;
        batch.into_iter().next().ok_or_else(|| {
            SiftError::Embedding(EmbeddingError::MalformedResponse {
                reason: "provider returned an empty batch".to_string(),
            })
        })
    }

    /// Embed a batch of texts. One vector per input, same order.
    fn embed_batch(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
