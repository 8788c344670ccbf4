/// External embedding service errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding service failed after {attempts} attempt(s): {reason}")]
    ServiceFailed { attempts: u32, reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("embedding response malformed: {reason}")]
    MalformedResponse { reason: String },
}
