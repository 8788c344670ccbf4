/// Index-build errors. A failed build never commits; the prior index
/// stays authoritative and queryable.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index build failed during {stage}: {reason}")]
    BuildFailed { stage: String, reason: String },

    #[error("chunking policy rejected: {reason}")]
    InvalidPolicy { reason: String },
}
