//! Error taxonomy for the Sift engine, one enum per subsystem.

mod deploy_error;
mod embedding_error;
mod eval_error;
mod index_error;
mod search_error;
mod storage_error;

pub use deploy_error::DeployError;
pub use embedding_error::EmbeddingError;
pub use eval_error::EvalError;
pub use index_error::IndexError;
pub use search_error::SearchError;
pub use storage_error::StorageError;

/// Top-level error type composing all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

/// Convenience alias used across the workspace.
pub type SiftResult<T> = Result<T, SiftError>;
