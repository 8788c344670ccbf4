/// Evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("golden test set is empty")]
    EmptyTestSet,

    #[error("golden test set malformed: {reason}")]
    MalformedTestSet { reason: String },

    #[error("comparison failed: {reason}")]
    ComparisonFailed { reason: String },
}
