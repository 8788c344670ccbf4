/// Query-time errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no index build exists; run indexing before querying")]
    IndexNotFound,

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
