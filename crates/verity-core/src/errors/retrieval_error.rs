/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("no index is loaded; build or load one before searching")]
    IndexNotLoaded,

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
