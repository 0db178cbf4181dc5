use crate::errors::VerityResult;
use crate::models::RetrievalResult;

/// Top-k semantic search over the labeled corpus.
pub trait IRetriever: Send + Sync {
    /// Return at most `k` nearest chunks, nearest first.
    fn search(&self, query: &str, k: usize) -> VerityResult<RetrievalResult>;
}
