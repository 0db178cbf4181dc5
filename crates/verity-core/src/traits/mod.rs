//! Seams between components. Each has a production implementation in a
//! sibling crate and in-process fakes in tests.

mod embedding;
mod reasoning;
mod retriever;

pub use embedding::IEmbeddingProvider;
pub use reasoning::IReasoningBackend;
pub use retriever::IRetriever;
