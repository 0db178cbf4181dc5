//! # verity-retrieval
//!
//! Labeled records in, nearest evidence out.
//!
//! ```text
//! Record ──► Chunker ──► EmbeddingEngine ──► FlatIndex ──► persistence (index.vec + chunks.json)
//!                                                │
//! query ───────────────► EmbeddingEngine ────────┴──► Retriever::search ──► RetrievalResult
//! ```
//!
//! The [`Retriever`] owns the single active index and swaps it atomically on
//! build or load.

pub mod chunker;
pub mod index;
pub mod persistence;
pub mod retriever;

pub use chunker::Chunker;
pub use index::{build_index, FlatIndex};
pub use retriever::Retriever;
