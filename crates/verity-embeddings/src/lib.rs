//! # verity-embeddings
//!
//! Turns chunk and query text into fixed-dimension vectors.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── Provider (exactly one; never switched at runtime)
//! │   ├── ApiProvider (OpenAI-compatible /v1/embeddings)
//! │   ├── OllamaProvider (local)
//! │   └── HashingProvider (offline, deterministic)
//! ├── QueryCache (moka, blake3-keyed)
//! └── Validation (dimension + finiteness)
//! ```
//!
//! There is no fallback chain: vectors from two providers live in different
//! spaces, so an index built by one cannot be searched with the other.

pub mod cache;
pub mod engine;
pub mod providers;
pub mod validation;

pub use cache::QueryCache;
pub use engine::{DocumentEmbedding, EmbeddingEngine};
pub use providers::{create_provider, ApiProvider, HashingProvider, OllamaProvider};
