//! Shared data model: records, chunks, search results, verdicts.

mod chunk;
mod metric;
mod reasoning;
mod record;
mod retrieval;
mod verdict;

pub use chunk::Chunk;
pub use metric::DistanceMetric;
pub use reasoning::{ChatMessage, ChatRole, ReasoningRequest};
pub use record::Record;
pub use retrieval::{RetrievalResult, SearchHit};
pub use verdict::{EvidenceTag, Verdict};
