//! # verity-core
//!
//! Foundation crate for the Verity fact-verification pipeline.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VerityConfig;
pub use errors::{VerityError, VerityResult};
pub use models::{
    Chunk, DistanceMetric, EvidenceTag, Record, RetrievalResult, SearchHit, Verdict,
};
