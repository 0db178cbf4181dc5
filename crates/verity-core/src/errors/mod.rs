//! Error hierarchy.
//!
//! One `thiserror` enum per subsystem, aggregated by [`VerityError`].

mod config_error;
mod embedding_error;
mod interpretation_error;
mod persistence_error;
mod retrieval_error;

pub use config_error::ConfigurationError;
pub use embedding_error::EmbeddingError;
pub use interpretation_error::InterpretationError;
pub use persistence_error::PersistenceError;
pub use retrieval_error::RetrievalError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum VerityError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("interpretation error: {0}")]
    Interpretation(#[from] InterpretationError),
}

/// Convenience alias used across all crates.
pub type VerityResult<T> = Result<T, VerityError>;

impl VerityError {
    /// Whether retrying the same call could succeed.
    ///
    /// Only transient backend conditions qualify; configuration and data
    /// errors never do.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Interpretation(
                InterpretationError::BackendUnavailable { .. } | InterpretationError::Timeout { .. }
            ) | Self::Embedding(EmbeddingError::InferenceFailed { .. })
        )
    }
}
