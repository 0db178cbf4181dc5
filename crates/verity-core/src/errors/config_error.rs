/// Invalid or missing configuration. Never recoverable by retrying.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("chunk_overlap ({overlap}) must be smaller than chunk_size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("unknown embedding provider: {name}")]
    UnknownProvider { name: String },

    #[error("missing required input: {what}")]
    MissingInput { what: String },

    #[error("environment variable {var} is not set")]
    MissingApiKey { var: String },

    #[error("failed to read config {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },
}
