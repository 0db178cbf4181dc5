/// Index save/load errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("index path not found: {path}")]
    NotFound { path: String },

    #[error("I/O error at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("corrupt index at {path}: {details}")]
    Corrupt { path: String, details: String },

    #[error("unsupported index format version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("index was built with '{found}' but the active embedding model is '{expected}'")]
    ModelMismatch { expected: String, found: String },

    #[error("no index has been built or loaded")]
    IndexNotBuilt,
}
