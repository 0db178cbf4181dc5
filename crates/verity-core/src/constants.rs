/// Verity system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// On-disk index format version. Bumped on any incompatible layout change.
pub const INDEX_FORMAT_VERSION: u8 = 1;

/// Magic bytes at the start of every persisted vector file.
pub const INDEX_MAGIC: [u8; 4] = *b"VRTY";

/// File name of the binary vector blob inside an index directory.
pub const VECTORS_FILENAME: &str = "index.vec";

/// File name of the chunk/metadata sidecar inside an index directory.
pub const SIDECAR_FILENAME: &str = "chunks.json";

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "VERITY_LOG";

/// Upper bound on vectors accepted from a single persisted index.
pub const MAX_PERSISTED_VECTORS: u64 = 50_000_000;
