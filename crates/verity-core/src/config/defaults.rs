// Single source of truth for all default values.

// --- Chunking ---
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;
pub const DEFAULT_CONTEXT_SEPARATOR: &str = " - ";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-mpnet-base-v2";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_024;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 3;
pub const DEFAULT_PARALLEL_BUILD: bool = true;

// --- Index ---
pub const DEFAULT_VERIFY_MODEL_ON_LOAD: bool = true;

// --- Reasoning ---
pub const DEFAULT_REASONING_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_REASONING_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_REASONING_API_KEY_ENV: &str = "GROQ_KEY";
pub const DEFAULT_TRUE_LABEL_CUTOFF: i64 = 3; // labels 4 and 5 count as true
pub const DEFAULT_PREVIEW_CHARS: usize = 200;
pub const DEFAULT_REASONING_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_REASONING_MAX_RETRIES: u32 = 0;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
pub const DEFAULT_TOP_K: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
