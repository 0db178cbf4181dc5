use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigurationError;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api", "ollama", "hashing".
    pub provider: String,
    /// Model identifier sent to the provider and recorded in the index sidecar.
    pub model: String,
    /// Provider endpoint. `None` uses the provider's default.
    pub endpoint: Option<String>,
    /// Environment variable holding the API key ("api" provider only).
    pub api_key_env: Option<String>,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// Texts per provider request during index build.
    pub batch_size: usize,
    /// Query embedding cache max entries. 0 disables the cache.
    pub query_cache_size: u64,
    /// Per-request HTTP timeout.
    pub timeout_ms: u64,
    /// Retries for remote providers, with exponential backoff.
    pub max_retries: u32,
    /// Embed build batches on the rayon pool.
    pub parallel_build: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: None,
            api_key_env: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            parallel_build: defaults::DEFAULT_PARALLEL_BUILD,
        }
    }
}

impl EmbeddingConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.dimensions == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "embedding.dimensions".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "embedding.batch_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                field: "embedding.model".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
