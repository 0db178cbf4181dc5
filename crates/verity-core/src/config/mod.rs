//! Configuration, loaded from TOML. Every section falls back to its defaults.

mod chunking_config;
pub mod defaults;
mod embedding_config;
mod index_config;
mod observability_config;
mod reasoning_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use chunking_config::ChunkingConfig;
pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use observability_config::ObservabilityConfig;
pub use reasoning_config::{PreviewBoundary, ReasoningConfig, VerdictParsing};

use crate::errors::{ConfigurationError, VerityResult};

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerityConfig {
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub reasoning: ReasoningConfig,
    pub observability: ObservabilityConfig,
}

impl VerityConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> VerityResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigurationError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> VerityResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> VerityResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigurationError::Parse {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.chunking.validate()?;
        self.embedding.validate()?;
        self.reasoning.validate()?;
        Ok(())
    }
}
