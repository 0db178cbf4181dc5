//! Provider registry.
//!
//! - `api`: OpenAI-compatible HTTP endpoint
//! - `ollama`: local Ollama server
//! - `hashing`: deterministic, offline, always available

pub mod api_provider;
pub mod hashing_provider;
pub mod ollama_provider;

pub use api_provider::ApiProvider;
pub use hashing_provider::HashingProvider;
pub use ollama_provider::OllamaProvider;

use std::time::Duration;

use tracing::info;
use verity_core::config::EmbeddingConfig;
use verity_core::errors::{ConfigurationError, EmbeddingError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

/// Create the configured provider.
///
/// Unlike a degradation chain, a provider that cannot be reached is an
/// error: silently swapping providers would put query vectors in a
/// different space from the index.
pub fn create_provider(config: &EmbeddingConfig) -> VerityResult<Box<dyn IEmbeddingProvider>> {
    let timeout = Duration::from_millis(config.timeout_ms);
    match config.provider.as_str() {
        "api" => {
            let api_key = match &config.api_key_env {
                Some(var) => Some(std::env::var(var).map_err(|_| {
                    ConfigurationError::MissingApiKey { var: var.clone() }
                })?),
                None => None,
            };
            let provider = ApiProvider::new(
                config.model.clone(),
                api_key,
                config.endpoint.clone(),
                config.dimensions,
                timeout,
                config.max_retries,
            )?;
            info!(provider = "api", model = %config.model, "embedding provider configured");
            Ok(Box::new(provider))
        }
        "ollama" => {
            let provider = OllamaProvider::new(
                config.model.clone(),
                config.dimensions,
                config.endpoint.clone(),
                timeout,
            )?;
            if !provider.health_check() {
                return Err(EmbeddingError::ProviderUnavailable {
                    provider: "ollama".to_string(),
                }
                .into());
            }
            info!(provider = "ollama", model = %config.model, "embedding provider connected");
            Ok(Box::new(provider))
        }
        "hashing" => {
            info!(provider = "hashing", dims = config.dimensions, "using hashing embedding provider");
            Ok(Box::new(HashingProvider::new(config.dimensions)))
        }
        other => Err(ConfigurationError::UnknownProvider {
            name: other.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::errors::VerityError;

    #[test]
    fn hashing_provider_is_created() {
        let config = EmbeddingConfig {
            provider: "hashing".to_string(),
            dimensions: 32,
            ..Default::default()
        };
        let p = create_provider(&config).unwrap();
        assert_eq!(p.name(), "hashing");
        assert_eq!(p.dimensions(), 32);
    }

    #[test]
    fn unknown_provider_is_a_configuration_error() {
        let config = EmbeddingConfig {
            provider: "onnx".to_string(),
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(
            err,
            VerityError::Configuration(ConfigurationError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn api_provider_requires_its_key_variable() {
        let config = EmbeddingConfig {
            provider: "api".to_string(),
            api_key_env: Some("VERITY_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("VERITY_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
