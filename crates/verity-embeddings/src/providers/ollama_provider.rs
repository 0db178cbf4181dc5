//! Ollama local embedding provider.
//!
//! Connects to a local Ollama instance for embedding generation.
//! Must pass a health check before it reports itself available.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verity_core::errors::{EmbeddingError, VerityError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama local embedding provider.
pub struct OllamaProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// `base_url` defaults to `http://localhost:11434` if `None`.
    pub fn new(
        model: String,
        dimensions: usize,
        base_url: Option<String>,
        timeout: Duration,
    ) -> VerityResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            dimensions,
            available: AtomicBool::new(false), // Must pass health check first.
        })
    }

    /// Check if the Ollama server is reachable.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send();

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    fn request_embeddings(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&OllamaEmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("Ollama returned {status}: {body}"),
            }
            .into());
        }

        let resp: OllamaEmbedResponse =
            response.json().map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama JSON parse error: {e}"),
            })?;
        Ok(resp.embeddings)
    }
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            VerityError::from(EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            })
        })
    }

    fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
