//! Cloud API embedding provider.
//!
//! Blocking HTTP client for OpenAI-compatible `/v1/embeddings` endpoints
//! (OpenAI, HuggingFace TEI, vLLM, …). Connection failures, timeouts, 429 and
//! 5xx are retried with exponential backoff; other 4xx responses are not.
//! Once retries are exhausted the provider refuses requests for a short
//! cool-down, then tries the endpoint again.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verity_core::errors::{EmbeddingError, VerityError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

/// Endpoint used when the config does not name one.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

const RETRY_BASE_MS: u64 = 100;
const MAX_COOLDOWN: Duration = Duration::from_secs(60);

/// OpenAI-compatible embedding provider.
pub struct ApiProvider {
    client: reqwest::blocking::Client,
    model: String,
    api_key: Option<String>,
    endpoint: String,
    dimensions: usize,
    max_retries: u32,
    cooldown: Duration,
    unavailable_until: Mutex<Option<Instant>>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

/// Outcome of one failed attempt.
enum AttemptError {
    /// Connection failure, timeout, 429 or 5xx.
    Transient(EmbeddingError),
    /// The endpoint answered and refused or garbled the request.
    Permanent(EmbeddingError),
}

impl ApiProvider {
    /// Create a new API provider. The cool-down after exhausted retries
    /// defaults to the next backoff step, capped at a minute.
    pub fn new(
        model: String,
        api_key: Option<String>,
        endpoint: Option<String>,
        dimensions: usize,
        timeout: Duration,
        max_retries: u32,
    ) -> VerityResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            model,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            dimensions,
            max_retries,
            cooldown: backoff(max_retries.saturating_add(1)).min(MAX_COOLDOWN),
            unavailable_until: Mutex::new(None),
        })
    }

    /// Override how long the provider stays unavailable after a failed cycle
    /// (at most a minute).
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown.min(MAX_COOLDOWN);
        self
    }

    /// Send an embedding request with retry and exponential backoff.
    fn request_embeddings(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut attempt = 0u32;
        loop {
            match self.send_request(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(AttemptError::Permanent(e)) => {
                    warn!(attempt, error = %e, "API embedding request rejected");
                    return Err(e.into());
                }
                Err(AttemptError::Transient(e)) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "API embedding request failed; retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(AttemptError::Transient(e)) => {
                    warn!(
                        attempt,
                        cooldown_ms = self.cooldown.as_millis() as u64,
                        error = %e,
                        "API embedding retries exhausted"
                    );
                    self.set_unavailable_until(Some(Instant::now() + self.cooldown));
                    return Err(e.into());
                }
            }
        }
    }

    fn send_request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AttemptError> {
        let mut request = self.client.post(&self.endpoint).json(&EmbedRequest {
            model: &self.model,
            input: texts,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            AttemptError::Transient(EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let err = EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            };
            return Err(if status.as_u16() == 429 || status.is_server_error() {
                AttemptError::Transient(err)
            } else {
                AttemptError::Permanent(err)
            });
        }

        let resp: EmbedResponse = response.json().map_err(|e| {
            AttemptError::Permanent(EmbeddingError::InferenceFailed {
                reason: format!("JSON parse error: {e}"),
            })
        })?;
        debug!(inputs = texts.len(), returned = resp.data.len(), "API embeddings received");

        Ok(Self::in_input_order(resp.data))
    }

    /// Servers may return `data` out of order; `index` says where each belongs.
    fn in_input_order(mut data: Vec<EmbedData>) -> Vec<Vec<f32>> {
        if data.iter().all(|d| d.index.is_some()) {
            data.sort_by_key(|d| d.index);
        }
        data.into_iter().map(|d| d.embedding).collect()
    }

    /// End any cool-down now (e.g. after the endpoint is known to be back).
    pub fn reset_availability(&self) {
        self.set_unavailable_until(None);
    }

    fn set_unavailable_until(&self, until: Option<Instant>) {
        *self
            .unavailable_until
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = until;
    }
}

fn backoff(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(RETRY_BASE_MS.saturating_mul(factor))
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            VerityError::from(EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
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
        "api"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        match *self
            .unavailable_until
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
        {
            Some(until) => Instant::now() >= until,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_data_is_reordered_by_index() {
        let data = vec![
            EmbedData {
                index: Some(1),
                embedding: vec![2.0],
            },
            EmbedData {
                index: Some(0),
                embedding: vec![1.0],
            },
        ];
        assert_eq!(ApiProvider::in_input_order(data), vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        assert_eq!(backoff(1), Duration::from_millis(100));
        assert_eq!(backoff(3), Duration::from_millis(400));
        assert_eq!(backoff(200), Duration::from_millis(u64::MAX));
    }

    fn unreachable(cooldown: Duration) -> ApiProvider {
        // Port 9 (discard) is closed on test machines; connection is refused fast.
        ApiProvider::new(
            "text-embedding-3-small".to_string(),
            None,
            Some("http://127.0.0.1:9/v1/embeddings".to_string()),
            8,
            Duration::from_millis(500),
            0,
        )
        .unwrap()
        .with_cooldown(cooldown)
    }

    #[test]
    fn unreachable_endpoint_cools_down_then_retries() {
        let p = unreachable(Duration::from_secs(60));
        assert!(matches!(
            p.embed("hello").unwrap_err(),
            VerityError::Embedding(EmbeddingError::InferenceFailed { .. })
        ));
        assert!(!p.is_available());
        assert!(matches!(
            p.embed("hello").unwrap_err(),
            VerityError::Embedding(EmbeddingError::ProviderUnavailable { .. })
        ));

        p.reset_availability();
        assert!(p.is_available());
    }

    #[test]
    fn cool_down_expires_on_its_own() {
        let p = unreachable(Duration::from_millis(50));
        assert!(p.embed("hello").is_err());
        assert!(!p.is_available());
        std::thread::sleep(Duration::from_millis(80));
        assert!(p.is_available());
        // The endpoint is contacted again rather than refused outright.
        assert!(matches!(
            p.embed("hello").unwrap_err(),
            VerityError::Embedding(EmbeddingError::InferenceFailed { .. })
        ));
    }
}
