//! OpenAI-compatible chat-completions backend (Groq, OpenAI, vLLM, Ollama's
//! `/v1` endpoint …).
//!
//! One blocking POST per attempt, bounded by the configured timeout. Timeouts,
//! connection failures, 429 and 5xx are retried up to `max_retries` times with
//! exponential backoff; other 4xx responses and malformed bodies are not.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, warn};
use verity_core::config::ReasoningConfig;
use verity_core::errors::{ConfigurationError, InterpretationError, VerityResult};
use verity_core::models::ReasoningRequest;
use verity_core::traits::IReasoningBackend;

const BODY_EXCERPT_CHARS: usize = 200;

pub struct ChatCompletionsBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout_ms: u64,
    max_retries: u32,
    retry_backoff_ms: u64,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsBackend {
    /// Build from config, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &ReasoningConfig) -> VerityResult<Self> {
        let key = std::env::var(&config.api_key_env).map_err(|_| ConfigurationError::MissingApiKey {
            var: config.api_key_env.clone(),
        })?;
        Self::with_api_key(config, Some(key))
    }

    /// Build with an explicit key; `None` sends no `Authorization` header
    /// (local servers).
    pub fn with_api_key(config: &ReasoningConfig, api_key: Option<String>) -> VerityResult<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InterpretationError::BackendUnavailable {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            timeout_ms: config.timeout_ms,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send_once(&self, request: &ReasoningRequest) -> Result<String, InterpretationError> {
        let mut http = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(BODY_EXCERPT_CHARS)
                .collect();
            return Err(if status.as_u16() == 429 || status.is_server_error() {
                InterpretationError::BackendUnavailable {
                    reason: format!("status {status}: {body}"),
                }
            } else {
                InterpretationError::Rejected {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        let parsed: ChatResponse = response.json().map_err(|e| {
            if e.is_timeout() {
                InterpretationError::Timeout {
                    timeout_ms: self.timeout_ms,
                }
            } else {
                InterpretationError::MalformedResponse {
                    reason: format!("invalid JSON body: {e}"),
                }
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| InterpretationError::MalformedResponse {
                reason: "response has no choices[0].message.content".to_string(),
            })
    }

    fn transport_error(&self, e: reqwest::Error) -> InterpretationError {
        if e.is_timeout() {
            InterpretationError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            InterpretationError::BackendUnavailable {
                reason: e.to_string(),
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

fn is_retryable(e: &InterpretationError) -> bool {
    matches!(
        e,
        InterpretationError::Timeout { .. } | InterpretationError::BackendUnavailable { .. }
    )
}

impl IReasoningBackend for ChatCompletionsBackend {
    fn complete(&self, request: &ReasoningRequest) -> VerityResult<String> {
        let mut attempt = 0u32;
        loop {
            let start = Instant::now();
            match self.send_once(request) {
                Ok(text) => {
                    debug!(
                        model = %request.model,
                        attempt,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "completion received"
                    );
                    return Ok(text);
                }
                Err(e) if is_retryable(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "reasoning request failed; retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn name(&self) -> &str {
        "chat-completions"
    }
}
