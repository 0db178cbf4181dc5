use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigurationError;

/// Where document previews are cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewBoundary {
    /// Exactly `preview_chars` characters.
    Hard,
    /// Last sentence end within the limit, else last whitespace, else hard.
    #[default]
    Sentence,
}

/// How the backend's free text is reduced to a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictParsing {
    /// Read the trailing `Final answer:` line, negation-aware keyword fallback.
    #[default]
    Conclusion,
    /// Any occurrence of "true" means true.
    Keyword,
}

/// Evidence interpreter and reasoning backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Chat model identifier.
    pub model: String,
    /// OpenAI-compatible chat-completions URL.
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Labels strictly above this value are tagged "true".
    pub true_label_cutoff: i64,
    /// Maximum characters of each document shown to the model.
    pub preview_chars: usize,
    pub preview_boundary: PreviewBoundary,
    pub verdict_parsing: VerdictParsing,
    /// Per-request timeout for the backend round-trip.
    pub timeout_ms: u64,
    /// Extra attempts after a transient failure. 0 = no retries.
    pub max_retries: u32,
    /// Base delay, doubled on each retry.
    pub retry_backoff_ms: u64,
    /// Documents retrieved per prediction when the caller does not say.
    pub default_k: usize,
    /// Sampling temperature; `None` leaves the backend default.
    pub temperature: Option<f32>,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_REASONING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_REASONING_ENDPOINT.to_string(),
            api_key_env: defaults::DEFAULT_REASONING_API_KEY_ENV.to_string(),
            true_label_cutoff: defaults::DEFAULT_TRUE_LABEL_CUTOFF,
            preview_chars: defaults::DEFAULT_PREVIEW_CHARS,
            preview_boundary: PreviewBoundary::default(),
            verdict_parsing: VerdictParsing::default(),
            timeout_ms: defaults::DEFAULT_REASONING_TIMEOUT_MS,
            max_retries: defaults::DEFAULT_REASONING_MAX_RETRIES,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS,
            default_k: defaults::DEFAULT_TOP_K,
            temperature: None,
        }
    }
}

impl ReasoningConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.preview_chars == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "reasoning.preview_chars".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "reasoning.timeout_ms".to_string(),
                reason: "a zero timeout would fail every request".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                field: "reasoning.model".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
