//! Evidence interpreter: retrieved chunks in, verdict out.

use std::sync::Arc;

use tracing::debug;
use verity_core::config::ReasoningConfig;
use verity_core::errors::{InterpretationError, VerityResult};
use verity_core::models::{ReasoningRequest, RetrievalResult, Verdict};
use verity_core::traits::IReasoningBackend;

use crate::labels::LabelPolicy;
use crate::preview::truncate_preview;
use crate::prompt::{build_messages, EvidenceLine};
use crate::verdict_parser::parse_verdict;

/// Stateless apart from configuration; safe to share across threads.
pub struct EvidenceInterpreter {
    backend: Arc<dyn IReasoningBackend>,
    config: ReasoningConfig,
    policy: LabelPolicy,
}

impl EvidenceInterpreter {
    pub fn new(backend: Arc<dyn IReasoningBackend>, config: ReasoningConfig) -> VerityResult<Self> {
        config.validate()?;
        let policy = LabelPolicy::from_config(&config);
        Ok(Self {
            backend,
            config,
            policy,
        })
    }

    pub fn config(&self) -> &ReasoningConfig {
        &self.config
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    /// The request that [`interpret`](Self::interpret) would send.
    pub fn build_request(&self, retrieved: &RetrievalResult) -> ReasoningRequest {
        let evidence: Vec<EvidenceLine<'_>> = retrieved
            .chunks()
            .map(|chunk| EvidenceLine {
                tag: self.policy.tag(chunk.label()),
                preview: truncate_preview(
                    &chunk.text,
                    self.config.preview_chars,
                    self.config.preview_boundary,
                ),
            })
            .collect();

        ReasoningRequest {
            model: self.config.model.clone(),
            messages: build_messages(&evidence, self.config.verdict_parsing),
            temperature: self.config.temperature,
        }
    }

    /// Ask the backend to weigh the evidence and parse its conclusion.
    ///
    /// Empty evidence is an error; the backend is not called.
    pub fn interpret(&self, retrieved: &RetrievalResult) -> VerityResult<Verdict> {
        if retrieved.is_empty() {
            return Err(InterpretationError::NoEvidence.into());
        }

        let request = self.build_request(retrieved);
        let reply = self.backend.complete(&request)?;
        let verdict = parse_verdict(&reply, self.config.verdict_parsing)?;
        debug!(
            backend = self.backend.name(),
            documents = retrieved.len(),
            %verdict,
            "evidence interpreted"
        );
        Ok(verdict)
    }
}
