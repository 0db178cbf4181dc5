//! End-to-end prediction: (title, text) → retrieval → interpretation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use verity_core::errors::VerityResult;
use verity_core::models::{RetrievalResult, Verdict};
use verity_core::traits::IRetriever;

use crate::interpreter::EvidenceInterpreter;

/// A verdict together with the evidence it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub verdict: Verdict,
    pub query: String,
    pub evidence: RetrievalResult,
}

pub struct Predictor {
    retriever: Arc<dyn IRetriever>,
    interpreter: Arc<EvidenceInterpreter>,
}

impl Predictor {
    pub fn new(retriever: Arc<dyn IRetriever>, interpreter: Arc<EvidenceInterpreter>) -> Self {
        Self {
            retriever,
            interpreter,
        }
    }

    /// The retrieval query for a news item.
    pub fn build_query(title: &str, text: &str) -> String {
        format!("Title: {title}\n\nText: {text}")
    }

    /// Number of documents retrieved by [`predict_default`](Self::predict_default).
    pub fn default_k(&self) -> usize {
        self.interpreter.config().default_k
    }

    pub fn predict(&self, title: &str, text: &str, k: usize) -> VerityResult<Verdict> {
        Ok(self.predict_with_evidence(title, text, k)?.verdict)
    }

    pub fn predict_default(&self, title: &str, text: &str) -> VerityResult<Verdict> {
        self.predict(title, text, self.default_k())
    }

    /// Like [`predict`](Self::predict), keeping the retrieved documents.
    pub fn predict_with_evidence(&self, title: &str, text: &str, k: usize) -> VerityResult<Prediction> {
        let query = Self::build_query(title, text);
        let evidence = self.retriever.search(&query, k)?;
        let verdict = self.interpreter.interpret(&evidence)?;
        info!(k, documents = evidence.len(), %verdict, "prediction complete");
        Ok(Prediction {
            verdict,
            query,
            evidence,
        })
    }
}
