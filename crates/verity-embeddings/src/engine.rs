//! EmbeddingEngine: the main entry point for verity-embeddings.
//!
//! Owns one provider, validates every vector it returns, batches document
//! embedding for index builds and caches query embeddings.

use rayon::prelude::*;
use tracing::{debug, info, warn};
use verity_core::config::EmbeddingConfig;
use verity_core::errors::{EmbeddingError, VerityResult};
use verity_core::traits::IEmbeddingProvider;

use crate::cache::QueryCache;
use crate::providers;
use crate::validation::validate_embedding;

/// Outcome for one document: its vector, or why the provider's output was
/// rejected. Systemic failures abort the whole call instead.
pub type DocumentEmbedding = Result<Vec<f32>, EmbeddingError>;

/// The main embedding engine.
///
/// All methods take `&self`; the engine is shared by the retriever across
/// concurrent searches.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: QueryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create a new engine from configuration.
    pub fn new(config: EmbeddingConfig) -> VerityResult<Self> {
        config.validate()?;
        let provider = providers::create_provider(&config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create an engine around an explicit provider (custom backends, tests).
    ///
    /// `config.dimensions` is ignored in favour of the provider's own.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: EmbeddingConfig) -> Self {
        let cache = QueryCache::new(config.query_cache_size);
        info!(
            provider = provider.name(),
            model = provider.model(),
            dims = provider.dimensions(),
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Identifies the vector space: `"{provider}:{model}"`.
    pub fn model_id(&self) -> String {
        format!("{}:{}", self.provider.name(), self.provider.model())
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Embed a search query. Malformed output is an error here, since there
    /// is nothing to skip to.
    pub fn embed_query(&self, query: &str) -> VerityResult<Vec<f32>> {
        if let Some(vec) = self.cache.get(query) {
            debug!("query embedding cache hit");
            return Ok(vec);
        }

        let embedding = self.provider.embed(query)?;
        validate_embedding(&embedding, self.dimensions())?;
        self.cache.insert(query, embedding.clone());
        Ok(embedding)
    }

    /// Embed documents for an index build.
    ///
    /// Output has one entry per input, in input order. A provider error or a
    /// batch returning the wrong number of vectors fails the whole call; a
    /// single malformed vector is reported in its own slot.
    pub fn embed_documents(&self, texts: &[String]) -> VerityResult<Vec<DocumentEmbedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<&[String]> = texts.chunks(self.config.batch_size.max(1)).collect();
        let results: Vec<VerityResult<Vec<DocumentEmbedding>>> =
            if self.config.parallel_build && batches.len() > 1 {
                batches.par_iter().map(|b| self.embed_batch(b)).collect()
            } else {
                batches.iter().map(|b| self.embed_batch(b)).collect()
            };

        let mut out = Vec::with_capacity(texts.len());
        for batch in results {
            out.extend(batch?);
        }
        Ok(out)
    }

    fn embed_batch(&self, batch: &[String]) -> VerityResult<Vec<DocumentEmbedding>> {
        let vectors = self.provider.embed_batch(batch)?;
        if vectors.len() != batch.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: batch.len(),
                actual: vectors.len(),
            }
            .into());
        }

        let dims = self.dimensions();
        Ok(vectors
            .into_iter()
            .map(|v| match validate_embedding(&v, dims) {
                Ok(()) => Ok(v),
                Err(e) => {
                    warn!(error = %e, "provider returned a malformed embedding");
                    Err(e)
                }
            })
            .collect())
    }

    /// Drop cached query embeddings.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
