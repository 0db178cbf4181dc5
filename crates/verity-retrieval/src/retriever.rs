//! The retriever: owns the active index and answers top-k queries.

use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::{debug, error, info, warn};
use verity_core::config::{IndexConfig, VerityConfig};
use verity_core::errors::{
    ConfigurationError, EmbeddingError, PersistenceError, RetrievalError, VerityResult,
};
use verity_core::models::{Chunk, Record, RetrievalResult};
use verity_core::traits::IRetriever;
use verity_embeddings::EmbeddingEngine;

use crate::chunker::Chunker;
use crate::index::{build_index, FlatIndex};
use crate::persistence;

/// Holds at most one active index. Build and load construct a complete new
/// index before swapping it in, so searches never see a partial one; a search
/// that already took its snapshot finishes against the old index.
pub struct Retriever {
    engine: Arc<EmbeddingEngine>,
    chunker: Chunker,
    index_config: IndexConfig,
    active: RwLock<Option<Arc<FlatIndex>>>,
}

impl Retriever {
    pub fn new(engine: Arc<EmbeddingEngine>, config: &VerityConfig) -> VerityResult<Self> {
        let chunker = Chunker::new(&config.chunking)?;
        Ok(Self {
            engine,
            chunker,
            index_config: config.index.clone(),
            active: RwLock::new(None),
        })
    }

    pub fn engine(&self) -> &Arc<EmbeddingEngine> {
        &self.engine
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Chunk `records`, embed the chunks, and make the result the active index.
    pub fn build_from_records(&self, records: &[Record]) -> VerityResult<Arc<FlatIndex>> {
        if records.is_empty() {
            return Err(ConfigurationError::MissingInput {
                what: "at least one record to index".to_string(),
            }
            .into());
        }
        let chunks = self.chunker.chunk_all(records);
        info!(records = records.len(), chunks = chunks.len(), "building index from records");
        self.build_from_chunks(chunks)
    }

    /// Embed pre-chunked input and make the result the active index.
    pub fn build_from_chunks(&self, chunks: Vec<Chunk>) -> VerityResult<Arc<FlatIndex>> {
        let index = Arc::new(build_index(&self.engine, chunks, self.index_config.metric)?);
        self.swap(index.clone());
        Ok(index)
    }

    /// Persist the active index into directory `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> VerityResult<()> {
        let index = self.active_index().ok_or(PersistenceError::IndexNotBuilt)?;
        persistence::save(&index, dir)
    }

    /// Load an index from `dir` and make it active.
    ///
    /// On failure the error is logged and returned, and whatever index was
    /// active before stays active.
    pub fn load(&self, dir: impl AsRef<Path>) -> VerityResult<Arc<FlatIndex>> {
        let dir = dir.as_ref();
        match self.load_checked(dir) {
            Ok(index) => {
                let index = Arc::new(index);
                info!(
                    path = %dir.display(),
                    index_id = %index.index_id(),
                    chunks = index.len(),
                    "index loaded"
                );
                self.swap(index.clone());
                Ok(index)
            }
            Err(e) => {
                error!(
                    path = %dir.display(),
                    error = %e,
                    kept_previous = self.is_loaded(),
                    "failed to load index"
                );
                Err(e)
            }
        }
    }

    fn load_checked(&self, dir: &Path) -> VerityResult<FlatIndex> {
        let index = persistence::load(dir)?;
        if self.index_config.verify_model_on_load {
            let expected = self.engine.model_id();
            if index.embedding_model() != expected {
                return Err(PersistenceError::ModelMismatch {
                    expected,
                    found: index.embedding_model().to_string(),
                }
                .into());
            }
            if index.dimensions() != self.engine.dimensions() {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.engine.dimensions(),
                    actual: index.dimensions(),
                }
                .into());
            }
        }
        Ok(index)
    }

    /// Top-k chunks nearest to `query`, nearest first.
    pub fn search(&self, query: &str, k: usize) -> VerityResult<RetrievalResult> {
        let Some(index) = self.active_index() else {
            warn!("search attempted before any index was built or loaded");
            return Err(RetrievalError::IndexNotLoaded.into());
        };
        if k == 0 {
            return Ok(RetrievalResult::default());
        }

        let query_vec = self.engine.embed_query(query)?;
        let hits = index.search_by_vector(&query_vec, k)?;
        debug!(
            k,
            returned = hits.len(),
            nearest = hits.first().map(|h| h.distance),
            "search complete"
        );
        Ok(RetrievalResult::new(hits))
    }

    /// Snapshot of the active index.
    pub fn active_index(&self) -> Option<Arc<FlatIndex>> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.active_index().is_some()
    }

    fn swap(&self, index: Arc<FlatIndex>) {
        let mut slot = self
            .active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(index);
    }
}

impl IRetriever for Retriever {
    fn search(&self, query: &str, k: usize) -> VerityResult<RetrievalResult> {
        Retriever::search(self, query, k)
    }
}

#[cfg(test)]
mod tests {
    use verity_core::config::EmbeddingConfig;
    use verity_core::errors::VerityError;

    use super::*;

    fn retriever() -> Retriever {
        let engine = EmbeddingEngine::new(EmbeddingConfig {
            dimensions: 64,
            ..Default::default()
        })
        .unwrap();
        Retriever::new(Arc::new(engine), &VerityConfig::default()).unwrap()
    }

    #[test]
    fn fresh_retriever_has_no_index() {
        let r = retriever();
        assert!(!r.is_loaded());
        assert!(matches!(
            r.search("anything", 3).unwrap_err(),
            VerityError::Retrieval(RetrievalError::IndexNotLoaded)
        ));
    }

    #[test]
    fn save_before_build_is_reported() {
        let r = retriever();
        let dir = std::env::temp_dir().join("verity-never-written");
        assert!(matches!(
            r.save(&dir).unwrap_err(),
            VerityError::Persistence(PersistenceError::IndexNotBuilt)
        ));
        assert!(!dir.join("index.vec").exists());
    }

    #[test]
    fn building_replaces_the_active_index() {
        let r = retriever();
        let first = r.build_from_records(&[Record::new("one", "", "", 1)]).unwrap();
        let second = r
            .build_from_records(&[Record::new("two", "", "", 2), Record::new("three", "", "", 3)])
            .unwrap();
        let active = r.active_index().unwrap();
        assert_ne!(first.index_id(), active.index_id());
        assert_eq!(second.index_id(), active.index_id());
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn empty_records_are_rejected_and_nothing_changes() {
        let r = retriever();
        assert!(matches!(
            r.build_from_records(&[]).unwrap_err(),
            VerityError::Configuration(ConfigurationError::MissingInput { .. })
        ));
        assert!(!r.is_loaded());
    }

    #[test]
    fn zero_k_returns_empty() {
        let r = retriever();
        r.build_from_records(&[Record::new("one", "", "", 1)]).unwrap();
        assert!(r.search("one", 0).unwrap().is_empty());
    }
}
