use std::time::Instant;

use tracing::{info, warn};
use verity_core::errors::{ConfigurationError, EmbeddingError, VerityResult};
use verity_core::models::{Chunk, DistanceMetric};
use verity_embeddings::EmbeddingEngine;

use super::FlatIndex;

/// Embed every chunk and index it.
///
/// Chunks whose vector comes back malformed are skipped with a warning. The
/// build fails if the engine fails as a whole or if nothing survives.
pub fn build_index(
    engine: &EmbeddingEngine,
    chunks: Vec<Chunk>,
    metric: DistanceMetric,
) -> VerityResult<FlatIndex> {
    if chunks.is_empty() {
        return Err(ConfigurationError::MissingInput {
            what: "at least one chunk to index".to_string(),
        }
        .into());
    }

    let start = Instant::now();
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = engine.embed_documents(&texts)?;

    let total = chunks.len();
    let mut index = FlatIndex::new(engine.model_id(), engine.dimensions(), metric);
    let mut skipped = 0usize;
    for (position, (chunk, embedding)) in chunks.into_iter().zip(embeddings).enumerate() {
        match embedding {
            Ok(vector) => index.push(chunk, &vector)?,
            Err(e) => {
                warn!(position, error = %e, "skipping chunk with malformed embedding");
                skipped += 1;
            }
        }
    }

    if index.is_empty() {
        return Err(EmbeddingError::AllMalformed { count: total }.into());
    }

    info!(
        chunks = index.len(),
        skipped,
        dims = index.dimensions(),
        model = index.embedding_model(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "index built"
    );
    Ok(index)
}
