//! Exact (brute-force) nearest-neighbor index over chunk embeddings.

mod builder;

pub use builder::build_index;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use verity_core::errors::{EmbeddingError, RetrievalError};
use verity_core::models::{Chunk, DistanceMetric, SearchHit};

/// Vectors stored row-major in one contiguous buffer, paired by position
/// with their chunks.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    index_id: Uuid,
    created_at: DateTime<Utc>,
    embedding_model: String,
    dimensions: usize,
    metric: DistanceMetric,
    vectors: Vec<f32>,
    chunks: Vec<Chunk>,
}

impl FlatIndex {
    /// An empty index for vectors produced by `embedding_model`.
    pub fn new(embedding_model: impl Into<String>, dimensions: usize, metric: DistanceMetric) -> Self {
        Self {
            index_id: Uuid::new_v4(),
            created_at: Utc::now(),
            embedding_model: embedding_model.into(),
            dimensions,
            metric,
            vectors: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Reassemble a persisted index. `vectors.len()` must equal
    /// `chunks.len() * dimensions`; the loader checks this first.
    pub(crate) fn from_parts(
        index_id: Uuid,
        created_at: DateTime<Utc>,
        embedding_model: String,
        dimensions: usize,
        metric: DistanceMetric,
        vectors: Vec<f32>,
        chunks: Vec<Chunk>,
    ) -> Self {
        debug_assert_eq!(vectors.len(), chunks.len() * dimensions);
        Self {
            index_id,
            created_at,
            embedding_model,
            dimensions,
            metric,
            vectors,
            chunks,
        }
    }

    /// Append one chunk and its vector.
    pub fn push(&mut self, chunk: Chunk, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        self.vectors.extend_from_slice(vector);
        self.chunks.push(chunk);
        Ok(())
    }

    /// The `k` nearest chunks, ascending distance, ties by insertion position.
    pub fn search_by_vector(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        if query.len() != self.dimensions {
            return Err(RetrievalError::SearchFailed {
                reason: format!(
                    "query has {} dimensions, index has {}",
                    query.len(),
                    self.dimensions
                ),
            });
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, usize)> = (0..self.len())
            .map(|i| (self.metric.distance(query, self.vector(i)), i))
            .collect();

        let by_distance_then_position =
            |a: &(f32, usize), b: &(f32, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, by_distance_then_position);
            scored.truncate(k);
        }
        scored.sort_unstable_by(by_distance_then_position);

        Ok(scored
            .into_iter()
            .map(|(distance, position)| SearchHit {
                chunk: self.chunks[position].clone(),
                distance,
                position,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn index_id(&self) -> Uuid {
        self.index_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Row-major vector buffer.
    pub fn vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// The vector stored at `position`.
    pub fn vector(&self, position: usize) -> &[f32] {
        let start = position * self.dimensions;
        &self.vectors[start..start + self.dimensions]
    }
}
