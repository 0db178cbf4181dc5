use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use verity_core::models::{Chunk, DistanceMetric};

/// Contents of `chunks.json`: index identity plus every chunk in vector order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u8,
    pub index_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub embedding_model: String,
    pub dimensions: usize,
    pub metric: DistanceMetric,
    pub chunk_count: usize,
    /// blake3 hex digest of `index.vec`.
    pub vectors_checksum: String,
    pub chunks: Vec<Chunk>,
}
