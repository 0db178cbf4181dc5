use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::DistanceMetric;

/// Vector index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Distance used for nearest-neighbor search.
    pub metric: DistanceMetric,
    /// Reject persisted indexes built with a different embedding model.
    pub verify_model_on_load: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::default(),
            verify_model_on_load: defaults::DEFAULT_VERIFY_MODEL_ON_LOAD,
        }
    }
}
