use serde::{Deserialize, Serialize};

/// Distance used by the vector index. Smaller is closer for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    L2,
    /// `1 - cosine_similarity`.
    Cosine,
}

impl DistanceMetric {
    /// Distance between two equal-length vectors.
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::L2 => a
                .iter()
                .zip(b)
                .map(|(x, y)| {
                    let d = x - y;
                    d * d
                })
                .sum(),
            Self::Cosine => {
                let mut dot = 0.0f32;
                let mut na = 0.0f32;
                let mut nb = 0.0f32;
                for (x, y) in a.iter().zip(b) {
                    dot += x * y;
                    na += x * x;
                    nb += y * y;
                }
                let denom = na.sqrt() * nb.sqrt();
                if denom <= f32::EPSILON {
                    // Zero vectors are maximally far from everything.
                    1.0
                } else {
                    1.0 - dot / denom
                }
            }
        }
    }

    /// Stable byte tag used in the persisted vector file.
    pub fn as_tag(self) -> u8 {
        match self {
            Self::L2 => 0,
            Self::Cosine => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::L2),
            1 => Some(Self::Cosine),
            _ => None,
        }
    }
}
