//! Offline embedding by signed feature hashing.
//!
//! Input is either a record context string (`statement - subject - speaker`)
//! or free query text. Segments are the context fields and the lines of the
//! text. Within a segment every content word is a feature, and so is each pair
//! of adjacent content words. Slugs such as `barack-obama` or `economy,jobs`
//! also count whole, so a shared speaker or subject list weighs more than a
//! shared first name.
//!
//! Each feature is hashed with blake3: the digest picks a bucket and a sign,
//! so colliding features tend to cancel instead of piling up. Repeats are
//! damped with `1 + ln(count)` and the vector is L2-normalized.

use std::collections::BTreeMap;

use verity_core::config::defaults::DEFAULT_CONTEXT_SEPARATOR;
use verity_core::errors::VerityResult;
use verity_core::traits::IEmbeddingProvider;

/// Model identifier recorded in index sidecars built with this provider.
pub const HASHING_MODEL_ID: &str = "blake3-signed-features";

const BIGRAM_WEIGHT: f32 = 0.5;

/// Sorted for binary search.
const STOP_WORDS: &[&str] = &[
    "an", "and", "are", "as", "at", "be", "by", "for", "from", "had", "has", "have", "in", "is",
    "it", "its", "of", "on", "or", "says", "that", "the", "this", "to", "was", "with",
];

/// Deterministic, always-available provider for tests and air-gapped use.
pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }

        // Ordered so bucket sums are accumulated the same way every time.
        let mut counts: BTreeMap<String, (f32, u32)> = BTreeMap::new();
        for (feature, weight) in features(text) {
            counts.entry(feature).or_insert((weight, 0)).1 += 1;
        }
        for (feature, (weight, count)) in &counts {
            let (bucket, sign) = bucket_and_sign(feature, self.dimensions);
            vec[bucket] += sign * weight * (1.0 + (*count as f32).ln());
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vec.iter_mut().for_each(|v| *v /= norm);
        }
        vec
    }
}

/// Features of `text` with their weights, one entry per occurrence.
fn features(text: &str) -> Vec<(String, f32)> {
    let mut out = Vec::new();
    for segment in text.lines().flat_map(|line| line.split(DEFAULT_CONTEXT_SEPARATOR)) {
        let mut words: Vec<String> = Vec::new();
        for raw in segment.split_whitespace() {
            let token = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            let parts: Vec<&str> = token
                .split(|c: char| !c.is_alphanumeric())
                .filter(|p| !p.is_empty())
                .collect();
            if parts.len() > 1 && token.contains(|c: char| c == '-' || c == ',') {
                out.push((format!("s:{token}"), 1.0));
            }
            words.extend(
                parts
                    .into_iter()
                    .filter(|p| is_content_word(p))
                    .map(str::to_string),
            );
        }
        for pair in words.windows(2) {
            out.push((format!("b:{} {}", pair[0], pair[1]), BIGRAM_WEIGHT));
        }
        out.extend(words.into_iter().map(|w| (format!("w:{w}"), 1.0)));
    }
    out
}

fn is_content_word(word: &str) -> bool {
    word.chars().count() >= 2 && STOP_WORDS.binary_search(&word).is_err()
}

fn bucket_and_sign(feature: &str, dims: usize) -> (usize, f32) {
    let digest = blake3::hash(feature.as_bytes());
    let bytes = digest.as_bytes();
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[..8]);
    let bucket = (u64::from_le_bytes(head) % dims as u64) as usize;
    let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
    (bucket, sign)
}

impl IEmbeddingProvider for HashingProvider {
    fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn model(&self) -> &str {
        HASHING_MODEL_ID
    }

    fn is_available(&self) -> bool {
        true
    }
}
