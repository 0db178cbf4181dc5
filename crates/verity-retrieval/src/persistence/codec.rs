//! Binary layout of `index.vec`.
//!
//! ```text
//! [magic "VRTY": 4][version: u8][metric: u8][dims: u32 LE][count: u64 LE][count*dims f32 LE]
//! ```

use verity_core::constants::{INDEX_FORMAT_VERSION, INDEX_MAGIC, MAX_PERSISTED_VECTORS};
use verity_core::models::DistanceMetric;

pub const HEADER_LEN: usize = 4 + 1 + 1 + 4 + 8;

/// Decoded vector file.
#[derive(Debug)]
pub struct VectorFile {
    pub version: u8,
    pub metric: DistanceMetric,
    pub dimensions: usize,
    pub count: usize,
    pub vectors: Vec<f32>,
}

/// Why a vector file could not be decoded.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    UnsupportedVersion(u8),
    Malformed(String),
}

pub fn encode(metric: DistanceMetric, dimensions: usize, vectors: &[f32]) -> Vec<u8> {
    let count = if dimensions == 0 { 0 } else { vectors.len() / dimensions };
    let mut out = Vec::with_capacity(HEADER_LEN + vectors.len() * 4);
    out.extend_from_slice(&INDEX_MAGIC);
    out.push(INDEX_FORMAT_VERSION);
    out.push(metric.as_tag());
    out.extend_from_slice(&(dimensions as u32).to_le_bytes());
    out.extend_from_slice(&(count as u64).to_le_bytes());
    for v in vectors {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

pub fn decode(bytes: &[u8]) -> Result<VectorFile, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Malformed(format!(
            "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
            bytes.len()
        )));
    }
    if bytes[0..4] != INDEX_MAGIC {
        return Err(DecodeError::Malformed(format!(
            "invalid magic bytes: expected {:?}, got {:?}",
            INDEX_MAGIC,
            &bytes[0..4]
        )));
    }

    let version = bytes[4];
    if version != INDEX_FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let metric = DistanceMetric::from_tag(bytes[5])
        .ok_or_else(|| DecodeError::Malformed(format!("unknown metric tag {}", bytes[5])))?;
    let dimensions = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    let mut count_bytes = [0u8; 8];
    count_bytes.copy_from_slice(&bytes[10..18]);
    let count = u64::from_le_bytes(count_bytes);

    if count > MAX_PERSISTED_VECTORS {
        return Err(DecodeError::Malformed(format!(
            "vector count {count} exceeds maximum {MAX_PERSISTED_VECTORS}"
        )));
    }
    let count = count as usize;

    let expected_payload = count
        .checked_mul(dimensions)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| DecodeError::Malformed("vector payload size overflows".to_string()))?;
    let payload = &bytes[HEADER_LEN..];
    if payload.len() != expected_payload {
        return Err(DecodeError::Malformed(format!(
            "expected {expected_payload} payload bytes for {count}x{dimensions} vectors, found {}",
            payload.len()
        )));
    }

    let vectors = payload
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(VectorFile {
        version,
        metric,
        dimensions,
        count,
        vectors,
    })
}
