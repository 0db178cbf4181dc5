//! On-disk index: a directory holding `index.vec` (vectors) and
//! `chunks.json` (manifest + chunks).
//!
//! Both files are written to a temporary name and renamed into place. Loading
//! validates the manifest version, the vector checksum, and that the two files
//! agree on count, dimensions and metric.

pub mod codec;
mod manifest;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use verity_core::constants::{INDEX_FORMAT_VERSION, SIDECAR_FILENAME, VECTORS_FILENAME};
use verity_core::errors::{PersistenceError, VerityResult};

pub use manifest::Manifest;

use crate::index::FlatIndex;
use codec::DecodeError;

/// Write `index` into directory `dir`, creating it if needed.
pub fn save(index: &FlatIndex, dir: impl AsRef<Path>) -> VerityResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let vector_bytes = codec::encode(index.metric(), index.dimensions(), index.vectors());
    let manifest = Manifest {
        format_version: INDEX_FORMAT_VERSION,
        index_id: index.index_id(),
        created_at: index.created_at(),
        embedding_model: index.embedding_model().to_string(),
        dimensions: index.dimensions(),
        metric: index.metric(),
        chunk_count: index.len(),
        vectors_checksum: blake3::hash(&vector_bytes).to_hex().to_string(),
        chunks: index.chunks().to_vec(),
    };
    let manifest_bytes = serde_json::to_vec_pretty(&manifest).map_err(|e| PersistenceError::Io {
        path: dir.join(SIDECAR_FILENAME).display().to_string(),
        reason: e.to_string(),
    })?;

    write_atomic(&dir.join(VECTORS_FILENAME), &vector_bytes)?;
    write_atomic(&dir.join(SIDECAR_FILENAME), &manifest_bytes)?;

    info!(
        path = %dir.display(),
        index_id = %manifest.index_id,
        chunks = manifest.chunk_count,
        "index saved"
    );
    Ok(())
}

/// Read an index previously written by [`save`].
pub fn load(dir: impl AsRef<Path>) -> VerityResult<FlatIndex> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(PersistenceError::NotFound {
            path: dir.display().to_string(),
        }
        .into());
    }

    let manifest_path = dir.join(SIDECAR_FILENAME);
    let vectors_path = dir.join(VECTORS_FILENAME);

    let manifest_raw = read_file(&manifest_path)?;
    let manifest: Manifest =
        serde_json::from_slice(&manifest_raw).map_err(|e| corrupt(&manifest_path, e.to_string()))?;
    if manifest.format_version != INDEX_FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: manifest.format_version,
            expected: INDEX_FORMAT_VERSION,
        }
        .into());
    }

    let vector_bytes = read_file(&vectors_path)?;
    let checksum = blake3::hash(&vector_bytes).to_hex().to_string();
    if checksum != manifest.vectors_checksum {
        return Err(corrupt(
            &vectors_path,
            format!(
                "checksum mismatch: manifest {}, file {}",
                manifest.vectors_checksum, checksum
            ),
        )
        .into());
    }

    let file = codec::decode(&vector_bytes).map_err(|e| match e {
        DecodeError::UnsupportedVersion(found) => PersistenceError::UnsupportedVersion {
            found,
            expected: INDEX_FORMAT_VERSION,
        },
        DecodeError::Malformed(details) => corrupt(&vectors_path, details),
    })?;

    if file.count != manifest.chunk_count || manifest.chunks.len() != manifest.chunk_count {
        return Err(corrupt(
            dir,
            format!(
                "count mismatch: {} vectors, manifest says {}, {} chunks listed",
                file.count,
                manifest.chunk_count,
                manifest.chunks.len()
            ),
        )
        .into());
    }
    if file.dimensions != manifest.dimensions {
        return Err(corrupt(
            dir,
            format!(
                "dimension mismatch: vectors have {}, manifest says {}",
                file.dimensions, manifest.dimensions
            ),
        )
        .into());
    }
    if file.metric != manifest.metric {
        return Err(corrupt(dir, "metric differs between vectors and manifest".to_string()).into());
    }

    debug!(path = %dir.display(), index_id = %manifest.index_id, "index files validated");
    Ok(FlatIndex::from_parts(
        manifest.index_id,
        manifest.created_at,
        manifest.embedding_model,
        manifest.dimensions,
        manifest.metric,
        file.vectors,
        manifest.chunks,
    ))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let tmp = tmp_path(path);
    let mut file = fs::File::create(&tmp).map_err(|e| io_error(&tmp, e))?;
    file.write_all(bytes).map_err(|e| io_error(&tmp, e))?;
    file.sync_all().map_err(|e| io_error(&tmp, e))?;
    drop(file);
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_file(path: &Path) -> Result<Vec<u8>, PersistenceError> {
    fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PersistenceError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            io_error(path, e)
        }
    })
}

fn io_error(path: &Path, e: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn corrupt(path: &Path, details: String) -> PersistenceError {
    PersistenceError::Corrupt {
        path: path.display().to_string(),
        details,
    }
}
