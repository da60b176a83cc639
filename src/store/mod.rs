//! Registry snapshots on disk.
//!
//! Single-writer: callers load, mutate, and save with exclusive access.

pub mod snapshot;

use std::fs;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::registry::Registry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read a snapshot. A missing file is an empty registry.
pub fn load(path: &Path) -> Result<Registry, StoreError> {
    if !path.exists() {
        info!(path = %path.display(), "no snapshot yet, starting empty");
        return Ok(Registry::new());
    }
    let f = fs::File::open(path)?;
    let registry: Registry = serde_json::from_reader(std::io::BufReader::new(f))?;
    debug!(path = %path.display(), categories = registry.len(), "snapshot loaded");
    Ok(registry)
}

pub fn from_slice(bytes: &[u8]) -> Result<Registry, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn to_vec_pretty(registry: &Registry) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(registry)?)
}

/// Write a snapshot through a sibling temp file and an atomic rename.
pub fn save(registry: &Registry, path: &Path) -> Result<(), StoreError> {
    let bytes = to_vec_pretty(registry)?;

    let temp_path = path.with_extension("tmp");
    {
        let mut f = fs::File::create(&temp_path)?;
        f.write_all(&bytes)?;
        f.sync_all()?;
    }
    fs::rename(&temp_path, path)?;

    debug!(
        path = %path.display(),
        categories = registry.len(),
        version = %registry.version(),
        "snapshot saved"
    );
    Ok(())
}
