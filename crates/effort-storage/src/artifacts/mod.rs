//! On-disk artifact store.
//!
//! Blobs are written to `<name>.tmp`, synced, then renamed into place, so a
//! reader never observes a partial file. The blake3 digest returned by
//! [`ArtifactStore::write`] is what the registry records.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use effort_core::errors::{EffortResult, PersistenceError};
use effort_core::models::StoredArtifact;
use effort_core::traits::IArtifactStore;

pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open (and create if needed) the artifact directory.
    pub fn open(root: impl Into<PathBuf>) -> EffortResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Hex blake3 digest of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

impl IArtifactStore for ArtifactStore {
    fn write(&self, name: &str, bytes: &[u8]) -> EffortResult<StoredArtifact> {
        let target = self.root.join(name);
        let tmp = self.root.join(format!("{name}.tmp"));

        let mut file = fs::File::create(&tmp).map_err(|e| io_error(&tmp, e))?;
        file.write_all(bytes).map_err(|e| io_error(&tmp, e))?;
        file.sync_all().map_err(|e| io_error(&tmp, e))?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(&target, e).into());
        }

        let stored = StoredArtifact {
            file_path: target.display().to_string(),
            hash: content_hash(bytes),
            size_bytes: bytes.len() as u64,
        };
        tracing::debug!(path = %stored.file_path, size = stored.size_bytes, "artifact written");
        Ok(stored)
    }

    fn read(&self, path: &Path, expected_hash: Option<&str>) -> EffortResult<Vec<u8>> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        if let Some(expected) = expected_hash {
            let actual = content_hash(&bytes);
            if actual != expected {
                return Err(PersistenceError::ChecksumMismatch {
                    path: path.display().to_string(),
                    expected: expected.to_string(),
                    actual,
                }
                .into());
            }
        }
        Ok(bytes)
    }

    fn remove(&self, path: &Path) -> EffortResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(path, e).into()),
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
