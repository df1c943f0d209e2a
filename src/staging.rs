//! Scoped staging of fetched artifact bytes
//!
//! Fetched bytes are materialized on disk for the duration of one payload
//! read and removed on every exit path — success, parse failure, or an early
//! return — via the [`StagedFile`] drop guard. Staging paths embed the job
//! number, the strategy label, and the filename, so concurrently-running
//! strategies (the three result-kind variants of one report file included)
//! never target the same local file.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// A staged artifact file, removed from disk when dropped
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Write `bytes` to `<dir>/<name>`, creating `dir` if needed
    ///
    /// An already-existing staging directory is fine; an already-existing
    /// staged file is overwritten (staging names are unique per strategy, so
    /// a leftover can only be a previous run's residue).
    pub async fn write(dir: &Path, name: &str, bytes: &[u8]) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(Self { path })
    }

    /// Path of the staged file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged artifact file"
            );
        }
    }
}
