use std::path::{Path, PathBuf};

use anyhow::Context;
use stt::AudioFormat;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::UploadError;

/// Directory holding uploads while they are being transcribed
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Open the store, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();

        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create upload directory {}", dir.display()))?;

        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a fresh `<uuid>.<ext>` file
    ///
    /// Never overwrites an existing file. A partially written file is
    /// removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Storage`] if the file cannot be created or written
    pub async fn persist(&self, format: AudioFormat, bytes: &[u8]) -> Result<TempUpload, UploadError> {
        let path = self.dir.join(format!("{}.{}", Uuid::new_v4(), format.extension()));
        let storage_error = |source| UploadError::Storage {
            path: path.clone(),
            source,
        };

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(storage_error)?;

        // From here on the file is ours to clean up
        let upload = TempUpload::new(path.clone());

        file.write_all(bytes).await.map_err(storage_error)?;
        file.flush().await.map_err(storage_error)?;

        Ok(upload)
    }
}

/// A persisted upload that must not outlive its request
///
/// Call [`TempUpload::discard`] once the transcription attempt is over.
/// If the handle is dropped first (a failed write, a cancelled request)
/// the file is removed synchronously.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    armed: bool,
}

impl TempUpload {
    const fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file; failure is logged and otherwise ignored
    pub async fn discard(mut self) {
        self.armed = false;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!(path = %self.path.display(), "deleted upload"),
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to delete upload"),
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "deleted abandoned upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to delete abandoned upload"),
        }
    }
}
