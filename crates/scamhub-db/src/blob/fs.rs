//! Local directory blob store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use scamhub_core::traits::{BlobRef, BlobStore, RepoResult};
use scamhub_core::DomainError;

use super::new_locator;

/// Stores each blob as one file under a root directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a locator; `None` if it could escape the root
    fn path_for(&self, locator: &str) -> Option<PathBuf> {
        let safe = !locator.is_empty()
            && !locator.starts_with('.')
            && locator
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_');
        safe.then(|| self.root.join(locator))
    }
}

fn storage_error(e: &std::io::Error) -> DomainError {
    DomainError::StorageUnavailable(e.to_string())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, bytes: &[u8], suggested_name: &str) -> RepoResult<BlobRef> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| storage_error(&e))?;

        let locator = new_locator(suggested_name);
        let path = self.root.join(&locator);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| storage_error(&e))?;

        debug!(%locator, "Blob written");
        Ok(BlobRef {
            locator,
            size_bytes: bytes.len() as i64,
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, locator: &str) -> RepoResult<Vec<u8>> {
        let path = self
            .path_for(locator)
            .ok_or_else(|| DomainError::BlobNotFound(locator.to_string()))?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DomainError::BlobNotFound(locator.to_string()))
            }
            Err(e) => Err(storage_error(&e)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, locator: &str) -> RepoResult<()> {
        let Some(path) = self.path_for(locator) else {
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%locator, "Blob removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&e)),
        }
    }
}
