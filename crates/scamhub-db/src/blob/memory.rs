//! In-memory blob store for tests

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use scamhub_core::traits::{BlobRef, BlobStore, RepoResult};
use scamhub_core::DomainError;

use super::new_locator;

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, bytes: &[u8], suggested_name: &str) -> RepoResult<BlobRef> {
        let locator = new_locator(suggested_name);
        self.blobs.write().insert(locator.clone(), bytes.to_vec());
        Ok(BlobRef {
            locator,
            size_bytes: bytes.len() as i64,
        })
    }

    async fn get(&self, locator: &str) -> RepoResult<Vec<u8>> {
        self.blobs
            .read()
            .get(locator)
            .cloned()
            .ok_or_else(|| DomainError::BlobNotFound(locator.to_string()))
    }

    async fn delete(&self, locator: &str) -> RepoResult<()> {
        self.blobs.write().remove(locator);
        Ok(())
    }
}
