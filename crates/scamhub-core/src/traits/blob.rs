//! Blob storage for uploaded files

use async_trait::async_trait;

use super::RepoResult;

/// Location and size of a stored blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub locator: String,
    pub size_bytes: i64,
}

/// Opaque byte storage. Content is never inspected.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes; `suggested_name` may influence the locator but is not
    /// trusted as a path.
    async fn put(&self, bytes: &[u8], suggested_name: &str) -> RepoResult<BlobRef>;

    /// Read bytes back; `BlobNotFound` for unknown locators
    async fn get(&self, locator: &str) -> RepoResult<Vec<u8>>;

    /// Remove a blob; removing an unknown locator is not an error
    async fn delete(&self, locator: &str) -> RepoResult<()>;
}
