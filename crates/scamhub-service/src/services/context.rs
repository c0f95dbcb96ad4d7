//! Service context - dependency container for services
//!
//! Holds the repositories, blob store, clock and settings needed by services.
//! Built once at startup and passed by reference to every service.

use std::sync::Arc;

use scamhub_common::{LinkSweepConfig, StorageConfig};
use scamhub_core::traits::{
    AttachmentRepository, AuditRepository, BlobStore, Clock, LinkRepository, ReportRepository,
    SystemClock,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    report_repo: Arc<dyn ReportRepository>,
    attachment_repo: Arc<dyn AttachmentRepository>,
    link_repo: Arc<dyn LinkRepository>,
    audit_repo: Arc<dyn AuditRepository>,

    // Collaborators
    blob_store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,

    // Settings
    storage: StorageConfig,
    link_sweep: LinkSweepConfig,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the report repository
    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    /// Get the attachment repository
    pub fn attachment_repo(&self) -> &dyn AttachmentRepository {
        self.attachment_repo.as_ref()
    }

    /// Get the link repository
    pub fn link_repo(&self) -> &dyn LinkRepository {
        self.link_repo.as_ref()
    }

    /// Get the audit repository
    pub fn audit_repo(&self) -> &dyn AuditRepository {
        self.audit_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the blob store for uploaded files
    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    /// Current instant according to the configured clock
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    // === Settings ===

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn link_sweep(&self) -> &LinkSweepConfig {
        &self.link_sweep
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("blob_store", &"dyn BlobStore")
            .field("storage", &self.storage)
            .field("link_sweep", &self.link_sweep)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    report_repo: Option<Arc<dyn ReportRepository>>,
    attachment_repo: Option<Arc<dyn AttachmentRepository>>,
    link_repo: Option<Arc<dyn LinkRepository>>,
    audit_repo: Option<Arc<dyn AuditRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    clock: Option<Arc<dyn Clock>>,
    storage: Option<StorageConfig>,
    link_sweep: LinkSweepConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            report_repo: None,
            attachment_repo: None,
            link_repo: None,
            audit_repo: None,
            blob_store: None,
            clock: None,
            storage: None,
            link_sweep: LinkSweepConfig::default(),
        }
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: ReportRepository + AttachmentRepository + LinkRepository + AuditRepository + 'static,
    {
        self.report_repo(store.clone())
            .attachment_repo(store.clone())
            .link_repo(store.clone())
            .audit_repo(store)
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn attachment_repo(mut self, repo: Arc<dyn AttachmentRepository>) -> Self {
        self.attachment_repo = Some(repo);
        self
    }

    pub fn link_repo(mut self, repo: Arc<dyn LinkRepository>) -> Self {
        self.link_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn link_sweep(mut self, link_sweep: LinkSweepConfig) -> Self {
        self.link_sweep = link_sweep;
        self
    }

    /// Build the ServiceContext
    ///
    /// The clock defaults to the system clock.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            report_repo: self
                .report_repo
                .ok_or_else(|| ServiceError::validation("report_repo is required"))?,
            attachment_repo: self
                .attachment_repo
                .ok_or_else(|| ServiceError::validation("attachment_repo is required"))?,
            link_repo: self
                .link_repo
                .ok_or_else(|| ServiceError::validation("link_repo is required"))?,
            audit_repo: self
                .audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            blob_store: self
                .blob_store
                .ok_or_else(|| ServiceError::validation("blob_store is required"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            storage: self
                .storage
                .ok_or_else(|| ServiceError::validation("storage is required"))?,
            link_sweep: self.link_sweep,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
