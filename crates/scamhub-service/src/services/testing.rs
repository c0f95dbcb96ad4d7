//! Shared fixtures for service tests

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use scamhub_common::{LinkSweepConfig, StorageConfig};
use scamhub_core::traits::ManualClock;
use scamhub_core::value_objects::Performer;
use scamhub_db::{MemoryBlobStore, MemoryReportStore};

use super::context::ServiceContext;

pub struct Fixture {
    pub ctx: ServiceContext,
    pub blobs: Arc<MemoryBlobStore>,
    pub clock: Arc<ManualClock>,
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn alice() -> Performer {
    Performer::moderator("alice")
}

pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryReportStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let clock = Arc::new(ManualClock::new(t0()));

    let ctx = ServiceContext::builder()
        .store(store)
        .blob_store(blobs.clone())
        .clock(clock.clone())
        .storage(StorageConfig {
            upload_dir: "./uploads".to_string(),
            max_file_size_mb: 1,
        })
        .link_sweep(LinkSweepConfig {
            batch_size: 200,
            concurrency: 4,
        })
        .build()
        .unwrap();

    Fixture {
        ctx,
        blobs,
        clock,
    }
}
