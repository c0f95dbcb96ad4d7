//! PostgreSQL store
//!
//! [`PgReportStore`] implements every repository trait from `scamhub-core`
//! over one pool. Each trait lives in its own module.

mod attachment;
mod audit;
mod error;
mod link;
mod report;

use sqlx::PgPool;

/// PostgreSQL implementation of the report repositories
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    /// Create a new PgReportStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
