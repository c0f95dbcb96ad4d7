//! # scamhub-db
//!
//! Storage layer implementing the repository traits from `scamhub-core`.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - [`PgReportStore`]: PostgreSQL store with transactional moderation
//! - [`MemoryReportStore`]: in-process store for development and tests
//! - Blob stores for uploaded files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scamhub_common::AppConfig;
//! use scamhub_db::{create_pool, run_migrations, DatabaseConfig, PgReportStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&app.database)).await?;
//!     run_migrations(&pool).await?;
//!     let store = PgReportStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod blob;
pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use blob::{FsBlobStore, MemoryBlobStore};
pub use memory::MemoryReportStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::PgReportStore;
