//! Batch link extraction
//!
//! Run with:
//! ```bash
//! cargo run -p scamhub-service --bin link-sweep
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.
//! The sweep summary is printed to stdout as one JSON line; failures are
//! printed to stderr as an error summary. Exit status is 2 for client
//! errors (bad configuration or input) and 1 for everything else.

use std::sync::Arc;

use scamhub_common::{
    try_init_tracing_with_config, AppConfig, AppError, AppResult, ErrorResponse, TracingConfig,
};
use scamhub_db::{create_pool, run_migrations, DatabaseConfig, FsBlobStore, PgReportStore};
use scamhub_service::{LinkService, ServiceContext, SweepSummary};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    match run().await {
        Ok(summary) => match serde_json::to_string(&summary) {
            Ok(line) => println!("{line}"),
            Err(e) => error!(error = %e, "Failed to encode sweep summary"),
        },
        Err(e) => {
            error!(code = e.error_code(), error = %e, "Link sweep failed");
            if let Ok(line) = serde_json::to_string(&ErrorResponse::from(&e)) {
                eprintln!("{line}");
            }
            std::process::exit(if e.is_client_error() { 2 } else { 1 });
        }
    }
}

async fn run() -> AppResult<SweepSummary> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        batch_size = config.link_sweep.batch_size,
        concurrency = config.link_sweep.concurrency,
        "Starting link sweep..."
    );

    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
    run_migrations(&pool).await.map_err(AppError::internal)?;

    let ctx = ServiceContext::builder()
        .store(Arc::new(PgReportStore::new(pool)))
        .blob_store(Arc::new(FsBlobStore::new(&config.storage.upload_dir)))
        .storage(config.storage.clone())
        .link_sweep(config.link_sweep.clone())
        .build()?;

    let summary = LinkService::new(&ctx).sweep().await?;

    info!(
        reports = summary.reports,
        inserted = summary.inserted,
        skipped = summary.skipped,
        failed = summary.failed,
        "Link sweep complete"
    );

    Ok(summary)
}
