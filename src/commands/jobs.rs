//! Jobs command - Spike detection scan management.
//!
//! Two modes:
//! - `work`: run the scan on a fixed interval until interrupted
//! - `scan`: run the scan once and exit, for external schedulers (cron,
//!   Kubernetes CronJob)

use std::sync::Arc;

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Persistence};
use crate::jobs::{run_worker, RedisScanGuard, ScanOutcome, SpikeScanner};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_scan_worker(&config).await,
        JobsAction::Scan => run_scan_once(&config).await,
    }
}

/// Build a spike scanner against live infrastructure.
async fn build_scanner(config: &Config) -> AppResult<SpikeScanner<Persistence>> {
    let db = sea_orm::Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    let cache = Cache::try_connect(config)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to Redis: {}", e)))?;

    let uow = Arc::new(Persistence::new(db));
    let guard = Arc::new(RedisScanGuard::new(cache));

    Ok(SpikeScanner::new(uow, guard, config))
}

/// Start the interval worker loop
async fn run_scan_worker(config: &Config) -> AppResult<()> {
    let scanner = build_scanner(config).await?;

    tracing::info!("Spike scan worker starting. Press Ctrl+C to stop.");
    run_worker(scanner, config.spike_scan_interval_seconds).await
}

/// Run one scan and report the outcome
async fn run_scan_once(config: &Config) -> AppResult<()> {
    let scanner = build_scanner(config).await?;

    match scanner.scan().await? {
        ScanOutcome::Skipped => {
            println!("Scan skipped: another run holds the lock");
        }
        ScanOutcome::Completed { scanned, alerts } => {
            println!("Scan complete: {} rows scanned, {} alerts raised", scanned, alerts);
        }
    }

    Ok(())
}
