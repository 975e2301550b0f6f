//! Crime spike detection scan.
//!
//! Scans recent CrimeStat aggregate rows and raises one role-addressed
//! crime_trend notification per row whose total exceeds the threshold.
//! Re-entrancy is a correctness requirement: a run lock prevents
//! overlapping scans, and a per-row dedupe key (TTL = scan window) keeps a
//! qualifying row from being double-notified within the same window, even
//! across process restarts.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{Config, CACHE_PREFIX_SPIKE, SPIKE_SCAN_LOCK};
use crate::domain::notification::NotificationType;
use crate::domain::user::Role;
use crate::errors::AppResult;
use crate::infra::{Cache, LockGuard, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SECONDS_PER_DAY: u64 = 86_400;

/// Concurrency guard for scan runs.
///
/// Split from the scanner so the scan logic can be tested without Redis.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScanGuard: Send + Sync {
    /// Try to start a scan run. False means another run holds the lock.
    async fn begin(&self) -> AppResult<bool>;

    /// Release the run lock.
    async fn end(&self) -> AppResult<()>;

    /// Claim a per-row dedupe key. False means the row was already
    /// notified within the current window.
    async fn claim(&self, key: &str, ttl_seconds: u64) -> AppResult<bool>;

    /// Give a claimed key back so a failed insert is retried next run.
    async fn unclaim(&self, key: &str) -> AppResult<()>;
}

/// Redis-backed scan guard: distributed lock plus SET NX dedupe keys.
pub struct RedisScanGuard {
    cache: Cache,
    lock: Mutex<Option<LockGuard>>,
}

impl RedisScanGuard {
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            lock: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ScanGuard for RedisScanGuard {
    async fn begin(&self) -> AppResult<bool> {
        let guard = self.cache.try_acquire_lock(SPIKE_SCAN_LOCK).await?;
        let acquired = guard.is_some();
        *self.lock.lock().await = guard;
        Ok(acquired)
    }

    async fn end(&self) -> AppResult<()> {
        if let Some(guard) = self.lock.lock().await.take() {
            guard.release().await?;
        }
        Ok(())
    }

    async fn claim(&self, key: &str, ttl_seconds: u64) -> AppResult<bool> {
        self.cache.set_nx_with_ttl(key, "1", ttl_seconds).await
    }

    async fn unclaim(&self, key: &str) -> AppResult<()> {
        self.cache.delete(key).await
    }
}

/// Outcome of one scan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Another scan held the run lock; nothing was done.
    Skipped,
    /// The scan ran to completion.
    Completed { scanned: usize, alerts: usize },
}

/// The spike scanner itself.
pub struct SpikeScanner<U: UnitOfWork> {
    uow: Arc<U>,
    guard: Arc<dyn ScanGuard>,
    threshold: u32,
    lookback_days: i64,
}

impl<U: UnitOfWork> SpikeScanner<U> {
    pub fn new(uow: Arc<U>, guard: Arc<dyn ScanGuard>, config: &Config) -> Self {
        Self {
            uow,
            guard,
            threshold: config.spike_threshold,
            lookback_days: config.spike_lookback_days,
        }
    }

    /// Run one scan, skipping entirely if another run is in progress.
    pub async fn scan(&self) -> AppResult<ScanOutcome> {
        if !self.guard.begin().await? {
            tracing::info!("Spike scan already running elsewhere, skipping");
            return Ok(ScanOutcome::Skipped);
        }

        let result = self.run().await;

        if let Err(e) = self.guard.end().await {
            tracing::warn!(error = %e, "Failed to release spike scan lock");
        }

        result
    }

    async fn run(&self) -> AppResult<ScanOutcome> {
        let since = Utc::now().date_naive() - Duration::days(self.lookback_days);
        let rows = self.uow.crime_stats().started_since(since).await?;
        let scanned = rows.len();

        // Dedupe keys live exactly as long as the scan window
        let ttl_seconds = self.lookback_days.max(1) as u64 * SECONDS_PER_DAY;
        let mut alerts = 0usize;

        for row in rows {
            if row.total_reports <= self.threshold {
                continue;
            }

            let key = format!("{}{}", CACHE_PREFIX_SPIKE, row.id);
            if !self.guard.claim(&key, ttl_seconds).await? {
                tracing::debug!(stat_id = %row.id, "Spike already notified this window");
                continue;
            }

            let message = format!(
                "Crime spike detected: {} {} reports since {}",
                row.total_reports, row.incident_type, row.start_date
            );

            match self
                .uow
                .notifications()
                .create(
                    None,
                    Some(Role::Admin),
                    message,
                    NotificationType::CrimeTrend,
                    None,
                )
                .await
            {
                Ok(_) => alerts += 1,
                Err(e) => {
                    tracing::error!(stat_id = %row.id, error = %e, "Spike alert insert failed");
                    // Free the dedupe key so the next run retries this row
                    if let Err(e) = self.guard.unclaim(&key).await {
                        tracing::warn!(stat_id = %row.id, error = %e, "Failed to unclaim dedupe key");
                    }
                }
            }
        }

        tracing::info!(scanned, alerts, "Spike scan finished");
        Ok(ScanOutcome::Completed { scanned, alerts })
    }
}

/// Run the scanner on a fixed interval until interrupted.
pub async fn run_worker<U: UnitOfWork>(
    scanner: SpikeScanner<U>,
    interval_seconds: u64,
) -> AppResult<()> {
    let mut ticker = tokio::time::interval(tokio::time::Duration::from_secs(interval_seconds));
    tracing::info!(interval_seconds, "Spike scan worker started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = scanner.scan().await {
                    tracing::error!(error = %e, "Spike scan failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Spike scan worker shutting down");
                break;
            }
        }
    }

    Ok(())
}
