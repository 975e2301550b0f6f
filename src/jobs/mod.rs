//! Background jobs.

pub mod spike_scan;

pub use spike_scan::{run_worker, RedisScanGuard, ScanGuard, ScanOutcome, SpikeScanner};

#[cfg(any(test, feature = "test-utils"))]
pub use spike_scan::MockScanGuard;
