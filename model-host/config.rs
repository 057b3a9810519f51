//! Host configuration and runtime counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Batching policy for one host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostConfig {
    /// Upper bound on items claimed per predictor invocation. The worker
    /// never waits for a batch to fill; this only caps how much queued
    /// load one call may absorb.
    pub max_batch_size: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { max_batch_size: 32 }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self {
            max_batch_size: env_usize("MODEL_HOST_MAX_BATCH_SIZE", 32),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ============================================================
// METRICS
// ============================================================

/// Per-host counters, updated by the worker and readable from anywhere.
#[derive(Default)]
pub struct HostMetrics {
    // Throughput
    pub requests_total: AtomicU64,
    pub batches_total: AtomicU64,
    pub batch_size_sum: AtomicU64,

    // Failures (whole batches, since batch errors are per-batch fatal)
    pub failed_batches: AtomicU64,
}

impl HostMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_batch(&self, size: usize) {
        self.requests_total.fetch_add(size as u64, Ordering::Relaxed);
        self.batch_size_sum.fetch_add(size as u64, Ordering::Relaxed);
        self.batches_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch_failure(&self) {
        self.failed_batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn avg_batch_size(&self) -> f64 {
        let sum = self.batch_size_sum.load(Ordering::Relaxed);
        let count = self.batches_total.load(Ordering::Relaxed);
        if count == 0 { 0.0 } else { sum as f64 / count as f64 }
    }
}
