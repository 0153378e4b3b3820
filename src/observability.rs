//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    entries_planned: AtomicU64,
    downloads_completed: AtomicU64,
    downloads_failed: AtomicU64,
    hooks_applied: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries_planned(&self, count: usize) {
        self.entries_planned.fetch_add(count as u64, Ordering::Relaxed);
        tracing::debug!(counter = "entries_planned", count, "Metric incremented");
    }

    pub fn download_completed(&self) {
        self.downloads_completed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "downloads_completed", "Metric incremented");
    }

    pub fn download_failed(&self) {
        self.downloads_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "downloads_failed", "Metric incremented");
    }

    pub fn hook_applied(&self) {
        self.hooks_applied.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "hooks_applied", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            entries_planned: self.entries_planned.load(Ordering::Relaxed),
            downloads_completed: self.downloads_completed.load(Ordering::Relaxed),
            downloads_failed: self.downloads_failed.load(Ordering::Relaxed),
            hooks_applied: self.hooks_applied.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub entries_planned: u64,
    pub downloads_completed: u64,
    pub downloads_failed: u64,
    pub hooks_applied: u64,
}
