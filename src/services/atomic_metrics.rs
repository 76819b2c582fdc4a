use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Contadores do endpoint de comprovantes.
#[derive(Default)]
pub struct AtomicMetrics {
    received: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub delivered: u64,
    pub failed: u64,
    pub success_rate: f64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let received = self.received.load(Ordering::Relaxed);
        let delivered = self.delivered.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);

        MetricsSnapshot {
            received,
            delivered,
            failed,
            success_rate: if received > 0 {
                (delivered as f64 / received as f64) * 100.0
            } else {
                0.0
            },
        }
    }
}
