//! Relay counters.
//!
//! Atomic counters per relay direction. The relay loop is their only
//! writer; they are read when a summary is logged.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Atomic counter for thread-safe increment operations.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Increments the counter by 1.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds a value to the counter.
    pub fn add(&self, val: u64) {
        self.0.fetch_add(val, Ordering::Relaxed);
    }

    /// Gets the current value of the counter.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters for one relay direction.
#[derive(Debug, Default)]
pub struct DirectionStats {
    /// Frames read from the ingress interface.
    pub received: Counter,
    /// Bytes read from the ingress interface.
    pub received_bytes: Counter,
    /// Frames written to the egress interface.
    pub relayed: Counter,
    /// Frames dropped by the admission policy.
    pub suppressed: Counter,
}

impl DirectionStats {
    pub fn record_rx(&self, bytes: usize) {
        self.received.inc();
        self.received_bytes.add(bytes as u64);
    }

    pub fn record_relayed(&self) {
        self.relayed.inc();
    }

    pub fn record_suppressed(&self) {
        self.suppressed.inc();
    }
}

/// Counters for both relay directions.
#[derive(Debug, Default)]
pub struct RelayStats {
    /// ONT to router.
    pub upstream: DirectionStats,
    /// Router to ONT.
    pub downstream: DirectionStats,
}

impl RelayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs one summary line at info level.
    pub fn log_summary(&self) {
        info!(
            from_ont = self.upstream.received.get(),
            from_ont_bytes = self.upstream.received_bytes.get(),
            to_router = self.upstream.relayed.get(),
            from_router = self.downstream.received.get(),
            from_router_bytes = self.downstream.received_bytes.get(),
            to_ont = self.downstream.relayed.get(),
            suppressed = self.downstream.suppressed.get(),
            "relay statistics"
        );
    }
}
