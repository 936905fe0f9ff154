//! Lock-free metrics collection and periodic reporting
//!
//! Uses atomics for hot-path operations to avoid mutex contention.
//!
//! NOTE: All atomics use Relaxed ordering intentionally—these are statistical
//! counters only. Do NOT use these atomics for coordination or logic decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Update an atomic max value using compare-and-swap loop
#[inline]
fn update_atomic_max(atomic_max: &AtomicU64, new_value: u64) {
    let mut current_max = atomic_max.load(Ordering::Relaxed);
    while new_value > current_max {
        match atomic_max.compare_exchange_weak(
            current_max,
            new_value,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// Cumulative counters for the trigger pipeline
#[derive(Default)]
pub struct Metrics {
    events_processed: AtomicU64,
    event_latency_total_us: AtomicU64,
    event_latency_max_us: AtomicU64,
    provider_errors: AtomicU64,
    malformed_snapshots: AtomicU64,
    decisions_emitted: AtomicU64,
    dispatch_failures: AtomicU64,
    deliveries_dropped: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event_processed(&self, latency_us: u64) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        self.event_latency_total_us.fetch_add(latency_us, Ordering::Relaxed);
        update_atomic_max(&self.event_latency_max_us, latency_us);
    }

    pub fn record_provider_error(&self) {
        self.provider_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed_snapshot(&self) {
        self.malformed_snapshots.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decision(&self) {
        self.decisions_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dispatch_failure(&self) {
        self.dispatch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_dropped(&self) {
        self.deliveries_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot all counters for reporting
    pub fn report(&self) -> MetricsSummary {
        let events = self.events_processed.load(Ordering::Relaxed);
        let total_us = self.event_latency_total_us.load(Ordering::Relaxed);
        MetricsSummary {
            events_processed: events,
            event_latency_avg_us: if events > 0 { total_us / events } else { 0 },
            event_latency_max_us: self.event_latency_max_us.load(Ordering::Relaxed),
            provider_errors: self.provider_errors.load(Ordering::Relaxed),
            malformed_snapshots: self.malformed_snapshots.load(Ordering::Relaxed),
            decisions_emitted: self.decisions_emitted.load(Ordering::Relaxed),
            dispatch_failures: self.dispatch_failures.load(Ordering::Relaxed),
            deliveries_dropped: self.deliveries_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSummary {
    pub events_processed: u64,
    pub event_latency_avg_us: u64,
    pub event_latency_max_us: u64,
    pub provider_errors: u64,
    pub malformed_snapshots: u64,
    pub decisions_emitted: u64,
    pub dispatch_failures: u64,
    pub deliveries_dropped: u64,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            events = %self.events_processed,
            latency_avg_us = %self.event_latency_avg_us,
            latency_max_us = %self.event_latency_max_us,
            provider_errors = %self.provider_errors,
            malformed_snapshots = %self.malformed_snapshots,
            decisions = %self.decisions_emitted,
            dispatch_failures = %self.dispatch_failures,
            dropped = %self.deliveries_dropped,
            "metrics_summary"
        );
    }
}
