//! Observability metrics for the flicker gate.
//!
//! Provides counters about gating behavior for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking gate statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Cloning shares the underlying counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total raw input events consumed
    events_in: AtomicU64,
    /// Raw events collapsed into an already-open burst window
    events_coalesced: AtomicU64,
    /// Considered events emitted with no added delay
    emitted_immediate: AtomicU64,
    /// Hide emissions scheduled for later
    hides_scheduled: AtomicU64,
    /// Scheduled hides cancelled by a superseding input
    hides_cancelled: AtomicU64,
    /// Scheduled hides that fired at their deadline
    hides_fired: AtomicU64,
    /// Scheduled hides flushed early at completion
    hides_flushed: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                events_in: AtomicU64::new(0),
                events_coalesced: AtomicU64::new(0),
                emitted_immediate: AtomicU64::new(0),
                hides_scheduled: AtomicU64::new(0),
                hides_cancelled: AtomicU64::new(0),
                hides_fired: AtomicU64::new(0),
                hides_flushed: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_input(&self) {
        self.inner.events_in.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_coalesced(&self) {
        self.inner.events_coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_immediate(&self) {
        self.inner.emitted_immediate.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_scheduled(&self) {
        self.inner.hides_scheduled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cancelled(&self) {
        self.inner.hides_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fired(&self) {
        self.inner.hides_fired.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flushed(&self) {
        self.inner.hides_flushed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of raw input events consumed.
    pub fn events_in(&self) -> u64 {
        self.inner.events_in.load(Ordering::Relaxed)
    }

    /// Get the number of raw events collapsed into a burst window.
    pub fn events_coalesced(&self) -> u64 {
        self.inner.events_coalesced.load(Ordering::Relaxed)
    }

    /// Get the number of considered events emitted with no added delay.
    pub fn emitted_immediate(&self) -> u64 {
        self.inner.emitted_immediate.load(Ordering::Relaxed)
    }

    /// Get the number of hide emissions scheduled.
    pub fn hides_scheduled(&self) -> u64 {
        self.inner.hides_scheduled.load(Ordering::Relaxed)
    }

    /// Get the number of scheduled hides cancelled by a superseding input.
    pub fn hides_cancelled(&self) -> u64 {
        self.inner.hides_cancelled.load(Ordering::Relaxed)
    }

    /// Get the number of scheduled hides that fired at their deadline.
    pub fn hides_fired(&self) -> u64 {
        self.inner.hides_fired.load(Ordering::Relaxed)
    }

    /// Get the number of scheduled hides flushed early at completion.
    pub fn hides_flushed(&self) -> u64 {
        self.inner.hides_flushed.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_in: self.events_in(),
            events_coalesced: self.events_coalesced(),
            emitted_immediate: self.emitted_immediate(),
            hides_scheduled: self.hides_scheduled(),
            hides_cancelled: self.hides_cancelled(),
            hides_fired: self.hides_fired(),
            hides_flushed: self.hides_flushed(),
        }
    }

    /// Reset all metrics to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.events_in.store(0, Ordering::Relaxed);
        self.inner.events_coalesced.store(0, Ordering::Relaxed);
        self.inner.emitted_immediate.store(0, Ordering::Relaxed);
        self.inner.hides_scheduled.store(0, Ordering::Relaxed);
        self.inner.hides_cancelled.store(0, Ordering::Relaxed);
        self.inner.hides_fired.store(0, Ordering::Relaxed);
        self.inner.hides_flushed.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total raw input events consumed
    pub events_in: u64,
    /// Raw events collapsed into an already-open burst window
    pub events_coalesced: u64,
    /// Considered events emitted with no added delay
    pub emitted_immediate: u64,
    /// Hide emissions scheduled for later
    pub hides_scheduled: u64,
    /// Scheduled hides cancelled by a superseding input
    pub hides_cancelled: u64,
    /// Scheduled hides that fired at their deadline
    pub hides_fired: u64,
    /// Scheduled hides flushed early at completion
    pub hides_flushed: u64,
}

impl MetricsSnapshot {
    /// Total emissions produced by the gate.
    pub fn total_emitted(&self) -> u64 {
        self.emitted_immediate
            .saturating_add(self.hides_fired)
            .saturating_add(self.hides_flushed)
    }

    /// Ratio of raw inputs absorbed by burst collapsing (0.0 to 1.0).
    ///
    /// Returns 0.0 if no events have been consumed.
    pub fn coalesce_rate(&self) -> f64 {
        if self.events_in == 0 {
            0.0
        } else {
            self.events_coalesced as f64 / self.events_in as f64
        }
    }
}
