//! The flicker suppressor state machine.
//!
//! Re-expresses the declarative "audit, measure interval, maybe defer"
//! pipeline as an explicit state machine holding the open burst window, the
//! previous considered timestamp and the pending hide deadline, advanced by a
//! single event-processing path. Real inputs and timer firings share that
//! path, so decision and cancellation logic are not duplicated.

use crate::application::metrics::Metrics;
use crate::application::ports::Clock;
use crate::domain::config::{ConfigError, GateConfig};
use crate::domain::event::SignalEvent;
use crate::domain::rule::{self, GateDecision};
use crate::infrastructure::clock::SystemClock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// An open burst window: raw events arriving while it is open are collapsed
/// to the last value, which becomes a considered event when the window
/// closes.
#[derive(Debug, Clone, Copy)]
struct AuditWindow {
    value: bool,
    deadline: Instant,
}

/// Temporal filter over a boolean signal.
///
/// Consumes raw timestamped boolean events and produces a filtered sequence:
/// `true` passes through with no added delay, while a `false` that would cut
/// a visible `true` period short is deferred until the period has lasted at
/// least `flicker_interval`.
///
/// The machine is single-threaded by construction: every entry point first
/// drains deadlines that have come due at the injected clock's current time,
/// then applies the new work, so emissions always come out in logical time
/// order. At most one hide is ever pending; any new raw input supersedes it.
///
/// Drive it with [`push`](Self::push) for each raw input, [`poll`](Self::poll)
/// when [`next_deadline`](Self::next_deadline) passes, and
/// [`finish`](Self::finish) when the input sequence completes.
#[derive(Debug)]
pub struct FlickerSuppressor {
    config: GateConfig,
    clock: Arc<dyn Clock>,
    metrics: Metrics,
    last_considered_at: Instant,
    audit: Option<AuditWindow>,
    pending_hide: Option<Instant>,
    done: bool,
}

impl FlickerSuppressor {
    /// Create a suppressor with a validated config and an injected clock.
    ///
    /// The interval of the first considered event is measured from this call.
    pub fn new(config: GateConfig, clock: Arc<dyn Clock>) -> Self {
        let start = clock.now();
        Self {
            config,
            clock,
            metrics: Metrics::new(),
            last_considered_at: start,
            audit: None,
            pending_hide: None,
            done: false,
        }
    }

    /// Start building a suppressor.
    pub fn builder() -> FlickerSuppressorBuilder {
        FlickerSuppressorBuilder::default()
    }

    /// Feed one raw input event, timestamped at the clock's current time.
    ///
    /// Returns the emissions that became due up to now. Deadlines that
    /// already passed fire first, with their own deadline timestamps; a hide
    /// still pending after that is superseded by this arrival.
    pub fn push(&mut self, value: bool) -> Vec<SignalEvent> {
        let mut out = Vec::new();
        if self.done {
            debug!(value, "input after completion ignored");
            return out;
        }
        let now = self.clock.now();
        self.drain_due(now, &mut out);
        self.metrics.record_input();

        if self.pending_hide.take().is_some() {
            self.metrics.record_cancelled();
            trace!(value, "pending hide superseded by new input");
        }
        match self.audit.as_mut() {
            Some(window) => {
                window.value = value;
                self.metrics.record_coalesced();
                trace!(value, "collapsed into open burst window");
            }
            None => {
                self.audit = Some(AuditWindow {
                    value,
                    deadline: now + self.config.ignore_values,
                });
            }
        }
        out
    }

    /// Fire any deadline that has come due at the clock's current time.
    pub fn poll(&mut self) -> Vec<SignalEvent> {
        let mut out = Vec::new();
        if !self.done {
            let now = self.clock.now();
            self.drain_due(now, &mut out);
        }
        out
    }

    /// Complete the input sequence.
    ///
    /// Due deadlines fire normally; a still-open burst window is discarded
    /// (its value was inside the ignore window and never became visible); a
    /// still-pending hide is flushed as a `false` at completion time. After
    /// this the machine accepts no further input.
    pub fn finish(&mut self) -> Vec<SignalEvent> {
        let mut out = Vec::new();
        if self.done {
            return out;
        }
        let now = self.clock.now();
        self.drain_due(now, &mut out);

        if self.audit.take().is_some() {
            trace!("open burst window discarded at completion");
        }
        if self.pending_hide.take().is_some() {
            self.metrics.record_flushed();
            debug!("pending hide flushed at completion");
            out.push(SignalEvent::new(false, now));
        }
        self.done = true;
        out
    }

    /// Tear down after an upstream failure.
    ///
    /// Drops the pending hide and the open burst window without emitting
    /// anything; the caller forwards the upstream error unchanged.
    pub fn abort(&mut self) {
        if self.done {
            return;
        }
        if self.pending_hide.take().is_some() {
            self.metrics.record_cancelled();
        }
        self.audit = None;
        self.done = true;
        debug!("gate torn down, pending work dropped");
    }

    /// The next instant at which [`poll`](Self::poll) will produce output,
    /// if any deadline is outstanding.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.audit.as_ref().map(|w| w.deadline), self.pending_hide) {
            (Some(audit), Some(hide)) => Some(audit.min(hide)),
            (audit, hide) => audit.or(hide),
        }
    }

    /// Whether the input sequence has completed or failed.
    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Get the gate configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Get the gate metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Fire every deadline with `deadline <= now`, earliest first.
    ///
    /// A burst window closing can schedule a hide that is itself already due
    /// (the deferral clamps at zero), so this loops until nothing is due.
    fn drain_due(&mut self, now: Instant, out: &mut Vec<SignalEvent>) {
        loop {
            let audit_due = self
                .audit
                .as_ref()
                .map(|w| w.deadline)
                .filter(|deadline| *deadline <= now);
            let hide_due = self.pending_hide.filter(|deadline| *deadline <= now);

            match (audit_due, hide_due) {
                // A window closing at the same instant as a hide deadline
                // produces the considered event first, which supersedes the
                // hide. Cannot happen while the invariant below holds, but
                // the ordering is load-bearing if it ever does.
                (Some(audit), Some(hide)) if audit <= hide => self.close_window(out),
                (Some(_), None) => self.close_window(out),
                (_, Some(hide)) => {
                    self.pending_hide = None;
                    self.metrics.record_fired();
                    trace!("deferred hide fired");
                    out.push(SignalEvent::new(false, hide));
                }
                (None, None) => break,
            }
        }
    }

    /// Close the open burst window and run its value through the rule.
    fn close_window(&mut self, out: &mut Vec<SignalEvent>) {
        let Some(window) = self.audit.take() else {
            return;
        };
        self.consider(window.value, window.deadline, out);
    }

    /// Evaluate the decision rule for one considered event.
    ///
    /// Invariant on exit: an open burst window implies no pending hide, since
    /// the input that opened the window already superseded it.
    fn consider(&mut self, value: bool, at: Instant, out: &mut Vec<SignalEvent>) {
        if self.pending_hide.take().is_some() {
            self.metrics.record_cancelled();
            trace!(value, "pending hide superseded by considered event");
        }
        let interval = at.saturating_duration_since(self.last_considered_at);
        self.last_considered_at = at;

        match rule::decide(value, interval, &self.config) {
            GateDecision::EmitNow => {
                self.metrics.record_immediate();
                out.push(SignalEvent::new(value, at));
            }
            GateDecision::EmitAfter(delay) => {
                self.metrics.record_scheduled();
                trace!(delay_ms = delay.as_millis() as u64, "hide deferred");
                self.pending_hide = Some(at + delay);
            }
        }
    }
}

/// Builder for [`FlickerSuppressor`].
///
/// Defaults: 1ms ignore window, 200ms minimum dwell, system clock.
pub struct FlickerSuppressorBuilder {
    ignore_values: Duration,
    flicker_interval: Duration,
    clock: Option<Arc<dyn Clock>>,
}

impl Default for FlickerSuppressorBuilder {
    fn default() -> Self {
        let defaults = GateConfig::default();
        Self {
            ignore_values: defaults.ignore_values,
            flicker_interval: defaults.flicker_interval,
            clock: None,
        }
    }
}

impl FlickerSuppressorBuilder {
    /// Set the burst-collapsing window.
    pub fn with_ignore_values(mut self, ignore_values: Duration) -> Self {
        self.ignore_values = ignore_values;
        self
    }

    /// Set the minimum visible duration for the `true` state.
    pub fn with_flicker_interval(mut self, flicker_interval: Duration) -> Self {
        self.flicker_interval = flicker_interval;
        self
    }

    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the suppressor, validating the configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the durations are inconsistent; see
    /// [`GateConfig::new`].
    pub fn build(self) -> Result<FlickerSuppressor, ConfigError> {
        let config = GateConfig::new(self.ignore_values, self.flicker_interval)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        Ok(FlickerSuppressor::new(config, clock))
    }
}
