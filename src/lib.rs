//! # flicker-gate
//!
//! Flicker suppression for boolean state signals.
//!
//! A loading flag that flips to `true` and back within a few tens of
//! milliseconds produces a spinner that blinks. This crate provides a single
//! temporal filter over such a signal: `true` transitions pass through with
//! no added delay, while a `false` that would cut a visible `true` period
//! short is held back until the period has lasted at least a configurable
//! minimum (`flicker_interval`, default 200ms). Bursts of changes faster
//! than the measurement resolution (`ignore_values`, default 1ms) are
//! collapsed to their trailing value first, and a `false` arriving within
//! that window passes through immediately: its `true` never became visible,
//! so there is nothing to protect.
//!
//! ## Quick Start
//!
//! The core is a synchronous state machine driven by an injected clock:
//!
//! ```rust
//! use flicker_gate::FlickerSuppressor;
//! use std::time::Duration;
//!
//! let mut gate = FlickerSuppressor::builder()
//!     .with_flicker_interval(Duration::from_millis(200))
//!     .build()
//!     .unwrap();
//!
//! // Feed raw values as they happen; poll when `next_deadline()` passes.
//! let shown = gate.push(true);
//! for event in shown.iter().chain(gate.poll().iter()) {
//!     println!("visible: {} at {:?}", event.value, event.at);
//! }
//! ```
//!
//! With the `async` feature, [`SignalGate`] runs the machine in a tokio task
//! between two mpsc channels, honouring deadlines with the tokio timer:
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn demo() {
//! use flicker_gate::{GateConfig, SignalGate};
//! use tokio::sync::mpsc;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter("flicker_gate=trace")
//!     .init();
//!
//! let (tx, rx) = mpsc::channel::<Result<bool, std::io::Error>>(16);
//! let mut gate = SignalGate::spawn(GateConfig::default(), rx);
//!
//! tx.send(Ok(true)).await.unwrap();
//! tx.send(Ok(false)).await.unwrap(); // held until the dwell time elapses
//! drop(tx);
//!
//! while let Some(value) = gate.recv().await {
//!     println!("visible: {:?}", value);
//! }
//! # }
//! ```
//!
//! ## Timing model
//!
//! Per raw input event, in arrival order:
//!
//! 1. **Burst collapsing**: events arriving while an `ignore_values` window
//!    is open overwrite its value; the window's trailing value becomes the
//!    *considered* event when the window closes.
//! 2. **Interval**: elapsed time since the previous considered event.
//! 3. **Decision**: `true`, or `false` with `interval <= ignore_values`,
//!    emits immediately. Any other `false` is deferred by
//!    `flicker_interval - ignore_values - interval` (never negative), so at
//!    least `flicker_interval` passes between the `true` becoming visible
//!    and the `false` being observed.
//! 4. **Supersession**: any new input cancels a still-pending deferred
//!    `false`; at most one is ever outstanding.
//! 5. **Completion**: a pending deferred `false` is flushed before the
//!    output sequence completes; upstream errors pass through unchanged and
//!    cancel it instead.
//!
//! The filter holds three pieces of state (open burst window, previous
//! considered timestamp, pending hide deadline) and is advanced by a single
//! event-processing path, so real inputs and timer firings cannot race.
//!
//! ## Testing
//!
//! Timing behavior is deterministic under a simulated clock: inject a
//! `MockClock` (feature `test-helpers`) into the state machine, or drive
//! [`SignalGate`] under `#[tokio::test(start_paused = true)]`.

// Domain layer - pure timing logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    config::{ConfigError, GateConfig},
    event::SignalEvent,
    rule::{decide, GateDecision},
};

pub use application::{
    metrics::{Metrics, MetricsSnapshot},
    ports::Clock,
    suppressor::{FlickerSuppressor, FlickerSuppressorBuilder},
};

pub use infrastructure::clock::SystemClock;

#[cfg(feature = "async")]
pub use infrastructure::{channel::SignalGate, clock::TokioClock};
