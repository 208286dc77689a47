//! The flicker decision rule.
//!
//! Evaluated once per considered event (an input that survived burst
//! collapsing), given the elapsed time since the previous considered event.

use crate::domain::config::GateConfig;
use std::time::Duration;

/// Outcome of evaluating the decision rule for one considered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Emit the value immediately
    EmitNow,
    /// Defer a `false` emission by the given delay (may be zero; a zero
    /// delay still goes through the scheduled, non-reentrant path)
    EmitAfter(Duration),
}

impl GateDecision {
    /// Check if this decision emits immediately.
    pub fn is_immediate(&self) -> bool {
        matches!(self, GateDecision::EmitNow)
    }

    /// Check if this decision defers the emission.
    pub fn is_deferred(&self) -> bool {
        matches!(self, GateDecision::EmitAfter(_))
    }

    /// Get the deferral delay, if any.
    pub fn delay(&self) -> Option<Duration> {
        match self {
            GateDecision::EmitNow => None,
            GateDecision::EmitAfter(delay) => Some(*delay),
        }
    }
}

/// Decide how a considered event is emitted.
///
/// * `true` always shows immediately; a visible `true` period begins now.
/// * `false` within `ignore_values` of the previous considered event shows
///   immediately: the preceding `true` never became visible, so hiding it
///   carries no flicker risk. The comparison is inclusive.
/// * Any other `false` is deferred so that, measured from when the preceding
///   `true` became visible, at least `flicker_interval` passes before the
///   `false` is observed. The deferral saturates at zero.
pub fn decide(value: bool, interval: Duration, config: &GateConfig) -> GateDecision {
    if value || interval <= config.ignore_values {
        GateDecision::EmitNow
    } else {
        let delay = config
            .flicker_interval
            .saturating_sub(config.ignore_values + interval);
        GateDecision::EmitAfter(delay)
    }
}
