//! Timestamped boolean signal events.

use std::time::Instant;

/// One element of a timed boolean sequence.
///
/// Used for both raw input and filtered output: the gate is a transform from
/// one sequence of these to another. Each event is a distinct position in the
/// sequence; duplicate values are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEvent {
    /// The boolean value (e.g. a "loading" flag)
    pub value: bool,
    /// Logical time the value took (or takes) effect
    pub at: Instant,
}

impl SignalEvent {
    /// Create a new signal event.
    pub fn new(value: bool, at: Instant) -> Self {
        Self { value, at }
    }
}
