//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the
//! application layer needs. Infrastructure adapters implement these ports.

use std::fmt::Debug;
use std::time::Instant;

/// Port for obtaining current time.
///
/// This abstraction allows the suppressor to work with time without
/// depending on a wall clock, so timing behavior can be tested against a
/// simulated clock instead of real sleeps. Infrastructure provides concrete
/// implementations (`SystemClock`, `TokioClock`, `MockClock`).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}
