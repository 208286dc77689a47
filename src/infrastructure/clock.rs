//! Clock adapters for time operations.
//!
//! Provides `SystemClock` for production use and, with the `async` feature,
//! `TokioClock` for code driven by the tokio timer.
//!
//! # Testing
//!
//! See `MockClock` (in `crate::infrastructure::mocks`) for a controllable
//! test clock. Available with the `test-helpers` feature or in test builds:
//!
//! ```toml
//! [dev-dependencies]
//! flicker-gate = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use std::time::Instant;

/// System clock implementation using `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock backed by the tokio timer.
///
/// Reads `tokio::time::Instant::now()`, so a suppressor driven inside a
/// runtime with a paused clock (`tokio::time::pause` or
/// `#[tokio::test(start_paused = true)]`) sees the same virtual time that
/// `sleep_until` honours. Must be used from within a tokio runtime.
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[cfg(feature = "async")]
impl TokioClock {
    /// Create a new tokio-backed clock.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "async")]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
