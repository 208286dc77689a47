//! Mock implementations for testing.
//!
//! This module provides test doubles for infrastructure adapters,
//! enabling controlled testing of the gate's timing behavior.

pub mod clock;

pub use clock::MockClock;
