//! Domain layer - pure timing logic with no external dependencies.
//!
//! This layer contains the core concepts and invariants of the flicker gate:
//! - Timing configuration and its validation
//! - Timestamped signal events
//! - The flicker decision rule
//!
//! All types in this layer are pure and easily testable.

pub mod config;
pub mod event;
pub mod rule;
