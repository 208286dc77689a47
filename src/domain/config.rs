//! Gate configuration and validation.

use std::time::Duration;

/// Error returned when gate configuration validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The minimum dwell duration must be greater than zero
    ZeroFlickerInterval,
    /// The ignore window must be strictly shorter than the dwell duration
    IgnoreWindowTooLarge,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroFlickerInterval => {
                write!(f, "flicker_interval must be greater than 0")
            }
            ConfigError::IgnoreWindowTooLarge => {
                write!(f, "ignore_values must be shorter than flicker_interval")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Timing configuration for the flicker gate.
///
/// Two durations control the whole behavior:
///
/// - `ignore_values`: raw input events arriving within this window of each
///   other are collapsed to the last one; a `false` following a `true` within
///   this window is considered never to have been visible and passes through
///   without delay.
/// - `flicker_interval`: minimum time a `true` state must stay visible before
///   a following `false` is allowed to take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Burst-collapsing window; events closer than this are one sample
    pub ignore_values: Duration,
    /// Minimum visible duration for the `true` state
    pub flicker_interval: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            ignore_values: Duration::from_millis(1),
            flicker_interval: Duration::from_millis(200),
        }
    }
}

impl GateConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroFlickerInterval` if `flicker_interval` is
    /// zero, and `ConfigError::IgnoreWindowTooLarge` if `ignore_values` is
    /// not strictly shorter than `flicker_interval` (the dwell guarantee
    /// would be vacuous).
    pub fn new(ignore_values: Duration, flicker_interval: Duration) -> Result<Self, ConfigError> {
        if flicker_interval.is_zero() {
            return Err(ConfigError::ZeroFlickerInterval);
        }
        if ignore_values >= flicker_interval {
            return Err(ConfigError::IgnoreWindowTooLarge);
        }
        Ok(Self {
            ignore_values,
            flicker_interval,
        })
    }
}
