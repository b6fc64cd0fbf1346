//! Advisory memory-pressure check.
//!
//! Reads system memory usage and reports whether callers should free memory,
//! for example by force-flushing their lists. It never touches list state.

use sysinfo::System;
use tracing::debug;

/// Default used/total ratio above which memory should be freed.
pub const DEFAULT_PRESSURE_THRESHOLD: f64 = 0.75;

/// A memory usage reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryPressure {
    /// Used memory in bytes.
    pub used: u64,
    /// Total memory in bytes.
    pub total: u64,
    /// `used / total`, or 0 when the total is unknown.
    pub ratio: f64,
    /// Whether `ratio` exceeds the threshold.
    pub should_free: bool,
}

impl MemoryPressure {
    /// Evaluates a reading against `threshold`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_usage(used: u64, total: u64, threshold: f64) -> Self {
        let ratio = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64
        };

        Self {
            used,
            total,
            ratio,
            should_free: ratio > threshold,
        }
    }
}

/// Samples current memory usage and compares it with `threshold`.
#[must_use]
pub fn check_pressure(threshold: f64) -> MemoryPressure {
    let mut sys = System::new();
    sys.refresh_memory();

    let pressure = MemoryPressure::from_usage(sys.used_memory(), sys.total_memory(), threshold);
    if pressure.should_free {
        debug!(
            used = pressure.used,
            total = pressure.total,
            ratio = pressure.ratio,
            threshold,
            "memory pressure above threshold"
        );
    }
    pressure
}
