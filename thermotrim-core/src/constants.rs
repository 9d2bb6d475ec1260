//! Calibration Constants for ThermoTrim
//!
//! This module defines the default tuning values and table sizing limits
//! used throughout the compensation engine. Values are chosen for typical
//! low-cost sensor modules; override them through the constructor arguments
//! where a deployment needs different behavior.

// ===== ADJUSTMENT TUNING =====

/// Default tolerance for online factor adjustment (dimensionless).
///
/// An observed factor may differ from the modeled factor by at most this
/// much and still be accepted into the curve. Larger observed deviations
/// are treated as outliers and discarded without touching the table.
///
/// Source: empirical bring-up sessions on uncompensated resistive probes,
/// where startup transients produce factor spikes well above 2.0
pub const DEFAULT_TOLERANCE: f32 = 2.0;

// ===== TABLE SIZING =====

/// Minimum number of breakpoints in a usable factor table.
///
/// Two points define one segment, the smallest curve that supports both
/// interpolation and boundary extrapolation. Anything shorter cannot
/// produce a slope.
pub const MIN_CURVE_POINTS: usize = 2;

/// Suggested capacity for factor tables (breakpoints).
///
/// Calibration curves for thermistor-class sensors rarely need more than
/// a dozen anchors; 32 leaves headroom for dense lab characterization
/// while keeping the table at 256 bytes of stack.
///
/// Source: sizing survey of vendor compensation tables (NTC and RTD
/// datasheets typically publish 10 to 33 entries)
pub const MAX_CURVE_POINTS: usize = 32;
