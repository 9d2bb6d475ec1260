//! Error Types for Calibration Failures
//!
//! ## Design Philosophy
//!
//! ThermoTrim's error system is designed with embedded systems in mind:
//!
//! 1. **Small Size**: Each error variant is kept minimal since errors are
//!    returned from lookup and adjustment hot paths.
//!
//! 2. **No Heap Allocation**: All error data is inline - no String, no
//!    boxed sources. This ensures deterministic memory usage.
//!
//! 3. **Copy Semantics**: Errors implement Copy for efficient return from
//!    functions without move semantics complications.
//!
//! 4. **Actionable Information**: Each error carries the index or value
//!    that caused it, so a caller can point at the offending dataset entry
//!    without replaying the validation.
//!
//! ## Error Categories
//!
//! Errors fall into two main categories:
//!
//! ### Dataset Violations
//! - `TooFewPoints`: Not enough breakpoints to define a segment
//! - `CapacityExceeded`: Dataset larger than the table's fixed capacity
//! - `NonMonotonic`: Temperatures not strictly increasing
//! - `NonPositiveFactor`: A factor that would invert or zero readings
//!
//! ### Arithmetic Violations
//! - `ZeroMeasurement`: Measured value of zero makes the implied factor undefined
//! - `InvalidValue`: Mathematically invalid input (NaN, infinity)
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use thermotrim_core::{Adjustment, CalibrationError, Observation, TemperatureCompensator};
//!
//! fn handle_observation<const N: usize>(
//!     compensator: &mut TemperatureCompensator<N>,
//!     observation: Observation,
//! ) {
//!     match compensator.adjust(observation) {
//!         Ok(Adjustment::Applied { .. }) => {
//!             // Curve updated - nothing else to do
//!         }
//!         Ok(Adjustment::Rejected { .. }) => {
//!             // Outlier reading - worth counting, not worth aborting
//!             // increment_outlier_counter();
//!         }
//!         Err(CalibrationError::ZeroMeasurement { .. }) => {
//!             // Sensor returned nothing at all - likely disconnected
//!             // mark_probe_faulty();
//!         }
//!         Err(_) => {
//!             // Malformed observation - log and investigate
//!         }
//!     }
//! }
//! ```
//!
//! ## Memory Layout
//!
//! The largest error variant determines the enum size:
//! ```text
//! CalibrationError size (32-bit target) = 12 bytes
//! ├── Discriminant: 4 bytes
//! └── Largest variant (TooFewPoints): 8 bytes
//! ```

use thiserror_no_std::Error;

/// Result type for calibration operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Calibration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// Measured value of zero - the implied factor target/measured is undefined
    #[error("Measured value at {temperature_c}°C is zero, factor undefined")]
    ZeroMeasurement {
        /// Temperature of the offending observation
        temperature_c: f32,
    },

    /// Dataset too small to define even one curve segment
    #[error("Need at least {required} breakpoints, have {available}")]
    TooFewPoints {
        /// Minimum number of breakpoints for a usable curve
        required: usize,
        /// Actual number of points supplied
        available: usize,
    },

    /// Dataset larger than the table's compile-time capacity
    #[error("Table capacity {capacity} exceeded by {supplied} points")]
    CapacityExceeded {
        /// Fixed capacity of the table
        capacity: usize,
        /// Number of points supplied
        supplied: usize,
    },

    /// Breakpoint temperatures must be strictly increasing
    #[error("Temperature at index {index} does not increase over its predecessor")]
    NonMonotonic {
        /// Index of the first point that breaks the ordering
        index: usize,
    },

    /// Compensation factors must stay positive to keep readings invertible
    #[error("Factor at index {index} is zero or negative")]
    NonPositiveFactor {
        /// Index of the offending breakpoint
        index: usize,
    },

    /// Value makes no mathematical sense (NaN, infinity, etc)
    #[error("Invalid value: not a valid number")]
    InvalidValue,
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroMeasurement { temperature_c } =>
                defmt::write!(fmt, "Zero measurement at {}°C", temperature_c),
            Self::TooFewPoints { required, available } =>
                defmt::write!(fmt, "Need {} breakpoints, have {}", required, available),
            Self::CapacityExceeded { capacity, supplied } =>
                defmt::write!(fmt, "Capacity {} exceeded by {} points", capacity, supplied),
            Self::NonMonotonic { index } =>
                defmt::write!(fmt, "Non-increasing temperature at index {}", index),
            Self::NonPositiveFactor { index } =>
                defmt::write!(fmt, "Non-positive factor at index {}", index),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
        }
    }
}
