//! Core calibration engine for ThermoTrim
//!
//! Turns raw sensor readings into temperature-compensated values using a
//! piecewise-linear factor curve, and refines that curve online from
//! calibration observations. Designed for edge devices with limited
//! resources.
//!
//! Key constraints:
//! - Fixed-capacity tables, no heap allocation
//! - Total lookups: the working curve always answers
//! - Malformed datasets rejected at construction, not mid-session
//!
//! ```
//! use thermotrim_core::{Adjustment, Breakpoint, Observation, TemperatureCompensator};
//!
//! let preset = [
//!     Breakpoint::new(-10.0, 0.700),
//!     Breakpoint::new(10.0, 0.900),
//!     Breakpoint::new(30.0, 1.000),
//! ];
//! let mut compensator = TemperatureCompensator::<8>::with_defaults(&preset)?;
//!
//! // 0°C sits midway between the -10°C and 10°C anchors
//! assert!((compensator.factor_at(0.0) - 0.8).abs() < 1e-6);
//!
//! // Fold in a bench observation: at 25°C the sensor read 950 where the
//! // reference instrument said 980. 25°C falls in the segment starting at
//! // the 10°C anchor, so that anchor is the one refined.
//! let outcome = compensator.adjust(Observation::new(25.0, 950.0, 980.0))?;
//! assert!(matches!(outcome, Adjustment::Applied { index: 1, .. }));
//!
//! // Correct a raw reading taken at the refined anchor's temperature
//! let corrected = compensator.calibrate(950.0, 10.0);
//! assert!((corrected - 980.0).abs() < 1e-2);
//! # Ok::<(), thermotrim_core::CalibrationError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod compensator;
pub mod constants;
pub mod errors;
pub mod reference;
pub mod table;

// Public API
pub use compensator::{Adjustment, TemperatureCompensator};
pub use errors::{CalibrationError, CalibrationResult};
pub use reference::Observation;
pub use table::{Breakpoint, FactorTable};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
