//! Temperature Compensation Engine
//!
//! ## Lifecycle
//!
//! A [`TemperatureCompensator`] starts from a preset curve shipped with the
//! device, typically measured once per product family rather than per unit.
//! In the field it refines that curve from individual observations:
//!
//! ```text
//! preset curve ──> adjust(observation) ──> refined curve ──> calibrate(raw)
//!                      │
//!                      └── discarded when the observation deviates
//!                          beyond the tolerance
//! ```
//!
//! ## Tolerance Gate
//!
//! Every observation implies a factor (target / measured). The gate
//! compares it against what the current working curve already predicts for
//! that temperature; only observations within `tolerance` of the
//! prediction are folded in. A loose probe contact or a startup transient
//! produces a wildly different factor and is dropped on the floor, leaving
//! the curve exactly as it was.
//!
//! ## Anchor Rewrites
//!
//! An accepted observation overwrites the *left* anchor of the segment its
//! temperature falls in. A reading taken exactly on an interior breakpoint
//! resolves to the segment ending there and rewrites the anchor one to the
//! left of where the temperature sits; a reading beyond the covered span
//! rewrites the nearest boundary anchor. Callers that want to pin a
//! specific breakpoint should sample strictly inside its right-hand
//! segment.

use crate::{
    constants::DEFAULT_TOLERANCE,
    errors::{CalibrationError, CalibrationResult},
    reference::{derive_table, Observation},
    table::{Breakpoint, FactorTable},
};

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Outcome of one adjustment attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adjustment {
    /// The observation agreed with the working curve closely enough; the
    /// anchor at `index` now stores the observed factor.
    Applied {
        /// Index of the rewritten anchor
        index: usize,
        /// Factor now stored at that anchor
        factor: f32,
    },
    /// The observation deviated beyond the tolerance and was discarded.
    /// The working curve is untouched.
    Rejected {
        /// Absolute deviation between observed and predicted factor
        deviation: f32,
        /// Tolerance the deviation was measured against
        tolerance: f32,
    },
}

/// Online temperature compensator over a fixed-capacity factor curve.
///
/// Owns its working curve; nothing is shared or global. Cloning the
/// compensator snapshots the curve, which makes before/after comparisons
/// cheap in calibration tooling.
#[derive(Debug, Clone)]
pub struct TemperatureCompensator<const N: usize> {
    tolerance: f32,
    curve: FactorTable<N>,
}

impl<const N: usize> TemperatureCompensator<N> {
    /// Create a compensator from a preset curve and an adjustment tolerance.
    ///
    /// The preset must satisfy the table invariants (see
    /// [`FactorTable::from_points`]); the tolerance must be finite and
    /// non-negative.
    pub fn new(preset: &[Breakpoint], tolerance: f32) -> CalibrationResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CalibrationError::InvalidValue);
        }
        Ok(Self {
            tolerance,
            curve: FactorTable::from_points(preset)?,
        })
    }

    /// Create a compensator with [`DEFAULT_TOLERANCE`]
    pub fn with_defaults(preset: &[Breakpoint]) -> CalibrationResult<Self> {
        Self::new(preset, DEFAULT_TOLERANCE)
    }

    /// Tolerance used by the adjustment gate
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Current working curve
    pub fn curve(&self) -> &FactorTable<N> {
        &self.curve
    }

    /// Compensation factor the working curve predicts at `temperature_c`.
    ///
    /// Total over finite queries; see [`FactorTable::factor_at`].
    pub fn factor_at(&self, temperature_c: f32) -> f32 {
        self.curve.factor_at(temperature_c)
    }

    /// Correct a raw reading taken at `temperature_c`.
    ///
    /// Multiplies the reading by the predicted factor. Purely arithmetic;
    /// a NaN reading or temperature propagates NaN.
    pub fn calibrate(&self, raw: f32, temperature_c: f32) -> f32 {
        raw * self.curve.factor_at(temperature_c)
    }

    /// Factor an ad-hoc reference dataset implies at `temperature_c`.
    ///
    /// Derives a curve from `observations` (see
    /// [`derive_table`](crate::reference::derive_table)) and looks the
    /// temperature up under the bounded policy: `Ok(None)` means the query
    /// falls outside the dataset's span. The working curve is not
    /// consulted or modified.
    pub fn reference_factor_at(
        &self,
        observations: &[Observation],
        temperature_c: f32,
    ) -> CalibrationResult<Option<f32>> {
        let reference: FactorTable<N> = derive_table(observations)?;
        Ok(reference.factor_in_range(temperature_c))
    }

    /// Fold one observation into the working curve.
    ///
    /// The observed factor is gated against the curve's prediction at the
    /// observation's temperature. Within tolerance, the segment's left
    /// anchor is rewritten and [`Adjustment::Applied`] reports where;
    /// beyond tolerance the curve stays untouched and
    /// [`Adjustment::Rejected`] reports the deviation.
    ///
    /// Fails without touching the curve when the observation itself is
    /// unusable (zero or non-finite measurement, non-finite temperature
    /// or target).
    pub fn adjust(&mut self, observation: Observation) -> CalibrationResult<Adjustment> {
        let target_factor = match observation.implied_factor() {
            Ok(factor) => factor,
            Err(error) => {
                log_warn!(
                    "observation at {}°C unusable: {}",
                    observation.temperature_c,
                    error
                );
                return Err(error);
            }
        };

        let index = self.curve.anchor_index(observation.temperature_c);
        let predicted = self.curve.factor_at(observation.temperature_c);
        let deviation = libm::fabsf(target_factor - predicted);

        if deviation <= self.tolerance {
            self.curve.rewrite_anchor(index, target_factor);
            log_info!(
                "factor[{}] set to {} from observation at {}°C",
                index,
                target_factor,
                observation.temperature_c
            );
            Ok(Adjustment::Applied {
                index,
                factor: target_factor,
            })
        } else {
            log_debug!(
                "observation at {}°C discarded: deviation {} exceeds tolerance {}",
                observation.temperature_c,
                deviation,
                self.tolerance
            );
            Ok(Adjustment::Rejected {
                deviation,
                tolerance: self.tolerance,
            })
        }
    }
}
