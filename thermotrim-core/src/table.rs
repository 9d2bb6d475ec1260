//! Breakpoint Tables for Piecewise-Linear Compensation Curves
//!
//! ## Curve Model
//!
//! A compensation curve is an ordered list of (temperature, factor) anchor
//! points. Between anchors the factor follows the straight line through the
//! neighboring pair, so each adjacent pair defines one segment:
//!
//! ```text
//! temperature:   T0        T1        T2        T3
//!                 |---------|---------|---------|
//! segment:            [0]       [1]       [2]
//! bracket rule:  T[i] <= t < T[i+1]   (first match wins)
//! ```
//!
//! Temperatures must be strictly increasing and factors strictly positive;
//! [`FactorTable::from_points`] rejects anything else up front so that the
//! lookup and adjustment paths never have to re-check.
//!
//! ## Two Lookup Policies
//!
//! Working curves and reference sweeps want different behavior outside the
//! covered temperature span, so the table exposes both:
//!
//! - [`FactorTable::factor_at`] is total: queries beyond either end follow
//!   the boundary segment's line outward. A live compensator must always
//!   produce some factor, even for a probe that drifted past the
//!   characterized range.
//! - [`FactorTable::factor_in_range`] refuses to extrapolate and returns
//!   `None` outside the span. Reference sweeps use it to report "no data"
//!   instead of inventing values.
//!
//! A query exactly on the upper boundary matches no half-open bracket.
//! `factor_at` evaluates the last segment's line there while
//! `factor_in_range` returns the stored anchor factor; the two agree to
//! within rounding.
//!
//! ## Online Adjustment Support
//!
//! The adjustment path resolves a query to the *left anchor* of its segment
//! with a locator that advances only while the query is strictly above the
//! next temperature. A query sitting exactly on an interior breakpoint
//! therefore resolves to the segment ending there, and a query beyond the
//! last breakpoint resolves to the last anchor itself. After an anchor is
//! rewritten, ripple sweeps re-line any points lying strictly inside the
//! two adjacent segments; with strictly increasing temperatures no such
//! points exist and the sweeps keep the update contained to those segments.
//!
//! ## Memory
//!
//! Tables are fixed-capacity and stack-only:
//!
//! ```text
//! FactorTable<16> = 16 anchors × 8 bytes + length ≈ 136 bytes
//! ```

use heapless::Vec;

use crate::{
    constants::MIN_CURVE_POINTS,
    errors::{CalibrationError, CalibrationResult},
};

/// One anchor point of a compensation curve.
///
/// Pairs a temperature with the multiplicative factor that corrects raw
/// readings taken at that temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Breakpoint {
    /// Temperature in Celsius
    pub temperature_c: f32,
    /// Compensation factor applied to raw readings at this temperature
    pub factor: f32,
}

impl Breakpoint {
    /// Create a breakpoint from a temperature and its factor
    pub const fn new(temperature_c: f32, factor: f32) -> Self {
        Self {
            temperature_c,
            factor,
        }
    }
}

/// Ordered table of curve anchors with fixed capacity `N`.
///
/// Construction validates the dataset once; every later operation relies on
/// the table holding at least [`MIN_CURVE_POINTS`] anchors in strictly
/// increasing temperature order with positive, finite factors.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable<const N: usize> {
    points: Vec<Breakpoint, N>,
}

impl<const N: usize> FactorTable<N> {
    /// Build a table from anchors sorted by strictly increasing temperature.
    ///
    /// Fails fast on malformed datasets:
    /// - fewer than [`MIN_CURVE_POINTS`] entries
    /// - more entries than the capacity `N`
    /// - non-finite temperatures or factors
    /// - zero or negative factors
    /// - temperatures that repeat or decrease
    pub fn from_points(points: &[Breakpoint]) -> CalibrationResult<Self> {
        if points.len() < MIN_CURVE_POINTS {
            return Err(CalibrationError::TooFewPoints {
                required: MIN_CURVE_POINTS,
                available: points.len(),
            });
        }
        let points = Vec::from_slice(points).map_err(|_| CalibrationError::CapacityExceeded {
            capacity: N,
            supplied: points.len(),
        })?;
        let table = Self { points };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> CalibrationResult<()> {
        for (index, point) in self.points.iter().enumerate() {
            if !point.temperature_c.is_finite() || !point.factor.is_finite() {
                return Err(CalibrationError::InvalidValue);
            }
            if point.factor <= 0.0 {
                return Err(CalibrationError::NonPositiveFactor { index });
            }
            if index > 0 && point.temperature_c <= self.points[index - 1].temperature_c {
                return Err(CalibrationError::NonMonotonic { index });
            }
        }
        Ok(())
    }

    /// Number of anchors in the table
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the table holds no anchors (never, for a validated table)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Anchors in ascending temperature order
    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Compensation factor at `temperature_c`.
    ///
    /// Interpolates linearly inside the covered span and extends the
    /// boundary segment's line beyond it. Total over finite queries; a NaN
    /// query propagates NaN through the last segment's line.
    pub fn factor_at(&self, temperature_c: f32) -> f32 {
        let last = self.points.len() - 1;
        let segment = if temperature_c < self.points[0].temperature_c {
            0
        } else {
            self.bracket_index(temperature_c).unwrap_or(last - 1)
        };
        interpolate_segment(self.points[segment], self.points[segment + 1], temperature_c)
    }

    /// Compensation factor at `temperature_c`, refusing to extrapolate.
    ///
    /// Returns `None` for queries strictly below the first or strictly
    /// above the last anchor temperature, and for NaN. A query exactly on
    /// the upper boundary returns the last anchor's stored factor.
    pub fn factor_in_range(&self, temperature_c: f32) -> Option<f32> {
        let first = self.points[0].temperature_c;
        let last = self.points[self.points.len() - 1];
        let within = temperature_c >= first && temperature_c <= last.temperature_c;
        if !within {
            return None;
        }
        match self.bracket_index(temperature_c) {
            Some(segment) => Some(interpolate_segment(
                self.points[segment],
                self.points[segment + 1],
                temperature_c,
            )),
            // Only the exact upper boundary reaches here
            None => Some(last.factor),
        }
    }

    /// First segment whose half-open range `T[i] <= t < T[i+1]` contains
    /// the query, or `None` when no segment does.
    fn bracket_index(&self, temperature_c: f32) -> Option<usize> {
        self.points.windows(2).position(|pair| {
            pair[0].temperature_c <= temperature_c && temperature_c < pair[1].temperature_c
        })
    }

    /// Left anchor of the segment the adjustment path rewrites.
    ///
    /// Advances only while the query is strictly above the *next*
    /// temperature, so an interior breakpoint resolves to the segment
    /// ending at it and queries past the table resolve to the last anchor.
    pub(crate) fn anchor_index(&self, temperature_c: f32) -> usize {
        let mut index = 0;
        while index < self.points.len() - 1
            && temperature_c > self.points[index + 1].temperature_c
        {
            index += 1;
        }
        index
    }

    /// Overwrite the factor at `index`, then re-line any points lying
    /// strictly inside the two adjacent segments along the updated slopes.
    pub(crate) fn rewrite_anchor(&mut self, index: usize, factor: f32) {
        self.points[index].factor = factor;
        self.ripple_forward(index);
        self.ripple_backward(index);
    }

    /// Re-line points after `index` that fall strictly inside the segment
    /// starting there. Strictly increasing temperatures leave nothing to
    /// match, keeping the rewrite contained.
    fn ripple_forward(&mut self, index: usize) {
        if index + 1 >= self.points.len() {
            return;
        }
        let left = self.points[index];
        let right = self.points[index + 1];
        for i in (index + 1)..self.points.len() {
            let temperature_c = self.points[i].temperature_c;
            if temperature_c < right.temperature_c {
                self.points[i].factor = interpolate_segment(left, right, temperature_c);
            }
        }
    }

    /// Re-line points before `index` that fall strictly inside the segment
    /// ending there.
    fn ripple_backward(&mut self, index: usize) {
        if index == 0 {
            return;
        }
        let left = self.points[index - 1];
        let right = self.points[index];
        for i in 0..index {
            let temperature_c = self.points[i].temperature_c;
            if temperature_c > left.temperature_c {
                self.points[i].factor = interpolate_segment(left, right, temperature_c);
            }
        }
    }
}

/// Value of the straight line through `left` and `right` at `temperature_c`.
///
/// Validated tables guarantee distinct anchor temperatures, so the slope is
/// always finite.
fn interpolate_segment(left: Breakpoint, right: Breakpoint, temperature_c: f32) -> f32 {
    let slope = (right.factor - left.factor) / (right.temperature_c - left.temperature_c);
    left.factor + slope * (temperature_c - left.temperature_c)
}
