//! Reference Datasets and Curve Derivation
//!
//! A calibration bench produces raw observations: at some temperature the
//! sensor reported one value while the instrument under reference
//! conditions reported another. Each observation implies a multiplicative
//! factor (target / measured), and a sorted sequence of them implies a
//! complete compensation curve.
//!
//! Datasets are plain slices owned by the caller. Nothing here caches or
//! shares state, so a bench can derive curves from as many datasets as it
//! likes, concurrently, without coordination.
//!
//! Derived curves pass through the same validation as preset curves: a
//! dataset with duplicate temperatures, a zero measurement, or fewer than
//! two points is rejected rather than papered over.

use heapless::Vec;

use crate::{
    errors::{CalibrationError, CalibrationResult},
    table::{Breakpoint, FactorTable},
};

/// One raw calibration observation.
///
/// Records what the sensor measured at a temperature and what the reading
/// should have been according to the reference instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observation {
    /// Temperature in Celsius at which the reading was taken
    pub temperature_c: f32,
    /// Raw value the sensor reported
    pub measured: f32,
    /// Value the reading should calibrate to
    pub target: f32,
}

impl Observation {
    /// Create an observation from a temperature, a raw reading, and the
    /// value it should have been
    pub const fn new(temperature_c: f32, measured: f32, target: f32) -> Self {
        Self {
            temperature_c,
            measured,
            target,
        }
    }

    /// Compensation factor this observation implies (target / measured).
    ///
    /// Fails with [`CalibrationError::ZeroMeasurement`] when the sensor
    /// reported zero and with [`CalibrationError::InvalidValue`] when any
    /// field is non-finite.
    pub fn implied_factor(&self) -> CalibrationResult<f32> {
        if !self.temperature_c.is_finite() || !self.measured.is_finite() || !self.target.is_finite()
        {
            return Err(CalibrationError::InvalidValue);
        }
        if self.measured == 0.0 {
            return Err(CalibrationError::ZeroMeasurement {
                temperature_c: self.temperature_c,
            });
        }
        Ok(self.target / self.measured)
    }
}

/// Derive a factor table from raw observations.
///
/// Observations may arrive in any order; entries are sorted ascending by
/// temperature before validation, so the usual table invariants apply to
/// the sorted sequence. Duplicate temperatures surface as
/// [`CalibrationError::NonMonotonic`].
pub fn derive_table<const N: usize>(
    observations: &[Observation],
) -> CalibrationResult<FactorTable<N>> {
    let mut entries: Vec<Breakpoint, N> = Vec::new();
    for observation in observations {
        let factor = observation.implied_factor()?;
        entries
            .push(Breakpoint::new(observation.temperature_c, factor))
            .map_err(|_| CalibrationError::CapacityExceeded {
                capacity: N,
                supplied: observations.len(),
            })?;
    }
    sort_by_temperature(&mut entries);
    FactorTable::from_points(&entries)
}

/// Insertion sort by temperature.
///
/// Datasets are small and the sort must work without allocation, which
/// rules out the std merge sort. Stable, so equal temperatures keep their
/// input order for the duplicate check to flag deterministically.
fn sort_by_temperature(entries: &mut [Breakpoint]) {
    for i in 1..entries.len() {
        let key = entries[i];
        let mut j = i;
        while j > 0 && entries[j - 1].temperature_c > key.temperature_c {
            entries[j] = entries[j - 1];
            j -= 1;
        }
        entries[j] = key;
    }
}
