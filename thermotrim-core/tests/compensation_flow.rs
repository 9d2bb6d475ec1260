//! Integration tests for a complete calibration session
//!
//! Replays a recorded bench session against a factory preset curve:
//! - recovers raw sensor readings from the bench's displayed values
//! - folds every observation into the working curve in bench order
//! - sweeps the reference dataset across the preset temperature grid

use thermotrim_core::{
    reference, Adjustment, Breakpoint, CalibrationError, FactorTable, Observation,
    TemperatureCompensator,
};

/// Factory preset curve for the reference probe family
const PRESET: [Breakpoint; 6] = [
    Breakpoint::new(-10.0, 0.700),
    Breakpoint::new(10.0, 0.900),
    Breakpoint::new(20.0, 0.980),
    Breakpoint::new(30.0, 1.000),
    Breakpoint::new(40.0, 1.015),
    Breakpoint::new(50.0, 1.025),
];

/// Bench log: at each temperature, the value the compensated display showed
/// and the value the reference instrument reported
const BENCH_SAMPLES: [Observation; 6] = [
    Observation::new(-9.0, 430.0, 839.0),
    Observation::new(9.0, 630.0, 839.0),
    Observation::new(22.0, 720.0, 839.0),
    Observation::new(28.0, 800.0, 839.0),
    Observation::new(41.0, 900.0, 839.0),
    Observation::new(53.0, 1000.0, 839.0),
];

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

/// The bench logged values after the preset curve was applied. Divide the
/// pristine prediction back out to recover what the sensor itself read.
fn recovered_observations() -> Vec<Observation> {
    let pristine = TemperatureCompensator::<8>::with_defaults(&PRESET).unwrap();
    BENCH_SAMPLES
        .iter()
        .map(|sample| {
            let factor = pristine.factor_at(sample.temperature_c);
            Observation::new(sample.temperature_c, sample.measured / factor, sample.target)
        })
        .collect()
}

#[test]
fn full_session_applies_every_observation() {
    let mut compensator = TemperatureCompensator::<8>::with_defaults(&PRESET).unwrap();
    let observations = recovered_observations();

    let mut applied_indices = Vec::new();
    for observation in &observations {
        match compensator.adjust(*observation).unwrap() {
            Adjustment::Applied { index, .. } => applied_indices.push(index),
            Adjustment::Rejected {
                deviation,
                tolerance,
            } => panic!(
                "observation at {}°C rejected: deviation {deviation} vs tolerance {tolerance}",
                observation.temperature_c
            ),
        }
    }

    // -9°C and 9°C both land in the first segment and rewrite anchor 0;
    // 22°C and 28°C both rewrite anchor 2; 53°C saturates to the last
    assert_eq!(applied_indices, [0, 0, 2, 2, 4, 5]);

    let points = compensator.curve().points();
    let implied = |observation: &Observation| observation.target / observation.measured;
    assert_close(points[0].factor, implied(&observations[1]), 1e-6);
    assert_close(points[2].factor, implied(&observations[3]), 1e-6);
    assert_close(points[4].factor, implied(&observations[4]), 1e-6);
    assert_close(points[5].factor, implied(&observations[5]), 1e-6);

    // Anchors no observation resolved to keep their preset factors
    assert_close(points[1].factor, 0.900, 1e-6);
    assert_close(points[3].factor, 1.000, 1e-6);
}

#[test]
fn reference_sweep_reports_gaps_and_factors() {
    let compensator = TemperatureCompensator::<8>::with_defaults(&PRESET).unwrap();
    let observations = recovered_observations();
    let implied = |observation: &Observation| observation.target / observation.measured;

    // The dataset starts at -9°C, so the preset grid's -10°C query has no
    // reference answer
    assert_eq!(
        compensator
            .reference_factor_at(&observations, -10.0)
            .unwrap(),
        None
    );
    assert_eq!(
        compensator.reference_factor_at(&observations, 54.0).unwrap(),
        None
    );

    // Exact dataset boundaries answer with the observation's own factor
    let lower = compensator
        .reference_factor_at(&observations, -9.0)
        .unwrap()
        .unwrap();
    assert_close(lower, implied(&observations[0]), 1e-6);

    let upper = compensator
        .reference_factor_at(&observations, 53.0)
        .unwrap()
        .unwrap();
    assert_close(upper, implied(&observations[5]), 1e-6);

    // Interior queries interpolate between neighboring observations; the
    // recovered factors decrease with temperature, so the result is
    // bracketed by its neighbors
    let mid = compensator
        .reference_factor_at(&observations, 10.0)
        .unwrap()
        .unwrap();
    assert!(mid < implied(&observations[1]));
    assert!(mid > implied(&observations[2]));
}

#[test]
fn derived_reference_curve_sorts_and_matches_observations() {
    let mut observations = recovered_observations();
    observations.reverse();

    let table: FactorTable<8> = reference::derive_table(&observations).unwrap();
    let temps: Vec<f32> = table
        .points()
        .iter()
        .map(|point| point.temperature_c)
        .collect();
    assert_eq!(temps, [-9.0, 9.0, 22.0, 28.0, 41.0, 53.0]);

    for (point, observation) in table.points().iter().zip(recovered_observations().iter()) {
        assert_close(point.factor, observation.target / observation.measured, 1e-6);
    }
}

#[test]
fn outliers_and_dead_probes_leave_the_session_curve_unchanged() {
    let mut compensator = TemperatureCompensator::<8>::with_defaults(&PRESET).unwrap();
    let before = compensator.curve().clone();

    // Factor 8.39 against a prediction near 0.94: far beyond tolerance
    let outcome = compensator
        .adjust(Observation::new(15.0, 100.0, 839.0))
        .unwrap();
    assert!(matches!(outcome, Adjustment::Rejected { .. }));
    assert_eq!(compensator.curve(), &before);

    // A dead probe reads zero; the session errors but the curve survives
    let error = compensator
        .adjust(Observation::new(15.0, 0.0, 839.0))
        .unwrap_err();
    assert!(matches!(error, CalibrationError::ZeroMeasurement { .. }));
    assert_eq!(compensator.curve(), &before);
}
