//! Online Adjustment Example
//!
//! Replays a calibration bench session: a probe ships with a preset curve,
//! the bench compares its display against a reference instrument at six
//! temperatures, and each comparison refines the working curve.
//!
//! ## What You'll Learn
//!
//! - Recovering raw sensor readings from displayed values
//! - Folding observations into the curve with `adjust`
//! - How the tolerance gate discards outliers
//! - Sweeping a reference dataset with the bounded lookup
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_online_adjustment
//! ```

use thermotrim_core::{Adjustment, Breakpoint, Observation, TemperatureCompensator};

/// Factory preset for the probe family
const PRESET: [Breakpoint; 6] = [
    Breakpoint::new(-10.0, 0.700),
    Breakpoint::new(10.0, 0.900),
    Breakpoint::new(20.0, 0.980),
    Breakpoint::new(30.0, 1.000),
    Breakpoint::new(40.0, 1.015),
    Breakpoint::new(50.0, 1.025),
];

/// Bench log: displayed value vs reference instrument value
const BENCH_SAMPLES: [Observation; 6] = [
    Observation::new(-9.0, 430.0, 839.0),
    Observation::new(9.0, 630.0, 839.0),
    Observation::new(22.0, 720.0, 839.0),
    Observation::new(28.0, 800.0, 839.0),
    Observation::new(41.0, 900.0, 839.0),
    Observation::new(53.0, 1000.0, 839.0),
];

fn main() {
    println!("ThermoTrim Online Adjustment Example");
    println!("====================================\n");

    let mut compensator =
        TemperatureCompensator::<8>::with_defaults(&PRESET).expect("preset curve is well-formed");

    // The bench logged displayed values, which already include the preset
    // compensation. Divide it back out to get the sensor's own readings.
    let observations: Vec<Observation> = BENCH_SAMPLES
        .iter()
        .map(|sample| {
            let factor = compensator.factor_at(sample.temperature_c);
            Observation::new(sample.temperature_c, sample.measured / factor, sample.target)
        })
        .collect();

    println!("Adjusting from {} observations:\n", observations.len());
    for observation in &observations {
        print!(
            "  {:>5.1}°C  measured {:>7.2}, target {:>6.1} ... ",
            observation.temperature_c, observation.measured, observation.target
        );
        match compensator.adjust(*observation) {
            Ok(Adjustment::Applied { index, factor }) => {
                println!("applied: factor[{index}] = {factor:.4}")
            }
            Ok(Adjustment::Rejected {
                deviation,
                tolerance,
            }) => {
                println!("rejected: deviation {deviation:.4} > tolerance {tolerance:.1}")
            }
            Err(error) => println!("failed: {error}"),
        }
    }

    println!("\nWorking curve after the session:");
    for point in compensator.curve().points() {
        println!(
            "  {:>6.1}°C -> factor {:.4}",
            point.temperature_c, point.factor
        );
    }

    // An outlier: the probe briefly lost contact and read far too low
    println!("\nOutlier handling:");
    let outlier = Observation::new(15.0, 100.0, 839.0);
    match compensator.adjust(outlier) {
        Ok(Adjustment::Rejected {
            deviation,
            tolerance,
        }) => println!(
            "  observation at {:.1}°C discarded (deviation {:.2}, tolerance {:.1})",
            outlier.temperature_c, deviation, tolerance
        ),
        other => println!("  unexpected outcome: {other:?}"),
    }

    // Sweep the reference dataset across the preset temperature grid
    println!("\nReference sweep over the bench dataset:");
    for temperature_c in [-10.0, 10.0, 20.0, 30.0, 40.0, 50.0] {
        match compensator.reference_factor_at(&observations, temperature_c) {
            Ok(Some(factor)) => println!("  {:>6.1}°C -> {:.4}", temperature_c, factor),
            Ok(None) => println!("  {:>6.1}°C -> outside the observed span", temperature_c),
            Err(error) => println!("  {:>6.1}°C -> error: {error}", temperature_c),
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Key Insights:");
    println!("- Each accepted observation rewrites one anchor of the curve");
    println!("- Deviant observations are discarded, not averaged in");
    println!("- Reference sweeps answer only within the dataset's span");
}
