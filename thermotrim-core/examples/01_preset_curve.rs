//! Preset Curve Example
//!
//! This example demonstrates the simplest use case of ThermoTrim:
//! predicting compensation factors from a factory preset curve and
//! correcting raw readings with them.
//!
//! ## What You'll Learn
//!
//! - Building a compensator from preset breakpoints
//! - How lookups behave inside, on, and beyond the curve's span
//! - The difference between the total and the bounded lookup
//! - Correcting raw readings with `calibrate`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_preset_curve
//! ```

use thermotrim_core::{Breakpoint, FactorTable, TemperatureCompensator};

fn main() {
    println!("ThermoTrim Preset Curve Example");
    println!("===============================\n");

    // Factory preset measured once for the probe family
    let preset = [
        Breakpoint::new(-10.0, 0.700),
        Breakpoint::new(10.0, 0.900),
        Breakpoint::new(20.0, 0.980),
        Breakpoint::new(30.0, 1.000),
        Breakpoint::new(40.0, 1.015),
        Breakpoint::new(50.0, 1.025),
    ];

    let compensator =
        TemperatureCompensator::<8>::with_defaults(&preset).expect("preset curve is well-formed");

    println!("Preset curve ({} anchors):", compensator.curve().len());
    for point in compensator.curve().points() {
        println!(
            "  {:>6.1}°C -> factor {:.3}",
            point.temperature_c, point.factor
        );
    }
    println!("  Adjustment tolerance: {:.1}\n", compensator.tolerance());

    // Inside the span factors interpolate; beyond it the boundary
    // segment's line continues
    println!("Predicted factors:");
    let queries = [
        (-20.0, "beyond the cold end (extrapolated)"),
        (-10.0, "first anchor"),
        (0.0, "midway between -10°C and 10°C"),
        (25.0, "midway between 20°C and 30°C"),
        (50.0, "last anchor"),
        (60.0, "beyond the hot end (extrapolated)"),
    ];
    for (temperature_c, description) in &queries {
        println!(
            "  {:>6.1}°C -> {:.4}  ({description})",
            temperature_c,
            compensator.factor_at(*temperature_c)
        );
    }

    // Correct a few raw readings
    println!("\nCorrecting raw readings:");
    for (raw, temperature_c) in [(500.0, 0.0), (750.0, 25.0), (900.0, 45.0)] {
        println!(
            "  raw {:>6.1} at {:>5.1}°C -> {:.1}",
            raw,
            temperature_c,
            compensator.calibrate(raw, temperature_c)
        );
    }

    // The bounded lookup refuses to answer outside the span
    println!("\nBounded lookup on the same anchors:");
    let table = FactorTable::<8>::from_points(&preset).expect("preset curve is well-formed");
    for temperature_c in [-20.0, 0.0, 60.0] {
        match table.factor_in_range(temperature_c) {
            Some(factor) => println!("  {:>6.1}°C -> {:.4}", temperature_c, factor),
            None => println!("  {:>6.1}°C -> outside the covered span", temperature_c),
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Key Insights:");
    println!("- The working curve always answers, even off the ends");
    println!("- Between anchors the factor follows the connecting line");
    println!("- The bounded lookup reports gaps instead of guessing");
}
