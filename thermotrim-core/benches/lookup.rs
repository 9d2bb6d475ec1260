//! Microbenchmarks for curve lookups and adjustment
//!
//! Covers the hot paths: bracket search plus interpolation for interior
//! queries, boundary extrapolation for queries off either end, and the
//! full adjust cycle including the ripple sweeps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use thermotrim_core::{reference, Breakpoint, FactorTable, Observation, TemperatureCompensator};

fn dense_points() -> Vec<Breakpoint> {
    (0..32)
        .map(|i| Breakpoint::new(-40.0 + 4.0 * i as f32, 0.7 + 0.01 * i as f32))
        .collect()
}

fn bench_lookups(c: &mut Criterion) {
    let table = FactorTable::<32>::from_points(&dense_points()).unwrap();

    c.bench_function("factor_at/interior", |b| {
        b.iter(|| table.factor_at(black_box(17.3)))
    });
    c.bench_function("factor_at/extrapolated", |b| {
        b.iter(|| table.factor_at(black_box(150.0)))
    });
    c.bench_function("factor_in_range/interior", |b| {
        b.iter(|| table.factor_in_range(black_box(17.3)))
    });
}

fn bench_adjustment(c: &mut Criterion) {
    c.bench_function("adjust/applied", |b| {
        let mut compensator = TemperatureCompensator::<32>::with_defaults(&dense_points()).unwrap();
        b.iter(|| compensator.adjust(black_box(Observation::new(17.3, 500.0, 512.0))))
    });
}

fn bench_derivation(c: &mut Criterion) {
    let observations: Vec<Observation> = (0..32)
        .map(|i| Observation::new(-40.0 + 4.0 * i as f32, 500.0, 420.0 + i as f32))
        .collect();

    c.bench_function("derive_table/32", |b| {
        b.iter(|| reference::derive_table::<32>(black_box(&observations)))
    });
}

criterion_group!(benches, bench_lookups, bench_adjustment, bench_derivation);
criterion_main!(benches);
