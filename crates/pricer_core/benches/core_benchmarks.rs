//! Criterion benchmarks for pricer_core market data lookups.
//!
//! Measures discount factor lookup on interpolated curves and smile
//! volatility with its node adjoint.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{
    CurveEnum, SmileDeltaParameters, SmileDeltaTermStructure, YieldCurve,
};

fn bench_discount_factor(c: &mut Criterion) {
    let mut group = c.benchmark_group("discount_factor");

    for size in [10, 100, 1000] {
        let times: Vec<f64> = (1..=size).map(|i| i as f64 * 30.0 / size as f64).collect();
        let rates: Vec<f64> = times.iter().map(|t| 0.01 + 0.001 * t).collect();
        let curve = CurveEnum::interpolated(times, rates).unwrap();
        group.bench_with_input(BenchmarkId::new("interpolated", size), &curve, |b, curve| {
            b.iter(|| curve.discount_factor(black_box(7.3)).unwrap());
        });
    }

    group.finish();
}

fn bench_smile(c: &mut Criterion) {
    let smiles = [0.25, 0.5, 1.0, 2.0, 5.0]
        .iter()
        .map(|&t| {
            SmileDeltaParameters::from_quotes(
                t,
                0.18,
                vec![0.10, 0.25],
                &[-0.015, -0.007],
                &[0.032, 0.012],
            )
            .unwrap()
        })
        .collect();
    let surface = SmileDeltaTermStructure::new(smiles).unwrap();

    let mut group = c.benchmark_group("smile");
    group.bench_function("volatility", |b| {
        b.iter(|| surface.volatility(black_box(0.8), black_box(1.42), 1.40).unwrap());
    });
    group.bench_function("volatility_adjoint", |b| {
        b.iter(|| {
            surface
                .volatility_adjoint(black_box(0.8), black_box(1.42), 1.40)
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_discount_factor, bench_smile);
criterion_main!(benches);
