use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use heliorbit::crossing::{find_zero_crossings, find_zero_crossings_with, CrossingRule};

/// Hourly longitude of a body seen from a frame turning once every ~27 days.
fn hourly_longitude(ndays: usize) -> (Vec<f64>, Vec<f64>) {
    let rate = 2.0 * PI / (27.2753 * 24.0);
    let times: Vec<f64> = (0..24 * ndays).map(|h| h as f64 * 3600.0).collect();
    let values = (0..24 * ndays)
        .map(|h| {
            let phase = 1.0 - rate * h as f64;
            (phase + PI).rem_euclid(2.0 * PI) - PI
        })
        .collect();
    (times, values)
}

fn bench_find_zero_crossings(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_zero_crossings");
    for ndays in [30usize, 365, 3650] {
        let (times, values) = hourly_longitude(ndays);
        group.bench_with_input(BenchmarkId::new("strict", ndays), &ndays, |b, _| {
            b.iter(|| find_zero_crossings(black_box(&times), black_box(&values)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("inclusive", ndays), &ndays, |b, _| {
            b.iter(|| {
                find_zero_crossings_with(
                    black_box(&times),
                    black_box(&values),
                    CrossingRule::Inclusive,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_zero_crossings);
criterion_main!(benches);
