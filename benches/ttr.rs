use anticoag::inr::interpolate;
use anticoag::prelude::*;
use anticoag::ttr::TtrOptions;
use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// A history of `n` checks two weeks apart, oscillating around the range
fn build_history(n: usize) -> InrHistory {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let pattern = [dec!(1.8), dec!(2.4), dec!(2.9), dec!(3.3), dec!(2.6), dec!(2.1)];

    let observations = (0..n)
        .map(|i| {
            let date = start + Days::new(14 * i as u64);
            InrObservation::new(date, pattern[i % pattern.len()], dec!(35))
        })
        .collect();
    InrHistory::new(observations).unwrap()
}

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    for size in [10, 100, 500] {
        let history = build_history(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let daily = interpolate(black_box(&history));
                black_box(daily);
            });
        });
    }

    group.finish();
}

fn bench_ttr(c: &mut Criterion) {
    let history = build_history(52);
    let range = TherapeuticRange::standard();
    let opts = TtrOptions::default();

    c.bench_function("ttr_two_years", |b| {
        b.iter(|| {
            let result = black_box(&history).ttr(black_box(&range), black_box(&opts));
            black_box(result);
        });
    });
}

fn bench_ttr_trend(c: &mut Criterion) {
    let history = build_history(52);
    let range = TherapeuticRange::standard();
    let opts = TtrOptions::default();

    c.bench_function("ttr_trend_two_years", |b| {
        b.iter(|| {
            let trend = black_box(&history).ttr_trend(black_box(&range), black_box(&opts));
            black_box(trend);
        });
    });
}

criterion_group!(benches, bench_interpolate, bench_ttr, bench_ttr_trend);
criterion_main!(benches);
