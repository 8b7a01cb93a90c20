use anticoag::distribution::{distribute, QUARTER_TABLET_STEP};
use anticoag::doac::DoacCalculator;
use anticoag::prelude::*;
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_warfarin_suggestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("warfarin_suggestion");

    for guideline in [Guideline::Fcsa, Guideline::Accp] {
        let calculator = WarfarinDosageCalculator::new(guideline);
        let inputs: Vec<DosageInput> = [dec!(1.3), dec!(1.8), dec!(2.5), dec!(3.6), dec!(7.2)]
            .into_iter()
            .map(|inr| DosageInput::new(inr, dec!(35)))
            .collect();

        group.bench_function(guideline.to_string(), |b| {
            b.iter(|| {
                for input in &inputs {
                    let suggestion = calculator.calculate(black_box(input));
                    black_box(suggestion).ok();
                }
            });
        });
    }

    group.finish();
}

fn bench_distribute(c: &mut Criterion) {
    let totals: Vec<Decimal> = (0..=80u32)
        .map(|q| QUARTER_TABLET_STEP * Decimal::from(q))
        .collect();

    c.bench_function("distribute_0_to_100mg", |b| {
        b.iter(|| {
            for total in &totals {
                let days = distribute(black_box(*total), QUARTER_TABLET_STEP);
                black_box(days).ok();
            }
        });
    });
}

fn bench_doac_enrich(c: &mut Criterion) {
    let calculator = DoacCalculator::default();
    let patient = Patient {
        hypertension: true,
        ..Patient::new(78, Gender::Female)
            .with_weight(dec!(58))
            .with_creatinine(dec!(1.4))
    };
    let record = DoacMonitoringRecord::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        DoacDrug::Apixaban,
        Indication::NonValvularAtrialFibrillation,
    );

    c.bench_function("doac_enrich", |b| {
        b.iter(|| {
            let enriched = calculator.enrich(black_box(&record), black_box(&patient));
            black_box(enriched);
        });
    });
}

criterion_group!(
    benches,
    bench_warfarin_suggestion,
    bench_distribute,
    bench_doac_enrich
);
criterion_main!(benches);
