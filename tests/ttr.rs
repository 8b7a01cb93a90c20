//! TTR Integration Tests
//!
//! Interpolation and TTR through the public API.

use anticoag::inr::{interpolate, statistics};
use anticoag::prelude::*;
use anticoag::ttr::{calculate_ttr, evaluate_quality, TtrOptions, TtrQuality};
use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

#[test]
fn test_linear_interpolation_end_to_end() {
    let history = InrHistory::builder()
        .observation(day(1, 1), dec!(2.0), dec!(35))
        .observation(day(1, 11), dec!(3.0), dec!(35))
        .build()
        .unwrap();

    let daily = interpolate(&history);
    let jan6 = daily[&day(1, 6)].to_f64().unwrap();
    assert_abs_diff_eq!(jan6, 2.5, epsilon = 0.1);
}

#[test]
fn test_interpolation_covers_inclusive_span() {
    let histories = [
        vec![(day(1, 1), dec!(2.0)), (day(1, 2), dec!(2.4))],
        vec![
            (day(1, 1), dec!(1.8)),
            (day(1, 20), dec!(2.6)),
            (day(2, 14), dec!(3.4)),
            (day(3, 30), dec!(2.2)),
        ],
        vec![
            (day(2, 27), dec!(2.5)),
            (day(3, 2), dec!(4.1)),
            (day(12, 31), dec!(1.3)),
        ],
    ];

    for points in histories {
        let observations = points
            .iter()
            .map(|(date, inr)| InrObservation::new(*date, *inr, dec!(35)))
            .collect();
        let history = InrHistory::new(observations).unwrap();
        let daily = interpolate(&history);

        let (first, last) = (points[0].0, points[points.len() - 1].0);
        let span = (last - first).num_days() as usize + 1;
        assert_eq!(daily.len(), span);

        for (date, inr) in &points {
            assert_eq!(daily[date], *inr, "{}", date);
        }
    }
}

#[test]
fn test_ttr_via_extension_trait() {
    // 1.5 → 2.5 then flat: days below until the 6th
    let history = InrHistory::builder()
        .observation(day(1, 1), dec!(1.5), dec!(35))
        .observation(day(1, 11), dec!(2.5), dec!(37.5))
        .observation(day(1, 31), dec!(2.5), dec!(37.5))
        .build()
        .unwrap();
    let range = TherapeuticRange::standard();

    let whole = history.ttr(&range, &TtrOptions::default());
    assert_eq!(whole, calculate_ttr(&history, &range));
    assert_eq!(whole.total_days, 31);
    assert_eq!(whole.days_below_range, 5);
    assert_eq!(whole.days_in_range, 26);
    assert_eq!(whole.quality, TtrQuality::Excellent);
    assert_abs_diff_eq!(whole.percentage.to_f64().unwrap(), 83.87, epsilon = 0.01);

    let windowed = history.ttr(
        &range,
        &TtrOptions::default().with_window(day(1, 11), day(1, 31)),
    );
    assert_eq!(windowed.total_days, 21);
    assert_eq!(windowed.percentage, dec!(100));
    assert_eq!(windowed.control_count, 2);
}

#[test]
fn test_quality_follows_percentage() {
    for pct in [dec!(0), dec!(49.99), dec!(55), dec!(62.5), dec!(67), dec!(70), dec!(100)] {
        let quality = evaluate_quality(pct);
        match quality {
            TtrQuality::Excellent => assert!(pct >= dec!(70)),
            TtrQuality::Good => assert!(pct >= dec!(65) && pct < dec!(70)),
            TtrQuality::Acceptable => assert!(pct >= dec!(60) && pct < dec!(65)),
            TtrQuality::Suboptimal => assert!(pct >= dec!(50) && pct < dec!(60)),
            TtrQuality::Poor => assert!(pct < dec!(50)),
        }
    }
}

#[test]
fn test_statistics_of_raw_readings() {
    let history = InrHistory::builder()
        .observation(day(1, 1), dec!(1.8), dec!(35))
        .observation(day(1, 15), dec!(2.4), dec!(35))
        .observation(day(2, 1), dec!(3.6), dec!(35))
        .build()
        .unwrap();

    let stats = statistics(&history, Some(&TherapeuticRange::standard()));
    assert_eq!(stats.count, 3);
    assert_eq!(stats.mean, dec!(2.6));
    assert_eq!(stats.median, dec!(2.4));
    assert_abs_diff_eq!(stats.pct_in_range.to_f64().unwrap(), 33.33, epsilon = 0.01);
    assert_eq!(history.inr_statistics(&TherapeuticRange::standard()), stats);
}
