//! Tests for the TTR module
//!
//! All histories are built through `InrHistory::builder()`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::data::{InrHistory, TherapeuticRange};
use crate::ttr::*;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn rising_history() -> InrHistory {
    // 1.5 → 2.5 over ten days: 0.1 per day
    InrHistory::builder()
        .observation(date(1, 1), dec!(1.5), dec!(35))
        .observation(date(1, 11), dec!(2.5), dec!(35))
        .build()
        .unwrap()
}

// ============================================================================
// Quality bands
// ============================================================================

#[test]
fn test_quality_boundaries() {
    let cases = [
        (dec!(100), TtrQuality::Excellent),
        (dec!(70.0), TtrQuality::Excellent),
        (dec!(69.9), TtrQuality::Good),
        (dec!(65.0), TtrQuality::Good),
        (dec!(64.9), TtrQuality::Acceptable),
        (dec!(60.0), TtrQuality::Acceptable),
        (dec!(59.9), TtrQuality::Suboptimal),
        (dec!(50.0), TtrQuality::Suboptimal),
        (dec!(49.9), TtrQuality::Poor),
        (dec!(0), TtrQuality::Poor),
    ];
    for (pct, expected) in cases {
        assert_eq!(evaluate_quality(pct), expected, "TTR {}", pct);
    }
}

// ============================================================================
// Whole-history TTR
// ============================================================================

#[test]
fn test_all_at_midpoint_is_excellent() {
    let history = InrHistory::builder()
        .observation(date(1, 1), dec!(2.5), dec!(35))
        .observation(date(1, 15), dec!(2.5), dec!(35))
        .observation(date(2, 12), dec!(2.5), dec!(35))
        .build()
        .unwrap();
    let result = calculate_ttr(&history, &TherapeuticRange::standard());

    assert_eq!(result.percentage, dec!(100));
    assert_eq!(result.quality, TtrQuality::Excellent);
    assert_eq!(result.total_days, 43);
    assert_eq!(result.control_count, 3);
    assert_eq!(result.period_start, Some(date(1, 1)));
    assert_eq!(result.period_end, Some(date(2, 12)));
}

#[test]
fn test_all_below_is_poor() {
    let history = InrHistory::builder()
        .observation(date(1, 1), dec!(1.2), dec!(35))
        .observation(date(1, 21), dec!(1.8), dec!(35))
        .build()
        .unwrap();
    let result = calculate_ttr(&history, &TherapeuticRange::standard());

    assert_eq!(result.percentage, Decimal::ZERO);
    assert_eq!(result.quality, TtrQuality::Poor);
    assert_eq!(result.days_below_range, 21);
    assert_eq!(result.days_in_range, 0);
}

#[test]
fn test_partial_time_in_range() {
    let result = calculate_ttr(&rising_history(), &TherapeuticRange::standard());

    // Jan 6 (2.0) through Jan 11 (2.5) are in range
    assert_eq!(result.total_days, 11);
    assert_eq!(result.days_in_range, 6);
    assert_eq!(result.days_below_range, 5);
    assert_eq!(result.days_above_range, 0);
    assert_eq!(result.percentage, dec!(54.55));
    assert_eq!(result.quality, TtrQuality::Suboptimal);
    assert_eq!(result.pct_below(), dec!(45.45));
}

#[test]
fn test_above_range_days_counted() {
    let history = InrHistory::builder()
        .observation(date(1, 1), dec!(2.5), dec!(35))
        .observation(date(1, 11), dec!(3.5), dec!(35))
        .build()
        .unwrap();
    let result = calculate_ttr(&history, &TherapeuticRange::standard());
    // 2.5 .. 3.0 inclusive = Jan 1..6
    assert_eq!(result.days_in_range, 6);
    assert_eq!(result.days_above_range, 5);
}

#[test]
fn test_insufficient_observations() {
    let single = InrHistory::builder()
        .observation(date(1, 1), dec!(2.5), dec!(35))
        .build()
        .unwrap();
    let result = calculate_ttr(&single, &TherapeuticRange::standard());
    assert_eq!(result.total_days, 0);
    assert_eq!(result.percentage, Decimal::ZERO);
    assert_eq!(result.control_count, 1);

    let empty = calculate_ttr(&InrHistory::empty(), &TherapeuticRange::standard());
    assert_eq!(empty.total_days, 0);
    assert!(!empty.has_data());
}

// ============================================================================
// Windowed TTR
// ============================================================================

#[test]
fn test_window_restricts_days() {
    let result = calculate_ttr_in_window(
        &rising_history(),
        &TherapeuticRange::standard(),
        date(1, 6),
        date(1, 31),
    );
    // Days after Jan 11 are outside the observation span and not assumed
    assert_eq!(result.total_days, 6);
    assert_eq!(result.percentage, dec!(100));
    assert_eq!(result.control_count, 1);
    assert_eq!(result.period_start, Some(date(1, 6)));
    assert_eq!(result.period_end, Some(date(1, 11)));
}

#[test]
fn test_window_outside_span_is_empty() {
    let result = calculate_ttr_in_window(
        &rising_history(),
        &TherapeuticRange::standard(),
        date(3, 1),
        date(3, 31),
    );
    assert_eq!(result.total_days, 0);
    assert_eq!(result.control_count, 0);
}

#[test]
fn test_inverted_window_is_empty() {
    let result = calculate_ttr_in_window(
        &rising_history(),
        &TherapeuticRange::standard(),
        date(1, 11),
        date(1, 1),
    );
    assert_eq!(result.total_days, 0);
    assert_eq!(result.quality, TtrQuality::Poor);
}

#[test]
fn test_options_window_through_trait() {
    let options = TtrOptions::default().with_window(date(1, 1), date(1, 5));
    let result = rising_history().ttr(&TherapeuticRange::standard(), &options);
    assert_eq!(result.total_days, 5);
    assert_eq!(result.percentage, Decimal::ZERO);
}

// ============================================================================
// Trend
// ============================================================================

#[test]
fn test_trend_needs_two_points_in_window() {
    let history = InrHistory::builder()
        .observation(date(1, 1), dec!(2.5), dec!(35))
        .observation(date(2, 1), dec!(2.5), dec!(35))
        .observation(date(3, 1), dec!(1.5), dec!(35))
        .observation(date(6, 15), dec!(2.5), dec!(35))
        .build()
        .unwrap();
    let trend = calculate_ttr_trend(&history, &TherapeuticRange::standard(), 3);

    assert_eq!(trend.len(), 2);
    assert!(!trend.contains_key(&date(1, 1)));
    assert_eq!(trend[&date(2, 1)], dec!(100));
    assert!(trend[&date(3, 1)] < dec!(100));
    // Mar 15 .. Jun 15 contains only the last check
    assert!(!trend.contains_key(&date(6, 15)));
}

#[test]
fn test_trend_window_is_configurable() {
    let history = InrHistory::builder()
        .observation(date(1, 1), dec!(2.5), dec!(35))
        .observation(date(6, 15), dec!(2.5), dec!(35))
        .build()
        .unwrap();
    let short = history.ttr_trend(&TherapeuticRange::standard(), &TtrOptions::default());
    assert!(short.is_empty());

    let long = history.ttr_trend(&TherapeuticRange::standard(), &TtrOptions::semiannual());
    assert_eq!(long.len(), 1);
    assert_eq!(long[&date(6, 15)], dec!(100));
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_display_mentions_quality() {
    let result = calculate_ttr(&rising_history(), &TherapeuticRange::standard());
    let text = format!("{}", result);
    assert!(text.contains("Suboptimal"));
    assert!(text.contains("54.55"));
}
