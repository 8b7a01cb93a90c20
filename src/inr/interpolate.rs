//! Rosendaal daily interpolation
//!
//! Between two consecutive checks the INR is assumed to move linearly. Every
//! calendar day from the first to the last observation receives one value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::data::InrHistory;

/// Decimal places kept for interpolated values
pub const INTERPOLATION_DP: u32 = 4;

/// Linear value at `elapsed` days into a segment of `total` days
#[inline]
fn lerp(v1: Decimal, v2: Decimal, elapsed: i64, total: i64) -> Decimal {
    v1 + (v2 - v1) * (Decimal::from(elapsed) / Decimal::from(total))
}

/// Interpolate one INR value per calendar day
///
/// For each adjacent pair `(d1, v1), (d2, v2)` the days `d1..d2` (end exclusive)
/// receive `v1 + (v2 - v1) * elapsed / total`; the final observation's own date
/// receives its own value. The output therefore spans the inclusive range from
/// the first to the last observation date.
///
/// With fewer than two observations the map is empty. Two observations on the
/// same date form a zero-length segment that emits nothing, so the later of the
/// two is the value kept for that date.
pub fn interpolate(history: &InrHistory) -> BTreeMap<NaiveDate, Decimal> {
    let observations = history.observations();
    let mut daily = BTreeMap::new();

    if observations.len() < 2 {
        return daily;
    }

    for pair in observations.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        let total = (second.date() - first.date()).num_days();
        if total <= 0 {
            continue;
        }

        for elapsed in 0..total {
            let Some(date) = first
                .date()
                .checked_add_days(chrono::Days::new(elapsed as u64))
            else {
                break;
            };
            let value = lerp(first.inr(), second.inr(), elapsed, total).round_dp(INTERPOLATION_DP);
            daily.insert(date, value);
        }
    }

    if let Some(last) = observations.last() {
        daily.insert(last.date(), last.inr());
    }

    tracing::trace!(days = daily.len(), "interpolated INR history");
    daily
}
