//! Rosendaal TTR calculation
//!
//! Stateless functions over a validated [`InrHistory`].

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::types::{share, TtrQuality, TtrResult};
use crate::data::{InrHistory, RangePosition, TherapeuticRange};
use crate::inr::interpolate;

/// Band a TTR percentage
///
/// Excellent ≥ 70, Good ≥ 65, Acceptable ≥ 60, Suboptimal ≥ 50, Poor below.
pub fn evaluate_quality(percentage: Decimal) -> TtrQuality {
    TtrQuality::BANDS
        .iter()
        .find(|(lower, _)| percentage >= *lower)
        .map(|(_, quality)| *quality)
        .unwrap_or(TtrQuality::Poor)
}

/// TTR over the whole history
///
/// With fewer than two observations there is nothing to interpolate and the
/// result reports zero analysed days.
pub fn calculate_ttr(history: &InrHistory, range: &TherapeuticRange) -> TtrResult {
    let daily = interpolate(history);
    classify(daily.iter(), range, history.len())
}

/// TTR restricted to `[start, end]`
///
/// Only interpolated days inside both the window and the observation span are
/// counted; days outside the span are never extrapolated. An inverted window
/// yields an empty result.
pub fn calculate_ttr_in_window(
    history: &InrHistory,
    range: &TherapeuticRange,
    start: NaiveDate,
    end: NaiveDate,
) -> TtrResult {
    let control_count = history
        .observations()
        .iter()
        .filter(|o| o.date() >= start && o.date() <= end)
        .count();

    if start > end {
        return TtrResult::insufficient_data(control_count);
    }

    let daily = interpolate(history);
    classify(daily.range(start..=end), range, control_count)
}

/// Rolling TTR at each observation date
///
/// For every observation, TTR is recomputed over the observations dated within
/// the trailing `window_months` calendar months (inclusive). A point is only
/// emitted once at least two observations fall inside the window. Several
/// observations on one date produce a single point, computed with all of them.
pub fn calculate_ttr_trend(
    history: &InrHistory,
    range: &TherapeuticRange,
    window_months: u32,
) -> BTreeMap<NaiveDate, Decimal> {
    let mut trend = BTreeMap::new();

    for obs in history.observations() {
        let end = obs.date();
        let start = end
            .checked_sub_months(Months::new(window_months))
            .unwrap_or(NaiveDate::MIN);
        let window = history.between(start, end);
        if window.len() < 2 {
            continue;
        }
        trend.insert(end, calculate_ttr(&window, range).percentage);
    }

    tracing::debug!(points = trend.len(), window_months, "computed TTR trend");
    trend
}

fn classify<'a>(
    days: impl Iterator<Item = (&'a NaiveDate, &'a Decimal)>,
    range: &TherapeuticRange,
    control_count: usize,
) -> TtrResult {
    let (mut below, mut within, mut above) = (0usize, 0usize, 0usize);
    let mut period_start = None;
    let mut period_end = None;

    for (date, value) in days {
        period_start.get_or_insert(*date);
        period_end = Some(*date);
        match range.position(*value) {
            RangePosition::Below => below += 1,
            RangePosition::Within => within += 1,
            RangePosition::Above => above += 1,
        }
    }

    let total = below + within + above;
    if total == 0 {
        return TtrResult::insufficient_data(control_count);
    }

    let percentage = share(within, total);
    TtrResult {
        percentage,
        total_days: total,
        days_in_range: within,
        days_below_range: below,
        days_above_range: above,
        quality: evaluate_quality(percentage),
        period_start,
        period_end,
        control_count,
    }
}
