//! Descriptive statistics over INR readings

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::{InrHistory, RangePosition, TherapeuticRange};

/// Summary of the raw INR readings (not the interpolated days)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InrStatistics {
    /// Number of readings
    pub count: usize,
    /// Arithmetic mean
    pub mean: Decimal,
    /// Population standard deviation
    pub std_dev: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    /// Median, averaging the two middle readings for even counts
    pub median: Decimal,
    /// Percentage of readings below the range
    pub pct_below: Decimal,
    /// Percentage of readings within the range
    pub pct_in_range: Decimal,
    /// Percentage of readings above the range
    pub pct_above: Decimal,
}

impl fmt::Display for InrStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INR readings: {}", self.count)?;
        writeln!(
            f,
            "  mean {} ± {} (median {}, min {}, max {})",
            self.mean, self.std_dev, self.median, self.min, self.max
        )?;
        write!(
            f,
            "  below {}% / in range {}% / above {}%",
            self.pct_below, self.pct_in_range, self.pct_above
        )
    }
}

fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * dec!(100) / Decimal::from(whole)).round_dp(2)
}

fn median(sorted: &[Decimal]) -> Decimal {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / dec!(2)
    } else {
        sorted[n / 2]
    }
}

/// Compute descriptive statistics over the readings of `history`
///
/// Range percentages are computed against `range`, or against
/// [`TherapeuticRange::standard`] when none is supplied. An empty history yields
/// zeroed statistics.
pub fn statistics(history: &InrHistory, range: Option<&TherapeuticRange>) -> InrStatistics {
    let mut values = history.values();
    let n = values.len();
    if n == 0 {
        return InrStatistics::default();
    }

    let range = range.copied().unwrap_or_default();
    let count = Decimal::from(n);

    let mean = values.iter().copied().sum::<Decimal>() / count;
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / count;
    let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);

    let (mut below, mut within, mut above) = (0usize, 0usize, 0usize);
    for v in &values {
        match range.position(*v) {
            RangePosition::Below => below += 1,
            RangePosition::Within => within += 1,
            RangePosition::Above => above += 1,
        }
    }

    values.sort();

    InrStatistics {
        count: n,
        mean: mean.round_dp(2),
        std_dev: std_dev.round_dp(2),
        min: values[0],
        max: values[n - 1],
        median: median(&values).round_dp(2),
        pct_below: percentage(below, n),
        pct_in_range: percentage(within, n),
        pct_above: percentage(above, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InrObservation;
    use chrono::NaiveDate;

    fn history(values: &[Decimal]) -> InrHistory {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        InrHistory::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    InrObservation::new(
                        start + chrono::Days::new(7 * i as u64),
                        *v,
                        dec!(35),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_history_zeroed() {
        let stats = statistics(&InrHistory::empty(), None);
        assert_eq!(stats, InrStatistics::default());
    }

    #[test]
    fn test_basic_statistics() {
        let stats = statistics(&history(&[dec!(2.0), dec!(4.0), dec!(3.0), dec!(1.0)]), None);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, dec!(2.5));
        assert_eq!(stats.min, dec!(1.0));
        assert_eq!(stats.max, dec!(4.0));
        assert_eq!(stats.median, dec!(2.5));
        // population variance = (0.25 + 2.25 + 0.25 + 2.25) / 4 = 1.25
        assert_eq!(stats.std_dev, dec!(1.12));
        assert_eq!(stats.pct_below, dec!(25));
        assert_eq!(stats.pct_in_range, dec!(50));
        assert_eq!(stats.pct_above, dec!(25));
    }

    #[test]
    fn test_odd_median_and_custom_range() {
        let range = TherapeuticRange::mechanical_valve();
        let stats = statistics(&history(&[dec!(2.4), dec!(3.0), dec!(2.6)]), Some(&range));
        assert_eq!(stats.median, dec!(2.6));
        assert_eq!(stats.pct_below, dec!(33.33));
        assert_eq!(stats.pct_in_range, dec!(66.67));
        assert_eq!(stats.pct_above, dec!(0));
    }
}
