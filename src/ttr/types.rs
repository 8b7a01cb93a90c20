//! TTR types: results, quality bands and configuration

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

// ============================================================================
// Configuration Types
// ============================================================================

/// TTR configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtrOptions {
    /// Restrict the analysis to `[start, end]` (None = whole history)
    pub window: Option<(NaiveDate, NaiveDate)>,

    /// Trailing window, in calendar months, for the rolling trend (default: 3)
    pub trend_window_months: u32,
}

impl Default for TtrOptions {
    fn default() -> Self {
        Self {
            window: None,
            trend_window_months: 3,
        }
    }
}

impl TtrOptions {
    /// Restrict the analysis to a date window
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window = Some((start, end));
        self
    }

    /// Set the rolling trend window in months
    pub fn with_trend_window_months(mut self, months: u32) -> Self {
        self.trend_window_months = months;
        self
    }

    /// Six-month trend, used for annual reviews
    pub fn semiannual() -> Self {
        Self {
            trend_window_months: 6,
            ..Default::default()
        }
    }
}

// ============================================================================
// Quality
// ============================================================================

/// Quality of anticoagulation control, banded on TTR percentage
///
/// Bands are closed below and open above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TtrQuality {
    /// TTR < 50
    Poor,
    /// 50 ≤ TTR < 60
    Suboptimal,
    /// 60 ≤ TTR < 65
    Acceptable,
    /// 65 ≤ TTR < 70
    Good,
    /// TTR ≥ 70
    Excellent,
}

impl TtrQuality {
    /// Lower bound of each band, best first
    pub(crate) const BANDS: [(Decimal, TtrQuality); 4] = [
        (dec!(70), TtrQuality::Excellent),
        (dec!(65), TtrQuality::Good),
        (dec!(60), TtrQuality::Acceptable),
        (dec!(50), TtrQuality::Suboptimal),
    ];
}

impl fmt::Display for TtrQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TtrQuality::Excellent => "Excellent",
            TtrQuality::Good => "Good",
            TtrQuality::Acceptable => "Acceptable",
            TtrQuality::Suboptimal => "Suboptimal",
            TtrQuality::Poor => "Poor",
        };
        write!(f, "{}", label)
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Time in therapeutic range over an analysed period
///
/// `total_days == 0` means there was not enough data (fewer than two
/// observations, or an empty window); the percentage is then 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtrResult {
    /// Days in range / total days × 100, two decimals
    pub percentage: Decimal,
    /// Interpolated days analysed
    pub total_days: usize,
    pub days_in_range: usize,
    pub days_below_range: usize,
    pub days_above_range: usize,
    pub quality: TtrQuality,
    /// First analysed day
    pub period_start: Option<NaiveDate>,
    /// Last analysed day
    pub period_end: Option<NaiveDate>,
    /// INR checks falling inside the period
    pub control_count: usize,
}

impl TtrResult {
    /// Result for a period with nothing to analyse
    pub fn insufficient_data(control_count: usize) -> Self {
        Self {
            percentage: Decimal::ZERO,
            total_days: 0,
            days_in_range: 0,
            days_below_range: 0,
            days_above_range: 0,
            quality: TtrQuality::Poor,
            period_start: None,
            period_end: None,
            control_count,
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_days > 0
    }

    /// Percentage of days below range
    pub fn pct_below(&self) -> Decimal {
        share(self.days_below_range, self.total_days)
    }

    /// Percentage of days above range
    pub fn pct_above(&self) -> Decimal {
        share(self.days_above_range, self.total_days)
    }

    /// Flatten to parameter name-value pairs for export
    pub fn to_params(&self) -> HashMap<&'static str, Decimal> {
        let mut p = HashMap::new();
        p.insert("ttr_pct", self.percentage);
        p.insert("total_days", Decimal::from(self.total_days));
        p.insert("days_in_range", Decimal::from(self.days_in_range));
        p.insert("days_below_range", Decimal::from(self.days_below_range));
        p.insert("days_above_range", Decimal::from(self.days_above_range));
        p.insert("pct_below", self.pct_below());
        p.insert("pct_above", self.pct_above());
        p.insert("control_count", Decimal::from(self.control_count));
        p
    }
}

pub(crate) fn share(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * dec!(100) / Decimal::from(whole)).round_dp(2)
}

impl fmt::Display for TtrResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════╗")?;
        writeln!(f, "║           TTR (Rosendaal)            ║")?;
        writeln!(f, "╠══════════════════════════════════════╣")?;
        if let (Some(start), Some(end)) = (self.period_start, self.period_end) {
            writeln!(f, "║ Period: {:<28} ║", format!("{} → {}", start, end))?;
        }
        writeln!(f, "║ Controls: {:<26} ║", self.control_count)?;
        writeln!(f, "║ TTR: {:<31} ║", format!("{}% ({})", self.percentage, self.quality))?;
        writeln!(
            f,
            "║ Days in/below/above: {:<15} ║",
            format!(
                "{}/{}/{}",
                self.days_in_range, self.days_below_range, self.days_above_range
            )
        )?;
        writeln!(f, "╚══════════════════════════════════════╝")?;
        Ok(())
    }
}
