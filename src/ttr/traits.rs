//! Extension trait for TTR analysis on INR histories
//!
//! ```rust,ignore
//! use anticoag::prelude::*;
//!
//! let result = history.ttr(&TherapeuticRange::standard(), &TtrOptions::default());
//! println!("TTR: {}% ({})", result.percentage, result.quality);
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::calc::{calculate_ttr, calculate_ttr_in_window, calculate_ttr_trend};
use super::types::{TtrOptions, TtrResult};
use crate::data::{InrHistory, TherapeuticRange};
use crate::inr::{statistics, InrStatistics};

/// Time-in-therapeutic-range analysis
pub trait TimeInRange {
    /// TTR over the options' window, or the whole history when none is set
    fn ttr(&self, range: &TherapeuticRange, options: &TtrOptions) -> TtrResult;

    /// Rolling TTR using the options' trend window
    fn ttr_trend(
        &self,
        range: &TherapeuticRange,
        options: &TtrOptions,
    ) -> BTreeMap<NaiveDate, Decimal>;

    /// Descriptive statistics of the raw readings against `range`
    fn inr_statistics(&self, range: &TherapeuticRange) -> InrStatistics;
}

impl TimeInRange for InrHistory {
    fn ttr(&self, range: &TherapeuticRange, options: &TtrOptions) -> TtrResult {
        match options.window {
            Some((start, end)) => calculate_ttr_in_window(self, range, start, end),
            None => calculate_ttr(self, range),
        }
    }

    fn ttr_trend(
        &self,
        range: &TherapeuticRange,
        options: &TtrOptions,
    ) -> BTreeMap<NaiveDate, Decimal> {
        calculate_ttr_trend(self, range, options.trend_window_months)
    }

    fn inr_statistics(&self, range: &TherapeuticRange) -> InrStatistics {
        statistics(self, Some(range))
    }
}
