//! Error types for INR data validation
//!
//! [`InrError`] covers problems with the input data itself: inverted target
//! ranges and histories that break the chronological precondition. Calculations
//! over an already validated [`InrHistory`](super::InrHistory) never fail.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors arising from INR data construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InrError {
    /// Target range bounds are not `0 < min < max`
    #[error("Invalid therapeutic range: min={min}, max={max}")]
    InvalidRange { min: Decimal, max: Decimal },

    /// An observation is dated before its predecessor
    #[error("Observations out of order at index {index}: {date} precedes {previous}")]
    UnsortedObservations {
        /// Position of the offending observation
        index: usize,
        /// Date of the preceding observation
        previous: NaiveDate,
        /// Date of the offending observation
        date: NaiveDate,
    },

    /// An INR value is zero or negative
    #[error("Non-positive INR {value} at index {index}")]
    NonPositiveInr { index: usize, value: Decimal },
}
