//! Dose distribution error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when splitting a weekly dose into daily doses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Step size is zero or negative
    #[error("Step size must be positive, got {step}")]
    NonPositiveStep { step: Decimal },

    /// Weekly total is negative
    #[error("Weekly dose must not be negative, got {total}")]
    NegativeTotal { total: Decimal },

    /// Weekly total cannot be expressed in whole steps
    #[error("Weekly dose {total} is not a multiple of step {step}")]
    MisalignedTotal { total: Decimal, step: Decimal },

    /// Weekly total exceeds the representable number of steps
    #[error("Weekly dose {total} is too large for step {step}")]
    TooLarge { total: Decimal, step: Decimal },
}
