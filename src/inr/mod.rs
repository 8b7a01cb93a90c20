//! INR interpolation and descriptive statistics
//!
//! - [`interpolate`]: one linearly interpolated INR value per calendar day
//!   (the Rosendaal fill used by [`crate::ttr`])
//! - [`statistics`]: mean, dispersion and range percentages of raw readings

mod interpolate;
mod statistics;

pub use interpolate::{interpolate, INTERPOLATION_DP};
pub use statistics::{statistics, InrStatistics};
