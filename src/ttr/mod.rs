//! Time in Therapeutic Range (TTR) by the Rosendaal method
//!
//! INR checks are sparse; Rosendaal assumes the INR moves linearly between two
//! checks and counts the interpolated days that fall inside the target range.
//!
//! | Quality | TTR |
//! |---------|-----|
//! | Excellent | ≥ 70 % |
//! | Good | 65 – 70 % |
//! | Acceptable | 60 – 65 % |
//! | Suboptimal | 50 – 60 % |
//! | Poor | < 50 % |
//!
//! # Usage
//!
//! ```rust,ignore
//! use anticoag::prelude::*;
//!
//! let history = InrHistory::builder()
//!     .observation(jan(1), dec!(2.0), dec!(35))
//!     .observation(jan(11), dec!(3.0), dec!(35))
//!     .build()?;
//!
//! let result = history.ttr(&TherapeuticRange::standard(), &TtrOptions::default());
//! let trend = history.ttr_trend(&TherapeuticRange::standard(), &TtrOptions::default());
//! ```
//!
//! Histories must be chronologically ordered; [`InrHistory`](crate::data::InrHistory)
//! rejects anything else at construction.

mod calc;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use calc::{calculate_ttr, calculate_ttr_in_window, calculate_ttr_trend, evaluate_quality};
pub use traits::TimeInRange;
pub use types::{TtrOptions, TtrQuality, TtrResult};
