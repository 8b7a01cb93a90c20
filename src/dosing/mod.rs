//! Warfarin dose adjustment
//!
//! An INR check is placed in one of seven deviation bands; each band of the
//! selected guideline prescribes a weekly percentage change, the next check
//! interval and, where needed, a loading dose, withheld doses, vitamin K or
//! heparin bridging.
//!
//! | Band | FCSA | ACCP |
//! |------|------|------|
//! | < min − 0.5 | +10 %, ×2 loading | +15 %, ×1.5 loading |
//! | min − 0.5 … min − 0.3 | +7.5 %, ×1.5 loading | +10 %, ×1.25 loading |
//! | min − 0.3 … min | +5 %, ×1.25 loading | +5 %, ×1.25 loading |
//! | in range | unchanged | unchanged |
//! | max … moderate | −5 % | −5 % |
//! | moderate (5.0 / 4.5) | −10 %, withhold 1 | −10 %, withhold 1 |
//! | severe (6.0 / 10.0) | −15 %, vitamin K 2 mg | −15 %, vitamin K 2.5 mg |
//!
//! # Usage
//!
//! ```rust,ignore
//! use anticoag::dosing::*;
//!
//! let input = DosageInput::new(dec!(7.0), dec!(35));
//! let fcsa = WarfarinDosageCalculator::new(Guideline::Fcsa).calculate(&input)?;
//! let accp = WarfarinDosageCalculator::new(Guideline::Accp).calculate(&input)?;
//! assert!(fcsa.requires_vitamin_k && !accp.requires_vitamin_k);
//! ```

mod calculator;
mod error;
mod guideline;
mod schedule;
mod types;


pub use calculator::WarfarinDosageCalculator;
pub use error::DosageError;
pub use guideline::{
    Accp, BandRule, DosageGuideline, Fcsa, Guideline, GuidelineTable, PhaseIntervals, VitaminK,
    ACCP_TABLE, FCSA_TABLE,
};
pub use schedule::{describe_daily_dose, generate_weekly_schedule, generate_weekly_schedule_with_step};
pub use types::{
    DailyDose, DosageInput, DosageOptions, DosageSuggestion, InrBand, Urgency, VitaminKRoute,
    WeeklyDoseSchedule,
};
