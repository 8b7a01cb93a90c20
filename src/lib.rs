//! Anticoagulation decision support
//!
//! Deterministic algorithms for vitamin-K antagonist (warfarin) and direct
//! oral anticoagulant (DOAC) management:
//!
//! - [`ttr`]: time in therapeutic range by Rosendaal interpolation
//! - [`inr`]: daily INR interpolation and descriptive statistics
//! - [`dosing`]: FCSA / ACCP warfarin dose adjustment and weekly schedules
//! - [`doac`]: renal clearance, HAS-BLED, DOAC dosing, follow-up and alerts
//! - [`distribution`]: splitting a weekly dose into tablet-sized daily doses
//!
//! All clinical quantities are [`rust_decimal::Decimal`]; every computation is
//! pure and synchronous.

pub mod data;
pub mod distribution;
pub mod doac;
pub mod dosing;
pub mod error;
pub mod inr;
pub mod ttr;

pub use crate::data::*;
pub use error::AnticoagError;
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            DoacDrug, DoacMonitoringRecord, Gender, Indication, InrHistory, InrObservation,
            LabValues, Patient, TherapeuticRange, TherapyPhase, ThromboembolicRisk,
        };
    }

    pub mod warfarin {
        pub use crate::dosing::{
            generate_weekly_schedule, DosageGuideline, DosageInput, DosageOptions,
            DosageSuggestion, Guideline, WarfarinDosageCalculator, WeeklyDoseSchedule,
        };
        pub use crate::ttr::{TimeInRange, TtrOptions, TtrQuality, TtrResult};
    }

    pub mod doac {
        pub use crate::doac::{
            has_bled, DoacCalculator, DosageSchemeTable, DoseStatus, EnrichedMonitoringRecord,
        };
    }

    pub use crate::data::*;
    pub use crate::doac::DoacCalculator;
    pub use crate::dosing::{DosageInput, Guideline, WarfarinDosageCalculator};
    pub use crate::error::AnticoagError;
    pub use crate::ttr::TimeInRange;
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
