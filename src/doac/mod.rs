//! Direct oral anticoagulant (DOAC) monitoring
//!
//! All functions are pure over a monitoring record and a patient snapshot:
//!
//! | Function | Result |
//! |----------|--------|
//! | [`creatinine_clearance`] | Cockcroft-Gault CrCl, `None` when inputs are missing |
//! | [`has_bled`] | HAS-BLED score and risk band |
//! | [`DoacCalculator::determine_dosage`] | Regimen with itemised reasons |
//! | [`control_interval`] | Months to the next visit |
//! | [`DoacCalculator::evaluate`] | Appropriateness and ranked alternatives |
//! | [`clinical_alerts`] | Ordered advisory messages |
//! | [`DoacCalculator::enrich`] | All of the above in one value |
//!
//! Per-drug regimens live in a [`DosageSchemeTable`] injected at
//! [`DoacCalculator::new`].

mod alerts;
mod calculator;
mod dosing;
mod error;
mod evaluation;
mod hasbled;
mod interval;
mod renal;
mod scheme;


pub use alerts::clinical_alerts;
pub use calculator::{DoacCalculator, EnrichedMonitoringRecord};
pub use dosing::{determine_dosage, DosageRecommendation, DoseStatus};
pub use error::DoacError;
pub use evaluation::{
    assess, vka_starting_dose, Appropriateness, DoacEvaluationResult, DrugAssessment,
    RankedAlternative, VkaSwitch, BASE_PRIORITY, VKA_REDUCED_START, VKA_STANDARD_START,
};
pub use hasbled::{has_bled, HasBledComponent, HasBledFactor, HasBledRisk, HasBledScore};
pub use interval::{control_interval, ControlIntervalRecommendation, DEFAULT_INTERVAL_MONTHS};
pub use renal::{cockcroft_gault, creatinine_clearance};
pub use scheme::{DosageScheme, DosageSchemeTable, ReductionCriteria, RenalBand};
