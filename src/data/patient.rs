//! Patient snapshot and DOAC monitoring records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex, as used by Cockcroft-Gault and hemoglobin cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Thromboembolic risk of the patient, used to decide on heparin bridging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThromboembolicRisk {
    Low,
    Moderate,
    High,
}

/// Patient attributes relevant to anticoagulation decisions
///
/// Comorbidity flags default to `false`; build with struct update syntax:
///
/// ```rust,ignore
/// let patient = Patient {
///     hypertension: true,
///     ..Patient::new(72, Gender::Female).with_weight(dec!(58))
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Age in years
    pub age: u32,
    /// Body weight in kg
    pub weight_kg: Option<Decimal>,
    pub gender: Gender,
    /// Serum creatinine in mg/dL
    pub serum_creatinine: Option<Decimal>,
    pub hypertension: bool,
    pub cirrhosis: bool,
    pub hepatic_dysfunction: bool,
    pub portal_hypertension: bool,
    pub stroke_history: bool,
    pub bleeding_history: bool,
    pub antiplatelet_use: bool,
    pub nsaid_use: bool,
    pub alcohol_abuse: bool,
}

impl Patient {
    pub fn new(age: u32, gender: Gender) -> Self {
        Self {
            age,
            weight_kg: None,
            gender,
            serum_creatinine: None,
            hypertension: false,
            cirrhosis: false,
            hepatic_dysfunction: false,
            portal_hypertension: false,
            stroke_history: false,
            bleeding_history: false,
            antiplatelet_use: false,
            nsaid_use: false,
            alcohol_abuse: false,
        }
    }

    pub fn with_weight(mut self, weight_kg: Decimal) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn with_creatinine(mut self, creatinine: Decimal) -> Self {
        self.serum_creatinine = Some(creatinine);
        self
    }

    /// Cirrhosis, hepatic dysfunction or portal hypertension
    pub fn has_hepatic_impairment(&self) -> bool {
        self.cirrhosis || self.hepatic_dysfunction || self.portal_hypertension
    }

    /// Concomitant antiplatelet or NSAID therapy
    pub fn on_interacting_drugs(&self) -> bool {
        self.antiplatelet_use || self.nsaid_use
    }
}

// ============================================================================
// DOAC records
// ============================================================================

/// The four supported direct oral anticoagulants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoacDrug {
    Dabigatran,
    Rivaroxaban,
    Apixaban,
    Edoxaban,
}

impl DoacDrug {
    /// All drugs, in table order
    pub const ALL: [DoacDrug; 4] = [
        DoacDrug::Dabigatran,
        DoacDrug::Rivaroxaban,
        DoacDrug::Apixaban,
        DoacDrug::Edoxaban,
    ];

    /// Position in [`DoacDrug::ALL`]
    pub const fn index(self) -> usize {
        match self {
            DoacDrug::Dabigatran => 0,
            DoacDrug::Rivaroxaban => 1,
            DoacDrug::Apixaban => 2,
            DoacDrug::Edoxaban => 3,
        }
    }
}

impl fmt::Display for DoacDrug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DoacDrug::Dabigatran => "Dabigatran",
            DoacDrug::Rivaroxaban => "Rivaroxaban",
            DoacDrug::Apixaban => "Apixaban",
            DoacDrug::Edoxaban => "Edoxaban",
        };
        write!(f, "{}", name)
    }
}

/// Why the patient is anticoagulated
///
/// Decided once when the record is entered; dosing never re-parses free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indication {
    /// Stroke prevention in non-valvular atrial fibrillation
    NonValvularAtrialFibrillation,
    /// Acute treatment phase of DVT/PE
    VteTreatment,
    /// Long-term prevention of recurrent DVT/PE
    VteSecondaryPrevention,
}

impl Indication {
    pub fn is_acute_treatment(self) -> bool {
        matches!(self, Indication::VteTreatment)
    }

    pub fn is_secondary_prevention(self) -> bool {
        matches!(self, Indication::VteSecondaryPrevention)
    }
}

/// Laboratory snapshot taken at a DOAC monitoring visit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabValues {
    /// Serum creatinine, mg/dL
    pub creatinine: Option<Decimal>,
    /// Body weight, kg
    pub weight_kg: Option<Decimal>,
    /// Hemoglobin, g/dL
    pub hemoglobin: Option<Decimal>,
    /// Hematocrit, %
    pub hematocrit: Option<Decimal>,
    /// Total bilirubin, mg/dL
    pub bilirubin: Option<Decimal>,
    /// Platelets, cells/µL
    pub platelets: Option<u32>,
    /// AST, U/L
    pub ast: Option<Decimal>,
    /// ALT, U/L
    pub alt: Option<Decimal>,
}

/// One DOAC monitoring visit
///
/// Carries only what was measured; derived values (CrCl, HAS-BLED, dose) are
/// produced by [`DoacCalculator::enrich`](crate::doac::DoacCalculator::enrich)
/// and never written back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoacMonitoringRecord {
    pub visit_date: NaiveDate,
    pub drug: DoacDrug,
    pub indication: Indication,
    pub labs: LabValues,
}

impl DoacMonitoringRecord {
    pub fn new(visit_date: NaiveDate, drug: DoacDrug, indication: Indication) -> Self {
        Self {
            visit_date,
            drug,
            indication,
            labs: LabValues::default(),
        }
    }

    pub fn with_labs(mut self, labs: LabValues) -> Self {
        self.labs = labs;
        self
    }
}
