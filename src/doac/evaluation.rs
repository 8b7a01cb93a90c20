//! Appropriateness of the current DOAC and alternative ranking

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::hasbled::HasBledScore;
use super::scheme::{DosageScheme, DosageSchemeTable};
use crate::data::{DoacDrug, DoacMonitoringRecord, Patient};
use crate::dosing::{generate_weekly_schedule, WeeklyDoseSchedule};

/// Priority every eligible alternative starts from
pub const BASE_PRIORITY: i32 = 50;

/// Usual warfarin starting dose, mg/week
pub const VKA_STANDARD_START: Decimal = dec!(35);

/// Warfarin starting dose for elderly, light or hepatically impaired
/// patients, mg/week
pub const VKA_REDUCED_START: Decimal = dec!(17.5);

/// How a drug fits the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appropriateness {
    Eligible,
    /// Relative contraindication
    NotRecommended,
    /// Absolute contraindication
    Contraindicated,
}

impl fmt::Display for Appropriateness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appropriateness::Eligible => write!(f, "eligible"),
            Appropriateness::NotRecommended => write!(f, "not recommended"),
            Appropriateness::Contraindicated => write!(f, "contraindicated"),
        }
    }
}

/// Appropriateness of one drug, with reasons for a negative verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugAssessment {
    pub drug: DoacDrug,
    pub appropriateness: Appropriateness,
    pub reasons: Vec<String>,
}

/// An eligible replacement and the bonuses that ranked it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub drug: DoacDrug,
    /// 0-100
    pub priority: u8,
    pub reasons: Vec<String>,
}

/// Advice to move to warfarin when no DOAC is eligible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VkaSwitch {
    /// Every contraindication and non-recommendation, joined with `"; "`
    pub rationale: String,
    pub starting_weekly_dose: Decimal,
    pub starting_schedule: Option<WeeklyDoseSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoacEvaluationResult {
    pub current_drug: DoacDrug,
    pub current_appropriateness: Appropriateness,
    /// All four drugs in table order
    pub assessments: Vec<DrugAssessment>,
    /// Eligible alternatives, best first; empty when the current drug is fine
    pub alternatives: Vec<RankedAlternative>,
    pub suggested_drug: Option<DoacDrug>,
    pub vka_switch: Option<VkaSwitch>,
}

impl DoacEvaluationResult {
    pub fn is_current_appropriate(&self) -> bool {
        self.current_appropriateness == Appropriateness::Eligible
    }

    pub fn requires_change(&self) -> bool {
        !self.is_current_appropriate()
    }

    fn with_status(&self, status: Appropriateness) -> Vec<DoacDrug> {
        self.assessments
            .iter()
            .filter(|a| a.appropriateness == status)
            .map(|a| a.drug)
            .collect()
    }

    pub fn eligible(&self) -> Vec<DoacDrug> {
        self.with_status(Appropriateness::Eligible)
    }

    pub fn not_recommended(&self) -> Vec<DoacDrug> {
        self.with_status(Appropriateness::NotRecommended)
    }

    pub fn contraindicated(&self) -> Vec<DoacDrug> {
        self.with_status(Appropriateness::Contraindicated)
    }
}

/// Judge one drug against the patient
pub fn assess(scheme: &DosageScheme, patient: &Patient, crcl: Option<u32>) -> DrugAssessment {
    let drug = scheme.drug;

    if let Some(c) = crcl.filter(|c| *c < scheme.renal_cutoff_ml_min) {
        return DrugAssessment {
            drug,
            appropriateness: Appropriateness::Contraindicated,
            reasons: vec![format!(
                "{}: CrCl {} mL/min below {} mL/min",
                drug, c, scheme.renal_cutoff_ml_min
            )],
        };
    }

    let mut reasons = Vec::new();
    if scheme.avoid_in_cirrhosis && patient.cirrhosis {
        reasons.push(format!("{}: not recommended in cirrhosis", drug));
    }
    if let (Some(upper), Some(c)) = (scheme.upper_crcl_ml_min, crcl) {
        if c > upper {
            reasons.push(format!(
                "{}: CrCl {} mL/min above {} mL/min reduces efficacy",
                drug, c, upper
            ));
        }
    }

    let appropriateness = if reasons.is_empty() {
        Appropriateness::Eligible
    } else {
        Appropriateness::NotRecommended
    };
    DrugAssessment {
        drug,
        appropriateness,
        reasons,
    }
}

/// Priority of an eligible alternative
fn rank(
    drug: DoacDrug,
    patient: &Patient,
    crcl: Option<u32>,
    has_bled: &HasBledScore,
) -> RankedAlternative {
    let mut priority = BASE_PRIORITY;
    let mut reasons = Vec::new();
    let mut bonus = |points: i32, reason: &str| {
        priority += points;
        reasons.push(reason.to_string());
    };

    if drug == DoacDrug::Apixaban && crcl.is_some_and(|c| c < 50) {
        bonus(20, "least renal clearance");
    }
    if patient.age >= 80 && matches!(drug, DoacDrug::Edoxaban | DoacDrug::Apixaban) {
        bonus(10, "favourable in the elderly");
    }
    if drug == DoacDrug::Dabigatran && patient.has_hepatic_impairment() {
        bonus(20, "non-hepatic clearance");
    }
    if drug == DoacDrug::Apixaban && has_bled.score >= 3 {
        bonus(10, "lowest bleeding rate");
    }

    RankedAlternative {
        drug,
        priority: priority.clamp(0, 100) as u8,
        reasons,
    }
}

/// Weekly warfarin start for a patient switched off DOACs
pub fn vka_starting_dose(record: &DoacMonitoringRecord, patient: &Patient) -> Decimal {
    let weight = record.labs.weight_kg.or(patient.weight_kg);
    if patient.age >= 75
        || weight.is_some_and(|w| w < dec!(50))
        || patient.has_hepatic_impairment()
    {
        VKA_REDUCED_START
    } else {
        VKA_STANDARD_START
    }
}

/// Check the current drug and, when it does not fit, propose another one
///
/// Alternatives are ranked by priority with ties kept in table order. When no
/// drug is eligible the result carries a [`VkaSwitch`] instead.
pub fn evaluate(
    table: &DosageSchemeTable,
    record: &DoacMonitoringRecord,
    patient: &Patient,
    crcl: Option<u32>,
    has_bled: &HasBledScore,
) -> DoacEvaluationResult {
    let assessments: Vec<DrugAssessment> =
        table.iter().map(|s| assess(s, patient, crcl)).collect();

    let current_appropriateness = assessments
        .iter()
        .find(|a| a.drug == record.drug)
        .map_or(Appropriateness::Eligible, |a| a.appropriateness);

    let mut result = DoacEvaluationResult {
        current_drug: record.drug,
        current_appropriateness,
        assessments,
        alternatives: Vec::new(),
        suggested_drug: None,
        vka_switch: None,
    };
    if result.is_current_appropriate() {
        return result;
    }

    let mut alternatives: Vec<RankedAlternative> = result
        .eligible()
        .into_iter()
        .map(|drug| rank(drug, patient, crcl, has_bled))
        .collect();
    // stable: equal priorities keep table order
    alternatives.sort_by(|a, b| b.priority.cmp(&a.priority));

    result.suggested_drug = alternatives.first().map(|a| a.drug);
    result.alternatives = alternatives;

    if result.suggested_drug.is_none() {
        let rationale = result
            .assessments
            .iter()
            .flat_map(|a| a.reasons.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("; ");
        let starting_weekly_dose = vka_starting_dose(record, patient);
        let starting_schedule = match generate_weekly_schedule(starting_weekly_dose) {
            Ok(schedule) => Some(schedule),
            Err(e) => {
                tracing::warn!(error = %e, "no starting warfarin schedule");
                None
            }
        };
        result.vka_switch = Some(VkaSwitch {
            rationale,
            starting_weekly_dose,
            starting_schedule,
        });
    }

    tracing::debug!(
        current = %result.current_drug,
        appropriateness = %result.current_appropriateness,
        suggested = ?result.suggested_drug,
        vka = result.vka_switch.is_some(),
        "DOAC evaluation"
    );
    result
}
