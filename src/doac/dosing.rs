//! DOAC dose determination

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::scheme::DosageScheme;
use crate::data::{DoacDrug, DoacMonitoringRecord, Patient};

/// Which regimen applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoseStatus {
    Standard,
    Reduced,
    Loading,
    Prevention,
    /// Must not be used
    Contraindicated,
    /// Usable only with strong justification
    NotRecommended,
}

impl fmt::Display for DoseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DoseStatus::Standard => "standard dose",
            DoseStatus::Reduced => "reduced dose",
            DoseStatus::Loading => "loading dose",
            DoseStatus::Prevention => "prevention dose",
            DoseStatus::Contraindicated => "contraindicated",
            DoseStatus::NotRecommended => "not recommended",
        };
        write!(f, "{}", label)
    }
}

/// Recommended regimen with its audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosageRecommendation {
    pub drug: DoacDrug,
    pub status: DoseStatus,
    /// Regimen text; `None` when the drug should not be given
    pub dose: Option<String>,
    pub reasons: Vec<String>,
}

impl DosageRecommendation {
    /// Reasons joined with `"; "`
    pub fn rationale(&self) -> String {
        self.reasons.join("; ")
    }

    pub fn is_contraindicated(&self) -> bool {
        self.status == DoseStatus::Contraindicated
    }

    pub fn is_not_recommended(&self) -> bool {
        self.status == DoseStatus::NotRecommended
    }
}

impl fmt::Display for DosageRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dose {
            Some(dose) => write!(f, "{}: {} ({})", self.drug, dose, self.status)?,
            None => write!(f, "{}: {}", self.drug, self.status)?,
        }
        if !self.reasons.is_empty() {
            write!(f, " - {}", self.rationale())?;
        }
        Ok(())
    }
}

/// Pick the regimen of `scheme` for a visit
///
/// The first matching rule wins: renal contraindication, cirrhosis, VTE
/// loading, secondary prevention, reduction criteria, standard. Without a CrCl
/// the renal rules are skipped and a reason says so.
pub fn determine_dosage(
    scheme: &DosageScheme,
    record: &DoacMonitoringRecord,
    patient: &Patient,
    crcl: Option<u32>,
) -> DosageRecommendation {
    let drug = scheme.drug;
    let mut reasons = Vec::new();
    let finish = |status, dose: Option<&Cow<'static, str>>, reasons| DosageRecommendation {
        drug,
        status,
        dose: dose.map(|d| d.to_string()),
        reasons,
    };

    match crcl {
        Some(c) if c < scheme.renal_cutoff_ml_min => {
            reasons.push(format!(
                "CrCl {} mL/min below the {} cutoff of {} mL/min",
                c, drug, scheme.renal_cutoff_ml_min
            ));
            return finish(DoseStatus::Contraindicated, None, reasons);
        }
        Some(_) => {}
        None => reasons.push("CrCl unavailable: renal criteria not assessed".to_string()),
    }

    if patient.cirrhosis && scheme.avoid_in_cirrhosis {
        reasons.push(format!("{} is not recommended in cirrhosis", drug));
        return finish(DoseStatus::NotRecommended, None, reasons);
    }

    if record.indication.is_acute_treatment() {
        if let Some(loading) = &scheme.loading_dose {
            reasons.push(format!(
                "Acute VTE treatment: {} then {}",
                loading, scheme.standard_dose
            ));
            return finish(DoseStatus::Loading, Some(loading), reasons);
        }
    }

    if record.indication.is_secondary_prevention() {
        if let Some(prevention) = &scheme.prevention_dose {
            reasons.push("Secondary VTE prevention after the treatment phase".to_string());
            return finish(DoseStatus::Prevention, Some(prevention), reasons);
        }
    }

    let reduction = reduction_reasons(scheme, record, patient, crcl);
    if !reduction.is_empty() {
        reasons.extend(reduction);
        return finish(DoseStatus::Reduced, Some(&scheme.reduced_dose), reasons);
    }

    reasons.push("standard regimen".to_string());
    finish(DoseStatus::Standard, Some(&scheme.standard_dose), reasons)
}

/// Itemised reasons for a reduced dose; empty when none applies
fn reduction_reasons(
    scheme: &DosageScheme,
    record: &DoacMonitoringRecord,
    patient: &Patient,
    crcl: Option<u32>,
) -> Vec<String> {
    let criteria = &scheme.reduction_criteria;
    let weight = record.labs.weight_kg.or(patient.weight_kg);
    let creatinine = record.labs.creatinine.or(patient.serum_creatinine);

    let mut factors = Vec::new();
    if let Some(min_age) = criteria.age_at_least {
        if patient.age >= min_age {
            factors.push(format!("age {} ≥ {}", patient.age, min_age));
        }
    }
    if let (Some(limit), Some(w)) = (criteria.weight_at_most_kg, weight) {
        if w <= limit {
            factors.push(format!("weight {} kg ≤ {} kg", w.normalize(), limit.normalize()));
        }
    }
    if let (Some(limit), Some(c)) = (criteria.creatinine_at_least, creatinine) {
        if c >= limit {
            factors.push(format!(
                "creatinine {} mg/dL ≥ {} mg/dL",
                c.normalize(),
                limit.normalize()
            ));
        }
    }

    let mut reasons = Vec::new();
    if let (Some(band), Some(c)) = (criteria.renal_band, crcl) {
        if band.contains(c) {
            reasons.push(format!("CrCl {} mL/min in {}-{} mL/min", c, band.min, band.max));
        }
    }
    if !factors.is_empty() && factors.len() >= usize::from(criteria.min_patient_factors) {
        reasons.extend(factors);
    }
    reasons
}
