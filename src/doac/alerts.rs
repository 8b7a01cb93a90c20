//! Clinical alerts for a DOAC visit

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::hasbled::HasBledScore;
use super::interval::LOW_PLATELETS;
use crate::data::{DoacMonitoringRecord, Gender, Patient};

const ANEMIA_MALE: Decimal = dec!(13.0);
const ANEMIA_FEMALE: Decimal = dec!(12.0);
const TRANSAMINASE_LIMIT: Decimal = dec!(120);

/// Advisory messages for the visit, in a fixed order
///
/// Hemoglobin, platelets, transaminases, renal function (one tier) and
/// bleeding risk (one tier). Checks are independent; any number may fire.
pub fn clinical_alerts(
    record: &DoacMonitoringRecord,
    patient: &Patient,
    crcl: Option<u32>,
    has_bled: &HasBledScore,
) -> Vec<String> {
    let labs = &record.labs;
    let mut alerts = Vec::new();

    let anemia_limit = match patient.gender {
        Gender::Male => ANEMIA_MALE,
        Gender::Female => ANEMIA_FEMALE,
    };
    if let Some(hb) = labs.hemoglobin.filter(|hb| *hb < anemia_limit) {
        alerts.push(format!(
            "Anemia: hemoglobin {} g/dL below {} g/dL, check for occult bleeding",
            hb.normalize(),
            anemia_limit.normalize()
        ));
    }

    if let Some(plt) = labs.platelets.filter(|p| *p < LOW_PLATELETS) {
        alerts.push(format!(
            "Thrombocytopenia: platelets {}/µL below 100,000/µL",
            plt
        ));
    }

    let elevated: Vec<String> = [("AST", labs.ast), ("ALT", labs.alt)]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .filter(|v| *v > TRANSAMINASE_LIMIT)
                .map(|v| format!("{} {} U/L", name, v.normalize()))
        })
        .collect();
    if !elevated.is_empty() {
        alerts.push(format!(
            "Elevated transaminases: {} (above 120 U/L), assess liver function",
            elevated.join(", ")
        ));
    }

    match crcl {
        Some(c) if c < 15 => alerts.push(format!(
            "Renal failure: CrCl {} mL/min, DOAC therapy contraindicated",
            c
        )),
        Some(c) if c < 30 => alerts.push(format!(
            "Severe renal impairment: CrCl {} mL/min, review drug choice and dose",
            c
        )),
        Some(c) if c < 50 => alerts.push(format!(
            "Moderate renal impairment: CrCl {} mL/min, check dose reduction criteria",
            c
        )),
        _ => {}
    }

    if has_bled.score >= 5 {
        alerts.push(format!(
            "Very high bleeding risk: HAS-BLED {}, reassess anticoagulation",
            has_bled.score
        ));
    } else if has_bled.score >= 3 {
        alerts.push(format!(
            "High bleeding risk: HAS-BLED {}, correct modifiable risk factors",
            has_bled.score
        ));
    }

    if !alerts.is_empty() {
        tracing::debug!(count = alerts.len(), drug = %record.drug, "clinical alerts raised");
    }
    alerts
}
