//! Follow-up interval for DOAC patients

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::hasbled::HasBledScore;
use crate::data::{DoacMonitoringRecord, Patient};

/// Follow-up interval when nothing calls for closer monitoring, months
pub const DEFAULT_INTERVAL_MONTHS: u32 = 12;

/// Platelet count below which monitoring is tightened, cells/µL
pub const LOW_PLATELETS: u32 = 100_000;

const LOW_HEMOGLOBIN: Decimal = dec!(10);

/// When to see the patient again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlIntervalRecommendation {
    pub months: u32,
    pub reasons: Vec<String>,
    pub next_control: NaiveDate,
}

/// Tightening-only interval accumulator
struct Interval {
    months: u32,
    reasons: Vec<String>,
}

impl Interval {
    fn cap(&mut self, months: u32, reason: String) {
        self.months = self.months.min(months);
        self.reasons.push(reason);
    }
}

/// Months until the next DOAC check
///
/// Starts from 12 months and applies each matching criterion as a cap, so the
/// interval only ever shrinks. Every matching criterion adds a reason, except
/// age, which is recorded only when it still tightens the interval.
pub fn control_interval(
    record: &DoacMonitoringRecord,
    patient: &Patient,
    crcl: Option<u32>,
    has_bled: &HasBledScore,
) -> ControlIntervalRecommendation {
    let mut interval = Interval {
        months: DEFAULT_INTERVAL_MONTHS,
        reasons: Vec::new(),
    };

    if has_bled.score >= 3 {
        interval.cap(3, format!("High bleeding risk (HAS-BLED {})", has_bled.score));
    } else if has_bled.score == 2 {
        interval.cap(6, "Moderate bleeding risk (HAS-BLED 2)".to_string());
    }

    match crcl {
        Some(c) if c < 30 => interval.cap(3, format!("Severe renal impairment (CrCl {} mL/min)", c)),
        Some(c) if c < 50 => {
            interval.cap(6, format!("Moderate renal impairment (CrCl {} mL/min)", c))
        }
        _ => {}
    }

    if patient.age > 80 && interval.months > 6 {
        interval.cap(6, format!("Age {} over 80", patient.age));
    }

    if patient.hepatic_dysfunction || patient.cirrhosis {
        interval.cap(6, "Hepatic dysfunction or cirrhosis".to_string());
    }

    if patient.on_interacting_drugs() {
        interval.cap(6, "Concomitant antiplatelet or NSAID therapy".to_string());
    }

    if let Some(hb) = record.labs.hemoglobin.filter(|hb| *hb < LOW_HEMOGLOBIN) {
        interval.cap(3, format!("Hemoglobin {} g/dL below 10 g/dL", hb.normalize()));
    }

    if let Some(plt) = record.labs.platelets.filter(|p| *p < LOW_PLATELETS) {
        interval.cap(3, format!("Platelets {}/µL below 100,000/µL", plt));
    }

    if interval.reasons.is_empty() {
        interval
            .reasons
            .push("Stable patient: standard follow-up".to_string());
    }

    let next_control = record
        .visit_date
        .checked_add_months(Months::new(interval.months))
        .unwrap_or(NaiveDate::MAX);

    tracing::debug!(
        months = interval.months,
        criteria = interval.reasons.len(),
        %next_control,
        "DOAC control interval"
    );

    ControlIntervalRecommendation {
        months: interval.months,
        reasons: interval.reasons,
        next_control,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DoacDrug, Gender, Indication, LabValues};
    use crate::doac::has_bled;

    fn record(labs: LabValues) -> DoacMonitoringRecord {
        DoacMonitoringRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            DoacDrug::Apixaban,
            Indication::NonValvularAtrialFibrillation,
        )
        .with_labs(labs)
    }

    fn interval_for(
        labs: LabValues,
        patient: &Patient,
        crcl: Option<u32>,
    ) -> ControlIntervalRecommendation {
        control_interval(&record(labs), patient, crcl, &has_bled(patient, crcl))
    }

    #[test]
    fn test_stable_patient() {
        let patient = Patient::new(60, Gender::Male);
        let rec = interval_for(LabValues::default(), &patient, Some(85));
        assert_eq!(rec.months, 12);
        assert_eq!(rec.reasons, vec!["Stable patient: standard follow-up"]);
        assert_eq!(rec.next_control, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_caps_never_loosen() {
        // HAS-BLED 3 caps at 3; later 6-month caps must not widen it
        let patient = Patient {
            hypertension: true,
            stroke_history: true,
            antiplatelet_use: true,
            ..Patient::new(60, Gender::Female)
        };
        let rec = interval_for(LabValues::default(), &patient, Some(40));
        assert_eq!(rec.months, 3);
        assert_eq!(rec.reasons.len(), 3);
        assert!(rec.reasons[0].starts_with("High bleeding risk"));
        // end-of-month arithmetic clamps to the last day
        assert_eq!(rec.next_control, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_age_only_recorded_when_tightening() {
        let patient = Patient::new(85, Gender::Male);
        // HAS-BLED 1 (elderly), CrCl fine
        let rec = interval_for(LabValues::default(), &patient, Some(60));
        assert_eq!(rec.months, 6);
        assert_eq!(rec.reasons, vec!["Age 85 over 80"]);

        // already at 6 from renal function: age adds nothing
        let rec = interval_for(LabValues::default(), &patient, Some(45));
        assert_eq!(rec.months, 6);
        assert_eq!(rec.reasons.len(), 1);
        assert!(rec.reasons[0].starts_with("Moderate renal impairment"));
    }

    #[test]
    fn test_lab_criteria() {
        let patient = Patient::new(60, Gender::Male);
        let labs = LabValues {
            hemoglobin: Some(dec!(9.5)),
            platelets: Some(80_000),
            ..Default::default()
        };
        let rec = interval_for(labs, &patient, None);
        assert_eq!(rec.months, 3);
        assert_eq!(
            rec.reasons,
            vec![
                "Hemoglobin 9.5 g/dL below 10 g/dL",
                "Platelets 80000/µL below 100,000/µL"
            ]
        );
    }

    #[test]
    fn test_severe_renal_impairment() {
        let patient = Patient::new(60, Gender::Male);
        let rec = interval_for(LabValues::default(), &patient, Some(25));
        assert_eq!(rec.months, 3);
    }
}
