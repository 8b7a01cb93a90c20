//! DOAC calculation service

use serde::{Deserialize, Serialize};

use super::alerts::clinical_alerts;
use super::dosing::{determine_dosage, DosageRecommendation};
use super::evaluation::{evaluate, DoacEvaluationResult};
use super::hasbled::{has_bled, HasBledScore};
use super::interval::{control_interval, ControlIntervalRecommendation};
use super::renal::creatinine_clearance;
use super::scheme::{DosageScheme, DosageSchemeTable};
use crate::data::{DoacDrug, DoacMonitoringRecord, Patient};

/// A monitoring visit together with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMonitoringRecord {
    pub record: DoacMonitoringRecord,
    /// Creatinine clearance, mL/min
    pub crcl: Option<u32>,
    pub has_bled: HasBledScore,
    pub dosage: DosageRecommendation,
    pub interval: ControlIntervalRecommendation,
    pub evaluation: DoacEvaluationResult,
    pub alerts: Vec<String>,
}

/// DOAC dosing and monitoring against an injected scheme table
///
/// ```rust,ignore
/// let calculator = DoacCalculator::default();
/// let enriched = calculator.enrich(&record, &patient);
/// println!("{}", enriched.dosage);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoacCalculator {
    table: DosageSchemeTable,
}

impl DoacCalculator {
    pub fn new(table: DosageSchemeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DosageSchemeTable {
        &self.table
    }

    pub fn scheme(&self, drug: DoacDrug) -> &DosageScheme {
        self.table.get(drug)
    }

    /// Regimen for the record's drug
    pub fn determine_dosage(
        &self,
        record: &DoacMonitoringRecord,
        patient: &Patient,
        crcl: Option<u32>,
    ) -> DosageRecommendation {
        determine_dosage(self.scheme(record.drug), record, patient, crcl)
    }

    /// Appropriateness of the record's drug and ranked alternatives
    pub fn evaluate(
        &self,
        record: &DoacMonitoringRecord,
        patient: &Patient,
        crcl: Option<u32>,
        has_bled: &HasBledScore,
    ) -> DoacEvaluationResult {
        evaluate(&self.table, record, patient, crcl, has_bled)
    }

    /// Derive CrCl, HAS-BLED, dose, interval, evaluation and alerts
    ///
    /// The record is cloned into the result and never modified, so enriching
    /// the same record twice gives equal results.
    pub fn enrich(&self, record: &DoacMonitoringRecord, patient: &Patient) -> EnrichedMonitoringRecord {
        let crcl = creatinine_clearance(record, patient);
        let has_bled = has_bled(patient, crcl);
        let dosage = self.determine_dosage(record, patient, crcl);
        let interval = control_interval(record, patient, crcl, &has_bled);
        let evaluation = self.evaluate(record, patient, crcl, &has_bled);
        let alerts = clinical_alerts(record, patient, crcl, &has_bled);

        tracing::debug!(
            drug = %record.drug,
            visit = %record.visit_date,
            crcl = ?crcl,
            has_bled = has_bled.score,
            status = %dosage.status,
            months = interval.months,
            "enriched DOAC record"
        );

        EnrichedMonitoringRecord {
            record: record.clone(),
            crcl,
            has_bled,
            dosage,
            interval,
            evaluation,
            alerts,
        }
    }
}
