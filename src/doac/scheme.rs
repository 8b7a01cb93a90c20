//! Per-drug dosing schemes
//!
//! [`DosageSchemeTable::standard`] holds the labelled regimens for the four
//! DOACs. A table is handed to [`DoacCalculator`](super::DoacCalculator) at
//! construction; alternate tables can be loaded from JSON.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::error::DoacError;
use crate::data::DoacDrug;

/// Inclusive CrCl interval, mL/min
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenalBand {
    pub min: u32,
    pub max: u32,
}

impl RenalBand {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, crcl: u32) -> bool {
        (self.min..=self.max).contains(&crcl)
    }
}

/// When the reduced dose applies
///
/// A reduction is due when CrCl falls in `renal_band`, or when at least
/// `min_patient_factors` of the age, weight and creatinine thresholds that are
/// set are met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionCriteria {
    /// Label as printed in the drug's prescribing information
    pub description: Cow<'static, str>,
    #[serde(default)]
    pub renal_band: Option<RenalBand>,
    #[serde(default)]
    pub age_at_least: Option<u32>,
    #[serde(default)]
    pub weight_at_most_kg: Option<Decimal>,
    #[serde(default)]
    pub creatinine_at_least: Option<Decimal>,
    #[serde(default = "one")]
    pub min_patient_factors: u8,
}

fn one() -> u8 {
    1
}

/// Dosing scheme of one drug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosageScheme {
    pub drug: DoacDrug,
    pub standard_dose: Cow<'static, str>,
    pub reduced_dose: Cow<'static, str>,
    /// Initial dose for the acute VTE treatment phase
    #[serde(default)]
    pub loading_dose: Option<Cow<'static, str>>,
    /// Dose for long-term secondary VTE prevention
    #[serde(default)]
    pub prevention_dose: Option<Cow<'static, str>>,
    /// Contraindicated below this CrCl, mL/min
    pub renal_cutoff_ml_min: u32,
    /// Not recommended above this CrCl, mL/min
    #[serde(default)]
    pub upper_crcl_ml_min: Option<u32>,
    pub reduction_criteria: ReductionCriteria,
    /// Not recommended in cirrhosis
    #[serde(default)]
    pub avoid_in_cirrhosis: bool,
}

const STANDARD_SCHEMES: [DosageScheme; 4] = [
    DosageScheme {
        drug: DoacDrug::Dabigatran,
        standard_dose: Cow::Borrowed("150 mg twice daily"),
        reduced_dose: Cow::Borrowed("110 mg twice daily"),
        loading_dose: None,
        prevention_dose: None,
        renal_cutoff_ml_min: 30,
        upper_crcl_ml_min: None,
        reduction_criteria: ReductionCriteria {
            description: Cow::Borrowed("age ≥ 80"),
            renal_band: None,
            age_at_least: Some(80),
            weight_at_most_kg: None,
            creatinine_at_least: None,
            min_patient_factors: 1,
        },
        avoid_in_cirrhosis: false,
    },
    DosageScheme {
        drug: DoacDrug::Rivaroxaban,
        standard_dose: Cow::Borrowed("20 mg once daily"),
        reduced_dose: Cow::Borrowed("15 mg once daily"),
        loading_dose: Some(Cow::Borrowed("15 mg twice daily for 21 days")),
        prevention_dose: Some(Cow::Borrowed("10 mg once daily")),
        renal_cutoff_ml_min: 15,
        upper_crcl_ml_min: None,
        reduction_criteria: ReductionCriteria {
            description: Cow::Borrowed("CrCl 15-49 mL/min"),
            renal_band: Some(RenalBand::new(15, 49)),
            age_at_least: None,
            weight_at_most_kg: None,
            creatinine_at_least: None,
            min_patient_factors: 1,
        },
        avoid_in_cirrhosis: true,
    },
    DosageScheme {
        drug: DoacDrug::Apixaban,
        standard_dose: Cow::Borrowed("5 mg twice daily"),
        reduced_dose: Cow::Borrowed("2.5 mg twice daily"),
        loading_dose: Some(Cow::Borrowed("10 mg twice daily for 7 days")),
        prevention_dose: Some(Cow::Borrowed("2.5 mg twice daily")),
        renal_cutoff_ml_min: 15,
        upper_crcl_ml_min: None,
        reduction_criteria: ReductionCriteria {
            description: Cow::Borrowed(
                "2 of: age ≥ 80, weight ≤ 60 kg, creatinine ≥ 1.5 mg/dL; or CrCl 15-29 mL/min",
            ),
            renal_band: Some(RenalBand::new(15, 29)),
            age_at_least: Some(80),
            weight_at_most_kg: Some(dec!(60)),
            creatinine_at_least: Some(dec!(1.5)),
            min_patient_factors: 2,
        },
        avoid_in_cirrhosis: false,
    },
    DosageScheme {
        drug: DoacDrug::Edoxaban,
        standard_dose: Cow::Borrowed("60 mg once daily"),
        reduced_dose: Cow::Borrowed("30 mg once daily"),
        loading_dose: None,
        prevention_dose: None,
        renal_cutoff_ml_min: 15,
        upper_crcl_ml_min: Some(95),
        reduction_criteria: ReductionCriteria {
            description: Cow::Borrowed("CrCl 15-50 mL/min or weight ≤ 60 kg"),
            renal_band: Some(RenalBand::new(15, 50)),
            age_at_least: None,
            weight_at_most_kg: Some(dec!(60)),
            creatinine_at_least: None,
            min_patient_factors: 1,
        },
        avoid_in_cirrhosis: false,
    },
];

/// One scheme per [`DoacDrug`], in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DosageSchemeTable {
    schemes: [DosageScheme; 4],
}

impl Default for DosageSchemeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DosageSchemeTable {
    /// Labelled regimens
    pub fn standard() -> Self {
        Self {
            schemes: STANDARD_SCHEMES,
        }
    }

    /// Build a table from one scheme per drug, in any order
    ///
    /// # Errors
    /// [`DoacError::SchemeTable`] when a drug is missing or listed twice.
    pub fn from_schemes(schemes: Vec<DosageScheme>) -> Result<Self, DoacError> {
        let mut slots: [Option<DosageScheme>; 4] = Default::default();
        for scheme in schemes {
            let slot = &mut slots[scheme.drug.index()];
            if slot.is_some() {
                return Err(DoacError::SchemeTable {
                    reason: format!("{} listed more than once", scheme.drug),
                });
            }
            *slot = Some(scheme);
        }

        match slots {
            [Some(dabigatran), Some(rivaroxaban), Some(apixaban), Some(edoxaban)] => Ok(Self {
                schemes: [dabigatran, rivaroxaban, apixaban, edoxaban],
            }),
            slots => {
                let missing: Vec<String> = DoacDrug::ALL
                    .iter()
                    .zip(slots.iter())
                    .filter(|(_, slot)| slot.is_none())
                    .map(|(drug, _)| drug.to_string())
                    .collect();
                Err(DoacError::SchemeTable {
                    reason: format!("missing scheme for {}", missing.join(", ")),
                })
            }
        }
    }

    /// Parse a JSON array of schemes
    pub fn from_json(json: &str) -> Result<Self, DoacError> {
        let schemes: Vec<DosageScheme> = serde_json::from_str(json)?;
        let table = Self::from_schemes(schemes)?;
        tracing::debug!("loaded DOAC scheme table from JSON");
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, DoacError> {
        Ok(serde_json::to_string_pretty(&self.schemes)?)
    }

    pub fn get(&self, drug: DoacDrug) -> &DosageScheme {
        &self.schemes[drug.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DosageScheme> {
        self.schemes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_keyed_by_drug() {
        let table = DosageSchemeTable::standard();
        for drug in DoacDrug::ALL {
            assert_eq!(table.get(drug).drug, drug);
        }
        assert_eq!(table.get(DoacDrug::Dabigatran).renal_cutoff_ml_min, 30);
        assert!(table.get(DoacDrug::Rivaroxaban).avoid_in_cirrhosis);
        assert_eq!(table.get(DoacDrug::Edoxaban).upper_crcl_ml_min, Some(95));
    }

    #[test]
    fn test_json_round_trip() {
        let table = DosageSchemeTable::standard();
        let json = table.to_json().unwrap();
        assert_eq!(DosageSchemeTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"[
            {"drug": "Dabigatran", "standard_dose": "150 mg", "reduced_dose": "110 mg",
             "renal_cutoff_ml_min": 30,
             "reduction_criteria": {"description": "age", "age_at_least": 75}},
            {"drug": "Rivaroxaban", "standard_dose": "20 mg", "reduced_dose": "15 mg",
             "renal_cutoff_ml_min": 15,
             "reduction_criteria": {"description": "renal", "renal_band": {"min": 15, "max": 49}}},
            {"drug": "Apixaban", "standard_dose": "5 mg", "reduced_dose": "2.5 mg",
             "renal_cutoff_ml_min": 15,
             "reduction_criteria": {"description": "none"}},
            {"drug": "Edoxaban", "standard_dose": "60 mg", "reduced_dose": "30 mg",
             "renal_cutoff_ml_min": 15,
             "reduction_criteria": {"description": "none"}}
        ]"#;
        let table = DosageSchemeTable::from_json(json).unwrap();
        let dabigatran = table.get(DoacDrug::Dabigatran);
        assert_eq!(dabigatran.reduction_criteria.age_at_least, Some(75));
        assert_eq!(dabigatran.reduction_criteria.min_patient_factors, 1);
        assert!(!table.get(DoacDrug::Rivaroxaban).avoid_in_cirrhosis);
        assert!(table.get(DoacDrug::Apixaban).loading_dose.is_none());
    }

    #[test]
    fn test_incomplete_table_is_rejected() {
        let mut schemes = STANDARD_SCHEMES.to_vec();
        schemes.remove(1);
        let err = DosageSchemeTable::from_schemes(schemes).unwrap_err();
        assert!(err.to_string().contains("missing scheme for Rivaroxaban"));

        let mut schemes = STANDARD_SCHEMES.to_vec();
        schemes.push(STANDARD_SCHEMES[0].clone());
        let err = DosageSchemeTable::from_schemes(schemes).unwrap_err();
        assert!(err.to_string().contains("Dabigatran listed more than once"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            DosageSchemeTable::from_json("{not json"),
            Err(DoacError::Json(_))
        ));
    }
}
