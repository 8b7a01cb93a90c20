//! Renal function estimation

use rust_decimal::prelude::{RoundingStrategy, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::data::{DoacMonitoringRecord, Gender, Patient};

/// Correction factor applied to the Cockcroft-Gault estimate for women
pub const FEMALE_FACTOR: Decimal = dec!(0.85);

/// Creatinine clearance by Cockcroft-Gault, mL/min
///
/// `((140 - age) × weight) / (72 × creatinine)`, times 0.85 for women, rounded
/// half-to-even to a whole mL/min. Returns `None` when weight or creatinine is
/// missing or not positive, or when the inputs are too large to compute. Ages
/// above 140 give 0.
///
/// ```rust,ignore
/// assert_eq!(cockcroft_gault(60, Some(dec!(70)), Some(dec!(1.0)), Gender::Male), Some(78));
/// ```
pub fn cockcroft_gault(
    age: u32,
    weight_kg: Option<Decimal>,
    creatinine_mg_dl: Option<Decimal>,
    gender: Gender,
) -> Option<u32> {
    let weight = weight_kg.filter(|w| *w > Decimal::ZERO)?;
    let creatinine = creatinine_mg_dl.filter(|c| *c > Decimal::ZERO)?;

    let mut crcl = (Decimal::from(140) - Decimal::from(age))
        .checked_mul(weight)?
        .checked_div(dec!(72).checked_mul(creatinine)?)?;
    if gender == Gender::Female {
        crcl = crcl.checked_mul(FEMALE_FACTOR)?;
    }

    crcl.max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_u32()
}

/// Clearance for a monitoring visit
///
/// Weight and creatinine measured at the visit take precedence over the
/// patient's stored values.
pub fn creatinine_clearance(record: &DoacMonitoringRecord, patient: &Patient) -> Option<u32> {
    let weight = record.labs.weight_kg.or(patient.weight_kg);
    let creatinine = record.labs.creatinine.or(patient.serum_creatinine);
    let crcl = cockcroft_gault(patient.age, weight, creatinine, patient.gender);
    if crcl.is_none() {
        tracing::debug!(
            has_weight = weight.is_some(),
            has_creatinine = creatinine.is_some(),
            "creatinine clearance unavailable"
        );
    }
    crcl
}
