//! Guideline rule tables and the shared band-evaluation skeleton
//!
//! FCSA (Italian Federation of Anticoagulation Clinics) and ACCP (American
//! College of Chest Physicians) agree on the shape of warfarin management and
//! differ on thresholds and percentages. Each guideline is one [`GuidelineTable`]
//! constant; [`DosageGuideline::suggest`] is the skeleton both run through.

use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::DosageError;
use super::schedule::generate_weekly_schedule_with_step;
use super::types::*;
use crate::data::{TherapeuticRange, TherapyPhase, ThromboembolicRisk};
use crate::distribution::describe_tablets;

// ============================================================================
// Tables
// ============================================================================

/// Guideline selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guideline {
    #[default]
    Fcsa,
    Accp,
}

impl Guideline {
    /// Rules for this guideline
    pub fn rules(self) -> &'static dyn DosageGuideline {
        match self {
            Guideline::Fcsa => &Fcsa,
            Guideline::Accp => &Accp,
        }
    }
}

impl fmt::Display for Guideline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guideline::Fcsa => write!(f, "FCSA"),
            Guideline::Accp => write!(f, "ACCP"),
        }
    }
}

/// Vitamin K prescription attached to a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitaminK {
    pub dose_mg: Decimal,
    pub route: VitaminKRoute,
}

/// What to do when the INR falls in a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRule {
    /// Weekly dose change, percent
    pub adjustment_pct: Decimal,
    /// Days to the next INR check (unused for the in-range band)
    pub control_days: u32,
    /// Multiple of the average daily dose to take once today
    pub loading_factor: Option<Decimal>,
    /// Doses to withhold before resuming
    pub withhold_doses: u8,
    pub vitamin_k: Option<VitaminK>,
    /// Heparin bridging when thromboembolic risk is high
    pub ebpm_if_high_risk: bool,
}

impl BandRule {
    const fn adjust(adjustment_pct: Decimal, control_days: u32) -> Self {
        Self {
            adjustment_pct,
            control_days,
            loading_factor: None,
            withhold_doses: 0,
            vitamin_k: None,
            ebpm_if_high_risk: false,
        }
    }

    const fn loading(mut self, factor: Decimal) -> Self {
        self.loading_factor = Some(factor);
        self
    }

    const fn withhold(mut self, doses: u8) -> Self {
        self.withhold_doses = doses;
        self
    }

    const fn bridging(mut self) -> Self {
        self.ebpm_if_high_risk = true;
        self
    }

    const fn vitamin_k(mut self, dose_mg: Decimal, route: VitaminKRoute) -> Self {
        self.vitamin_k = Some(VitaminK { dose_mg, route });
        self
    }
}

/// In-range follow-up interval per therapy phase, days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseIntervals {
    pub induction: u32,
    pub post_adjustment: u32,
    pub maintenance: u32,
}

impl PhaseIntervals {
    pub fn days(&self, phase: TherapyPhase) -> u32 {
        match phase {
            TherapyPhase::Induction => self.induction,
            TherapyPhase::PostAdjustment => self.post_adjustment,
            TherapyPhase::Maintenance => self.maintenance,
        }
    }
}

/// Thresholds and band rules of one guideline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidelineTable {
    pub guideline: Guideline,
    /// INR below `min - severe_below_offset` is severely low
    pub severe_below_offset: Decimal,
    /// INR at or below `min - moderate_below_offset` is moderately low
    pub moderate_below_offset: Decimal,
    /// Absolute INR from which the moderate-above band starts
    pub moderate_above: Decimal,
    /// Absolute INR from which the severe-above band starts (vitamin K)
    pub severe_above: Decimal,
    /// Rules indexed by [`InrBand`] order
    pub rules: [BandRule; 7],
    pub in_range: PhaseIntervals,
}

pub const FCSA_TABLE: GuidelineTable = GuidelineTable {
    guideline: Guideline::Fcsa,
    severe_below_offset: dec!(0.5),
    moderate_below_offset: dec!(0.3),
    moderate_above: dec!(5.0),
    severe_above: dec!(6.0),
    rules: [
        BandRule::adjust(dec!(10), 5).loading(dec!(2)).bridging(),
        BandRule::adjust(dec!(7.5), 7).loading(dec!(1.5)).bridging(),
        BandRule::adjust(dec!(5), 14).loading(dec!(1.25)),
        BandRule::adjust(dec!(0), 0),
        BandRule::adjust(dec!(-5), 14),
        BandRule::adjust(dec!(-10), 5).withhold(1),
        BandRule::adjust(dec!(-15), 1)
            .withhold(1)
            .vitamin_k(dec!(2), VitaminKRoute::Oral),
    ],
    in_range: PhaseIntervals {
        induction: 7,
        post_adjustment: 14,
        maintenance: 28,
    },
};

pub const ACCP_TABLE: GuidelineTable = GuidelineTable {
    guideline: Guideline::Accp,
    severe_below_offset: dec!(0.5),
    moderate_below_offset: dec!(0.3),
    moderate_above: dec!(4.5),
    severe_above: dec!(10.0),
    rules: [
        BandRule::adjust(dec!(15), 7).loading(dec!(1.5)).bridging(),
        BandRule::adjust(dec!(10), 7).loading(dec!(1.25)),
        BandRule::adjust(dec!(5), 14).loading(dec!(1.25)),
        BandRule::adjust(dec!(0), 0),
        BandRule::adjust(dec!(-5), 14),
        BandRule::adjust(dec!(-10), 3).withhold(1),
        BandRule::adjust(dec!(-15), 1)
            .withhold(2)
            .vitamin_k(dec!(2.5), VitaminKRoute::Oral),
    ],
    in_range: PhaseIntervals {
        induction: 7,
        post_adjustment: 14,
        maintenance: 42,
    },
};

// ============================================================================
// Trait
// ============================================================================

/// A warfarin management guideline
///
/// Implementors only provide their table; banding and the assembly of a
/// [`DosageSuggestion`] are shared.
pub trait DosageGuideline: Send + Sync {
    fn table(&self) -> &'static GuidelineTable;

    fn guideline(&self) -> Guideline {
        self.table().guideline
    }

    /// Deviation band of `inr` against `range`
    fn classify(&self, inr: Decimal, range: &TherapeuticRange) -> InrBand {
        let t = self.table();
        let (min, max) = (range.min(), range.max());

        if inr < min - t.severe_below_offset {
            InrBand::SevereBelow
        } else if inr <= min - t.moderate_below_offset {
            InrBand::ModerateBelow
        } else if inr < min {
            InrBand::MildBelow
        } else if inr <= max {
            InrBand::InRange
        } else if inr >= t.severe_above {
            InrBand::SevereAbove
        } else if inr >= t.moderate_above {
            InrBand::ModerateAbove
        } else {
            InrBand::MildAbove
        }
    }

    fn rule(&self, band: InrBand) -> &'static BandRule {
        &self.table().rules[band.index()]
    }

    /// Compute a dose adjustment
    ///
    /// # Errors
    /// [`DosageError::InvalidArgument`] when the INR is not positive or the
    /// weekly dose is negative or too large to adjust; [`DosageError::Distribution`] when the options'
    /// step cannot split the resulting dose.
    fn suggest(
        &self,
        input: &DosageInput,
        options: &DosageOptions,
    ) -> Result<DosageSuggestion, DosageError> {
        validate(input, options)?;

        let table = self.table();
        let band = self.classify(input.current_inr, &input.range);
        let rule = self.rule(band);

        let factor = Decimal::ONE + rule.adjustment_pct / dec!(100);
        let suggested_weekly_dose = input
            .current_weekly_dose
            .checked_mul(factor)
            .and_then(|dose| round_to_step(dose, options.step_mg))
            .ok_or_else(|| weekly_dose_out_of_range(input))?
            .max(Decimal::ZERO);

        let next_control_days = if band == InrBand::InRange {
            table.in_range.days(input.phase)
        } else {
            rule.control_days
        };

        let loading_dose_action = rule
            .loading_factor
            .map(|f| {
                let daily = (input.current_weekly_dose / dec!(7))
                    .checked_mul(f)
                    .and_then(|dose| round_to_step(dose, options.step_mg))
                    .ok_or_else(|| weekly_dose_out_of_range(input))?;
                Ok::<_, DosageError>(format!(
                    "Take {} mg today ({}, {}× the usual daily dose), then follow the new weekly schedule",
                    daily.normalize(),
                    describe_tablets(daily),
                    f.normalize()
                ))
            })
            .transpose()?;

        let requires_ebpm = rule.ebpm_if_high_risk
            && input.thromboembolic_risk == Some(ThromboembolicRisk::High);

        let mut warnings = Vec::new();
        if let Some(vk) = rule.vitamin_k {
            warnings.push(format!(
                "INR {} at or above {}: give vitamin K {} mg {} and assess for bleeding",
                input.current_inr,
                table.severe_above,
                vk.dose_mg.normalize(),
                vk.route
            ));
        }
        if requires_ebpm {
            warnings.push(
                "High thromboembolic risk with markedly low INR: start LMWH bridging until INR is in range"
                    .to_string(),
            );
        }
        if input.slow_metabolizer {
            warnings.push(format!(
                "Slow metabolizer (weekly dose below {} mg): dose changes act slowly, confirm response before further adjustment",
                options.slow_metabolizer_threshold_mg.normalize()
            ));
        }
        if !input.compliant {
            warnings.push(
                "Missed or irregular intake reported: verify compliance before attributing the INR to the dose"
                    .to_string(),
            );
        }

        let weekly_schedule =
            generate_weekly_schedule_with_step(suggested_weekly_dose, options.step_mg)?;

        let mut notes = vec![
            format!(
                "{}: INR {} is {} (target {}).",
                table.guideline, input.current_inr, band, input.range
            ),
            format!(
                "Weekly dose {} mg → {} mg ({}%).",
                input.current_weekly_dose.normalize(),
                suggested_weekly_dose.normalize(),
                signed(rule.adjustment_pct)
            ),
        ];
        if rule.withhold_doses > 0 {
            notes.push(format!(
                "Withhold {} dose(s) before starting the new schedule.",
                rule.withhold_doses
            ));
        }
        notes.push(format!("Next INR check in {} days.", next_control_days));

        tracing::debug!(
            guideline = %table.guideline,
            inr = %input.current_inr,
            ?band,
            suggested = %suggested_weekly_dose,
            "warfarin dose suggestion"
        );

        Ok(DosageSuggestion {
            guideline: table.guideline,
            band,
            urgency: band.urgency(),
            adjustment_pct: rule.adjustment_pct,
            suggested_weekly_dose,
            next_control_days,
            loading_dose_action,
            requires_vitamin_k: rule.vitamin_k.is_some(),
            vitamin_k_dose_mg: rule.vitamin_k.map(|vk| vk.dose_mg),
            vitamin_k_route: rule.vitamin_k.map(|vk| vk.route),
            requires_ebpm,
            warnings,
            clinical_notes: notes.join(" "),
            weekly_schedule,
        })
    }
}

/// FCSA rules
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcsa;

impl DosageGuideline for Fcsa {
    fn table(&self) -> &'static GuidelineTable {
        &FCSA_TABLE
    }
}

/// ACCP rules
#[derive(Debug, Clone, Copy, Default)]
pub struct Accp;

impl DosageGuideline for Accp {
    fn table(&self) -> &'static GuidelineTable {
        &ACCP_TABLE
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn validate(input: &DosageInput, options: &DosageOptions) -> Result<(), DosageError> {
    if input.current_inr <= Decimal::ZERO {
        return Err(DosageError::InvalidArgument {
            param: "current_inr".to_string(),
            value: input.current_inr.to_string(),
        });
    }
    if input.current_weekly_dose < Decimal::ZERO {
        return Err(DosageError::InvalidArgument {
            param: "current_weekly_dose".to_string(),
            value: input.current_weekly_dose.to_string(),
        });
    }
    if options.step_mg <= Decimal::ZERO {
        return Err(DosageError::InvalidArgument {
            param: "step_mg".to_string(),
            value: options.step_mg.to_string(),
        });
    }
    Ok(())
}

fn weekly_dose_out_of_range(input: &DosageInput) -> DosageError {
    DosageError::InvalidArgument {
        param: "current_weekly_dose".to_string(),
        value: input.current_weekly_dose.to_string(),
    }
}

/// Nearest multiple of `step`, halves rounded up; `None` on overflow
pub(crate) fn round_to_step(value: Decimal, step: Decimal) -> Option<Decimal> {
    value
        .checked_div(step)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(step)
}

fn signed(pct: Decimal) -> String {
    if pct > Decimal::ZERO {
        format!("+{}", pct.normalize())
    } else {
        pct.normalize().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(dec!(37), dec!(1.25)), Some(dec!(37.5)));
        assert_eq!(round_to_step(dec!(36.5), dec!(1.25)), Some(dec!(36.25)));
        assert_eq!(round_to_step(dec!(36.875), dec!(1.25)), Some(dec!(37.5)));
        assert_eq!(round_to_step(dec!(33.25), dec!(2.5)), Some(dec!(32.5)));
        assert_eq!(round_to_step(Decimal::MAX, dec!(0.5)), None);
    }

    #[test]
    fn test_tables_are_distinct() {
        assert_ne!(FCSA_TABLE, ACCP_TABLE);
        assert_eq!(Guideline::Fcsa.rules().guideline(), Guideline::Fcsa);
        assert_eq!(Guideline::Accp.rules().guideline(), Guideline::Accp);
    }

    #[test]
    fn test_every_below_band_has_loading() {
        for table in [&FCSA_TABLE, &ACCP_TABLE] {
            for band in [InrBand::SevereBelow, InrBand::ModerateBelow, InrBand::MildBelow] {
                assert!(table.rules[band.index()].loading_factor.is_some());
            }
            assert!(table.rules[InrBand::SevereAbove.index()].vitamin_k.is_some());
        }
    }
}
