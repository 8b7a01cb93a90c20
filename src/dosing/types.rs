//! Warfarin dosing types: inputs, options, suggestions and schedules

use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::{InrObservation, TherapeuticRange, TherapyPhase, ThromboembolicRisk};
use crate::distribution::{HALF_TABLET_STEP, QUARTER_TABLET_STEP};

use super::guideline::Guideline;

// ============================================================================
// Configuration Types
// ============================================================================

/// Dosing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageOptions {
    /// Smallest dispensable dose change in mg (default: 1.25, a quarter tablet)
    pub step_mg: Decimal,

    /// Weekly dose below which a patient is treated as a slow metabolizer
    /// (default: 15 mg/week)
    pub slow_metabolizer_threshold_mg: Decimal,
}

impl Default for DosageOptions {
    fn default() -> Self {
        Self {
            step_mg: QUARTER_TABLET_STEP,
            slow_metabolizer_threshold_mg: dec!(15),
        }
    }
}

impl DosageOptions {
    /// Half-tablet steps, for patients who cannot split tablets into quarters
    pub fn half_tablets() -> Self {
        Self {
            step_mg: HALF_TABLET_STEP,
            ..Default::default()
        }
    }

    pub fn with_step(mut self, step_mg: Decimal) -> Self {
        self.step_mg = step_mg;
        self
    }

    pub fn with_slow_metabolizer_threshold(mut self, threshold_mg: Decimal) -> Self {
        self.slow_metabolizer_threshold_mg = threshold_mg;
        self
    }

    /// Whether a stable weekly dose indicates slow metabolism
    pub fn is_slow_metabolizer(&self, weekly_dose_mg: Decimal) -> bool {
        weekly_dose_mg < self.slow_metabolizer_threshold_mg
    }
}

// ============================================================================
// Input
// ============================================================================

/// Everything the dose adjustment looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageInput {
    pub current_inr: Decimal,
    pub range: TherapeuticRange,
    /// Current weekly dose, mg
    pub current_weekly_dose: Decimal,
    pub phase: TherapyPhase,
    pub compliant: bool,
    pub slow_metabolizer: bool,
    pub thromboembolic_risk: Option<ThromboembolicRisk>,
}

impl DosageInput {
    /// Maintenance-phase input against the standard range
    pub fn new(current_inr: Decimal, current_weekly_dose: Decimal) -> Self {
        Self {
            current_inr,
            range: TherapeuticRange::standard(),
            current_weekly_dose,
            phase: TherapyPhase::Maintenance,
            compliant: true,
            slow_metabolizer: false,
            thromboembolic_risk: None,
        }
    }

    /// Input taken from the latest INR check
    ///
    /// Phase, compliance and dose come from the observation; the slow
    /// metabolizer flag from the dose and `options`.
    pub fn from_observation(
        observation: &InrObservation,
        range: TherapeuticRange,
        options: &DosageOptions,
    ) -> Self {
        Self {
            current_inr: observation.inr(),
            range,
            current_weekly_dose: observation.weekly_dose_mg(),
            phase: observation.phase(),
            compliant: observation.is_compliant(),
            slow_metabolizer: options.is_slow_metabolizer(observation.weekly_dose_mg()),
            thromboembolic_risk: None,
        }
    }

    pub fn with_range(mut self, range: TherapeuticRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_phase(mut self, phase: TherapyPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_compliance(mut self, compliant: bool) -> Self {
        self.compliant = compliant;
        self
    }

    pub fn with_slow_metabolizer(mut self, slow: bool) -> Self {
        self.slow_metabolizer = slow;
        self
    }

    pub fn with_thromboembolic_risk(mut self, risk: ThromboembolicRisk) -> Self {
        self.thromboembolic_risk = Some(risk);
        self
    }
}

// ============================================================================
// Bands and actions
// ============================================================================

/// Position of an INR value relative to the target, in deviation bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InrBand {
    SevereBelow,
    ModerateBelow,
    MildBelow,
    InRange,
    MildAbove,
    ModerateAbove,
    SevereAbove,
}

impl InrBand {
    pub(crate) const fn index(self) -> usize {
        match self {
            InrBand::SevereBelow => 0,
            InrBand::ModerateBelow => 1,
            InrBand::MildBelow => 2,
            InrBand::InRange => 3,
            InrBand::MildAbove => 4,
            InrBand::ModerateAbove => 5,
            InrBand::SevereAbove => 6,
        }
    }

    pub fn is_below(self) -> bool {
        matches!(
            self,
            InrBand::SevereBelow | InrBand::ModerateBelow | InrBand::MildBelow
        )
    }

    pub fn is_above(self) -> bool {
        matches!(
            self,
            InrBand::MildAbove | InrBand::ModerateAbove | InrBand::SevereAbove
        )
    }

    pub fn urgency(self) -> Urgency {
        match self {
            InrBand::SevereAbove => Urgency::Critical,
            InrBand::ModerateAbove | InrBand::SevereBelow => Urgency::Urgent,
            _ => Urgency::Routine,
        }
    }
}

impl fmt::Display for InrBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InrBand::SevereBelow => "severely below range",
            InrBand::ModerateBelow => "moderately below range",
            InrBand::MildBelow => "slightly below range",
            InrBand::InRange => "in range",
            InrBand::MildAbove => "slightly above range",
            InrBand::ModerateAbove => "moderately above range",
            InrBand::SevereAbove => "severely above range",
        };
        write!(f, "{}", label)
    }
}

/// How soon the suggestion must be acted upon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Routine,
    Urgent,
    Critical,
}

/// Administration route for vitamin K
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitaminKRoute {
    Oral,
    Intravenous,
}

impl fmt::Display for VitaminKRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitaminKRoute::Oral => write!(f, "oral"),
            VitaminKRoute::Intravenous => write!(f, "intravenous"),
        }
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// Dose for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDose {
    pub day: Weekday,
    pub dose_mg: Decimal,
    /// Human description, e.g. "1 tablet"
    pub description: String,
}

/// Seven daily doses, Monday first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDoseSchedule {
    pub total_weekly_dose: Decimal,
    pub days: Vec<DailyDose>,
}

impl WeeklyDoseSchedule {
    /// Tolerance used by [`WeeklyDoseSchedule::is_valid`]
    pub const SUM_TOLERANCE: Decimal = dec!(0.01);

    pub fn dose_for(&self, day: Weekday) -> Option<Decimal> {
        self.days.iter().find(|d| d.day == day).map(|d| d.dose_mg)
    }

    pub fn description_for(&self, day: Weekday) -> Option<&str> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.description.as_str())
    }

    /// Sum of the daily doses
    pub fn sum(&self) -> Decimal {
        self.days.iter().map(|d| d.dose_mg).sum()
    }

    /// Seven distinct days whose doses add up to the weekly total
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; 7];
        for d in &self.days {
            let i = d.day.num_days_from_monday() as usize;
            if seen[i] {
                return false;
            }
            seen[i] = true;
        }
        self.days.len() == 7 && (self.sum() - self.total_weekly_dose).abs() <= Self::SUM_TOLERANCE
    }
}

impl fmt::Display for WeeklyDoseSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weekly dose: {} mg", self.total_weekly_dose.normalize())?;
        for d in &self.days {
            writeln!(
                f,
                "  {}: {:>6} mg  {}",
                d.day,
                d.dose_mg.normalize(),
                d.description
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of a warfarin dose adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageSuggestion {
    pub guideline: Guideline,
    pub band: InrBand,
    pub urgency: Urgency,
    /// Change applied to the weekly dose, percent (negative = reduction)
    pub adjustment_pct: Decimal,
    /// New weekly dose, rounded to the dosing step
    pub suggested_weekly_dose: Decimal,
    pub next_control_days: u32,
    /// One-time extra dose for sub-therapeutic INR
    pub loading_dose_action: Option<String>,
    pub requires_vitamin_k: bool,
    pub vitamin_k_dose_mg: Option<Decimal>,
    pub vitamin_k_route: Option<VitaminKRoute>,
    /// Low-molecular-weight heparin bridging
    pub requires_ebpm: bool,
    pub warnings: Vec<String>,
    pub clinical_notes: String,
    pub weekly_schedule: WeeklyDoseSchedule,
}

impl DosageSuggestion {
    pub fn dose_changed(&self) -> bool {
        !self.adjustment_pct.is_zero()
    }
}

impl fmt::Display for DosageSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({:?})", self.guideline, self.urgency)?;
        writeln!(f, "{}", self.clinical_notes)?;
        for w in &self.warnings {
            writeln!(f, "  ! {}", w)?;
        }
        write!(f, "{}", self.weekly_schedule)
    }
}
