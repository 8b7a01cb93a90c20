//! INR observations and the validated history they form
//!
//! [`InrHistory`] is the single entry point for every INR-based calculation in
//! the crate. It enforces the chronological precondition once, at construction,
//! so that interpolation and TTR never have to sort or re-validate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::inr_error::InrError;

// ============================================================================
// Therapy phase
// ============================================================================

/// Phase of vitamin-K antagonist therapy at the time of an INR check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TherapyPhase {
    /// First weeks of therapy, dose still being titrated
    Induction,
    /// Stable dose, routine monitoring
    #[default]
    Maintenance,
    /// First checks after a dose change
    PostAdjustment,
}

impl fmt::Display for TherapyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TherapyPhase::Induction => write!(f, "induction"),
            TherapyPhase::Maintenance => write!(f, "maintenance"),
            TherapyPhase::PostAdjustment => write!(f, "post-adjustment"),
        }
    }
}

// ============================================================================
// Therapeutic range
// ============================================================================

/// Target INR interval `[min, max]`
///
/// Invariant: `0 < min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapeuticRange {
    min: Decimal,
    max: Decimal,
}

impl TherapeuticRange {
    /// Create a range, rejecting non-positive or inverted bounds
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, InrError> {
        if min <= Decimal::ZERO || max <= Decimal::ZERO || min >= max {
            return Err(InrError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Standard target 2.0 – 3.0 (atrial fibrillation, VTE)
    pub fn standard() -> Self {
        Self {
            min: dec!(2.0),
            max: dec!(3.0),
        }
    }

    /// Mechanical heart valve target 2.5 – 3.5
    pub fn mechanical_valve() -> Self {
        Self {
            min: dec!(2.5),
            max: dec!(3.5),
        }
    }

    /// Lower bound
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Midpoint of the range
    pub fn midpoint(&self) -> Decimal {
        (self.min + self.max) / dec!(2)
    }

    /// Whether `inr` lies inside the closed interval
    pub fn contains(&self, inr: Decimal) -> bool {
        inr >= self.min && inr <= self.max
    }

    /// Classify a value against the range
    pub fn position(&self, inr: Decimal) -> RangePosition {
        if inr < self.min {
            RangePosition::Below
        } else if inr > self.max {
            RangePosition::Above
        } else {
            RangePosition::Within
        }
    }
}

impl Default for TherapeuticRange {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for TherapeuticRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

/// Where a value falls relative to a [`TherapeuticRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePosition {
    Below,
    Within,
    Above,
}

// ============================================================================
// Observation
// ============================================================================

/// A single INR check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InrObservation {
    date: NaiveDate,
    inr: Decimal,
    weekly_dose_mg: Decimal,
    phase: TherapyPhase,
    compliant: bool,
    notes: Option<String>,
}

impl InrObservation {
    /// Create an observation in maintenance phase with confirmed compliance
    ///
    /// The INR is stored with two decimals.
    pub fn new(date: NaiveDate, inr: Decimal, weekly_dose_mg: Decimal) -> Self {
        Self {
            date,
            inr: inr.round_dp(2),
            weekly_dose_mg,
            phase: TherapyPhase::Maintenance,
            compliant: true,
            notes: None,
        }
    }

    pub fn with_phase(mut self, phase: TherapyPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_compliance(mut self, compliant: bool) -> Self {
        self.compliant = compliant;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn inr(&self) -> Decimal {
        self.inr
    }

    pub fn weekly_dose_mg(&self) -> Decimal {
        self.weekly_dose_mg
    }

    pub fn phase(&self) -> TherapyPhase {
        self.phase
    }

    pub fn is_compliant(&self) -> bool {
        self.compliant
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

// ============================================================================
// History
// ============================================================================

/// A chronologically ordered sequence of INR observations
///
/// Dates must be non-decreasing. Several observations on the same date are
/// kept as given; they are not merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<InrObservation>", into = "Vec<InrObservation>")]
pub struct InrHistory {
    observations: Vec<InrObservation>,
}

impl InrHistory {
    /// Validate and wrap a sequence of observations
    ///
    /// # Errors
    /// - [`InrError::NonPositiveInr`] if an INR is zero or negative
    /// - [`InrError::UnsortedObservations`] if a date precedes its predecessor
    pub fn new(observations: Vec<InrObservation>) -> Result<Self, InrError> {
        for (index, obs) in observations.iter().enumerate() {
            if obs.inr <= Decimal::ZERO {
                return Err(InrError::NonPositiveInr {
                    index,
                    value: obs.inr,
                });
            }
            if index > 0 && obs.date < observations[index - 1].date {
                return Err(InrError::UnsortedObservations {
                    index,
                    previous: observations[index - 1].date,
                    date: obs.date,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Empty history
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> &[InrObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&InrObservation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&InrObservation> {
        self.observations.last()
    }

    /// Observations whose date lies in `[start, end]`
    ///
    /// The result preserves ordering, so it is itself a valid history.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> InrHistory {
        InrHistory {
            observations: self
                .observations
                .iter()
                .filter(|o| o.date >= start && o.date <= end)
                .cloned()
                .collect(),
        }
    }

    /// INR values in chronological order
    pub fn values(&self) -> Vec<Decimal> {
        self.observations.iter().map(|o| o.inr).collect()
    }
}

impl TryFrom<Vec<InrObservation>> for InrHistory {
    type Error = InrError;

    fn try_from(observations: Vec<InrObservation>) -> Result<Self, Self::Error> {
        InrHistory::new(observations)
    }
}

impl From<InrHistory> for Vec<InrObservation> {
    fn from(history: InrHistory) -> Self {
        history.observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(TherapeuticRange::new(dec!(3.0), dec!(2.0)).is_err());
        assert!(TherapeuticRange::new(dec!(2.0), dec!(2.0)).is_err());
        assert!(TherapeuticRange::new(dec!(0), dec!(2.0)).is_err());
        assert!(TherapeuticRange::new(dec!(2.0), dec!(3.0)).is_ok());
    }

    #[test]
    fn test_range_position() {
        let range = TherapeuticRange::standard();
        assert_eq!(range.position(dec!(1.99)), RangePosition::Below);
        assert_eq!(range.position(dec!(2.0)), RangePosition::Within);
        assert_eq!(range.position(dec!(3.0)), RangePosition::Within);
        assert_eq!(range.position(dec!(3.01)), RangePosition::Above);
        assert_eq!(range.midpoint(), dec!(2.5));
    }

    #[test]
    fn test_history_accepts_duplicate_dates() {
        let history = InrHistory::new(vec![
            InrObservation::new(day(1), dec!(2.0), dec!(35)),
            InrObservation::new(day(1), dec!(2.4), dec!(35)),
            InrObservation::new(day(5), dec!(2.6), dec!(35)),
        ])
        .unwrap();
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_history_rejects_unsorted() {
        let err = InrHistory::new(vec![
            InrObservation::new(day(5), dec!(2.0), dec!(35)),
            InrObservation::new(day(1), dec!(2.4), dec!(35)),
        ])
        .unwrap_err();
        assert!(matches!(err, InrError::UnsortedObservations { index: 1, .. }));
    }

    #[test]
    fn test_history_rejects_non_positive_inr() {
        let err = InrHistory::new(vec![InrObservation::new(day(1), dec!(0), dec!(35))]).unwrap_err();
        assert!(matches!(err, InrError::NonPositiveInr { index: 0, .. }));
    }

    #[test]
    fn test_observation_rounds_inr() {
        let obs = InrObservation::new(day(1), dec!(2.456), dec!(35));
        assert_eq!(obs.inr(), dec!(2.46));
    }

    #[test]
    fn test_history_deserialize_validates() {
        let json = r#"[
            {"date":"2024-01-05","inr":"2.0","weekly_dose_mg":"35","phase":"Maintenance","compliant":true,"notes":null},
            {"date":"2024-01-01","inr":"2.5","weekly_dose_mg":"35","phase":"Maintenance","compliant":true,"notes":null}
        ]"#;
        let parsed: Result<InrHistory, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
