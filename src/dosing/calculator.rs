//! Warfarin dosage calculator

use serde::{Deserialize, Serialize};

use super::error::DosageError;
use super::guideline::{DosageGuideline, Guideline};
use super::types::{DosageInput, DosageOptions, DosageSuggestion};
use crate::data::{InrHistory, TherapeuticRange};

/// Dose adjustment under a selected guideline
///
/// ```rust,ignore
/// let calculator = WarfarinDosageCalculator::new(Guideline::Fcsa);
/// let suggestion = calculator.calculate(&DosageInput::new(dec!(1.6), dec!(35)))?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarfarinDosageCalculator {
    guideline: Guideline,
    options: DosageOptions,
}

impl WarfarinDosageCalculator {
    pub fn new(guideline: Guideline) -> Self {
        Self {
            guideline,
            options: DosageOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DosageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn guideline(&self) -> Guideline {
        self.guideline
    }

    pub fn options(&self) -> &DosageOptions {
        &self.options
    }

    pub fn rules(&self) -> &'static dyn DosageGuideline {
        self.guideline.rules()
    }

    /// Suggest a new weekly dose for `input`
    pub fn calculate(&self, input: &DosageInput) -> Result<DosageSuggestion, DosageError> {
        self.rules().suggest(input, &self.options)
    }

    /// Suggest a dose from the most recent check of `history`
    ///
    /// # Errors
    /// [`DosageError::InvalidArgument`] on an empty history.
    pub fn calculate_latest(
        &self,
        history: &InrHistory,
        range: TherapeuticRange,
    ) -> Result<DosageSuggestion, DosageError> {
        let latest = history.last().ok_or_else(|| DosageError::InvalidArgument {
            param: "history".to_string(),
            value: "empty".to_string(),
        })?;
        let input = DosageInput::from_observation(latest, range, &self.options);
        self.calculate(&input)
    }
}
