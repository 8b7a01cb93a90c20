use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::data::*;

/// Fluent construction of an [`InrHistory`]
///
/// ```rust,ignore
/// let history = InrHistory::builder()
///     .observation(jan(1), dec!(2.0), dec!(35))
///     .observation(jan(11), dec!(3.0), dec!(35))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InrHistoryBuilder {
    observations: Vec<InrObservation>,
    phase: TherapyPhase,
}

impl InrHistory {
    pub fn builder() -> InrHistoryBuilder {
        InrHistoryBuilder::default()
    }
}

impl InrHistoryBuilder {
    /// Phase applied to the observations added after this call
    pub fn phase(mut self, phase: TherapyPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn event(mut self, observation: InrObservation) -> Self {
        self.observations.push(observation);
        self
    }

    pub fn observation(self, date: NaiveDate, inr: Decimal, weekly_dose_mg: Decimal) -> Self {
        let phase = self.phase;
        self.event(InrObservation::new(date, inr, weekly_dose_mg).with_phase(phase))
    }

    /// Observation at which the patient reported missed doses
    pub fn missed_doses(self, date: NaiveDate, inr: Decimal, weekly_dose_mg: Decimal) -> Self {
        let phase = self.phase;
        self.event(
            InrObservation::new(date, inr, weekly_dose_mg)
                .with_phase(phase)
                .with_compliance(false),
        )
    }

    /// Repeat the last observation's INR and dose `n` times, `every_days` apart
    ///
    /// Does nothing on an empty builder.
    pub fn repeat(mut self, n: usize, every_days: u64) -> Self {
        let Some(last) = self.observations.last().cloned() else {
            return self;
        };
        for i in 1..=n as u64 {
            let Some(date) = last
                .date()
                .checked_add_days(chrono::Days::new(every_days * i))
            else {
                break;
            };
            self.observations.push(
                InrObservation::new(date, last.inr(), last.weekly_dose_mg())
                    .with_phase(last.phase())
                    .with_compliance(last.is_compliant()),
            );
        }
        self
    }

    pub fn build(self) -> Result<InrHistory, InrError> {
        InrHistory::new(self.observations)
    }
}
