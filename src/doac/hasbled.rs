//! HAS-BLED bleeding risk score

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::Patient;

/// Age above which the "elderly" point is given
pub const ELDERLY_AGE: u32 = 65;

/// CrCl below which renal function counts as abnormal, mL/min
pub const ABNORMAL_RENAL_CRCL: u32 = 30;

/// Bleeding risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HasBledRisk {
    /// Score 0-1
    Low,
    /// Score 2
    Moderate,
    /// Score 3 or more
    High,
}

impl HasBledRisk {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => HasBledRisk::Low,
            2 => HasBledRisk::Moderate,
            _ => HasBledRisk::High,
        }
    }
}

impl fmt::Display for HasBledRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HasBledRisk::Low => write!(f, "low"),
            HasBledRisk::Moderate => write!(f, "moderate"),
            HasBledRisk::High => write!(f, "high"),
        }
    }
}

/// One letter of HAS-BLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HasBledFactor {
    Hypertension,
    AbnormalRenalFunction,
    AbnormalLiverFunction,
    Stroke,
    Bleeding,
    /// Not scored under DOAC therapy
    LabileInr,
    Elderly,
    Drugs,
    Alcohol,
}

impl fmt::Display for HasBledFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HasBledFactor::Hypertension => "hypertension",
            HasBledFactor::AbnormalRenalFunction => "abnormal renal function",
            HasBledFactor::AbnormalLiverFunction => "abnormal liver function",
            HasBledFactor::Stroke => "prior stroke",
            HasBledFactor::Bleeding => "prior bleeding",
            HasBledFactor::LabileInr => "labile INR",
            HasBledFactor::Elderly => "age over 65",
            HasBledFactor::Drugs => "antiplatelet or NSAID use",
            HasBledFactor::Alcohol => "alcohol abuse",
        };
        write!(f, "{}", label)
    }
}

/// A scored factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasBledComponent {
    pub factor: HasBledFactor,
    pub points: u8,
}

/// HAS-BLED score (0-9) with its contributing factors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasBledScore {
    pub score: u8,
    pub risk: HasBledRisk,
    pub components: Vec<HasBledComponent>,
}

impl HasBledScore {
    pub fn is_high(&self) -> bool {
        self.risk == HasBledRisk::High
    }

    pub fn contributes(&self, factor: HasBledFactor) -> bool {
        self.components.iter().any(|c| c.factor == factor)
    }
}

impl fmt::Display for HasBledScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAS-BLED {} ({} risk)", self.score, self.risk)?;
        if !self.components.is_empty() {
            let factors: Vec<String> = self
                .components
                .iter()
                .map(|c| format!("{} +{}", c.factor, c.points))
                .collect();
            write!(f, ": {}", factors.join(", "))?;
        }
        Ok(())
    }
}

/// Score bleeding risk for a DOAC patient
///
/// Cirrhosis scores 2 and takes precedence over hepatic dysfunction or portal
/// hypertension (1). Labile INR has no meaning under DOAC therapy and always
/// scores 0. Renal function counts only when `crcl` is known.
pub fn has_bled(patient: &Patient, crcl: Option<u32>) -> HasBledScore {
    let mut components = Vec::new();
    let mut add = |factor, points| components.push(HasBledComponent { factor, points });

    if patient.hypertension {
        add(HasBledFactor::Hypertension, 1);
    }
    if crcl.is_some_and(|c| c < ABNORMAL_RENAL_CRCL) {
        add(HasBledFactor::AbnormalRenalFunction, 1);
    }
    if patient.cirrhosis {
        add(HasBledFactor::AbnormalLiverFunction, 2);
    } else if patient.hepatic_dysfunction || patient.portal_hypertension {
        add(HasBledFactor::AbnormalLiverFunction, 1);
    }
    if patient.stroke_history {
        add(HasBledFactor::Stroke, 1);
    }
    if patient.bleeding_history {
        add(HasBledFactor::Bleeding, 1);
    }
    if patient.age > ELDERLY_AGE {
        add(HasBledFactor::Elderly, 1);
    }
    if patient.on_interacting_drugs() {
        add(HasBledFactor::Drugs, 1);
    }
    if patient.alcohol_abuse {
        add(HasBledFactor::Alcohol, 1);
    }

    let score = components.iter().map(|c| c.points).sum();
    HasBledScore {
        score,
        risk: HasBledRisk::from_score(score),
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Gender;

    #[test]
    fn test_no_factors_is_low() {
        let score = has_bled(&Patient::new(50, Gender::Male), Some(90));
        assert_eq!(score.score, 0);
        assert_eq!(score.risk, HasBledRisk::Low);
        assert!(score.components.is_empty());
    }

    #[test]
    fn test_three_factors_is_high() {
        let patient = Patient {
            hypertension: true,
            stroke_history: true,
            ..Patient::new(70, Gender::Female)
        };
        let score = has_bled(&patient, Some(60));
        assert_eq!(score.score, 3);
        assert_eq!(score.risk, HasBledRisk::High);
        assert!(score.contributes(HasBledFactor::Elderly));
        assert!(!score.contributes(HasBledFactor::LabileInr));
    }

    #[test]
    fn test_cirrhosis_dominates_liver_points() {
        let patient = Patient {
            cirrhosis: true,
            hepatic_dysfunction: true,
            portal_hypertension: true,
            ..Patient::new(50, Gender::Male)
        };
        let score = has_bled(&patient, None);
        assert_eq!(score.score, 2);
        assert_eq!(score.risk, HasBledRisk::Moderate);
        assert_eq!(score.components.len(), 1);

        let patient = Patient {
            portal_hypertension: true,
            ..Patient::new(50, Gender::Male)
        };
        assert_eq!(has_bled(&patient, None).score, 1);
    }

    #[test]
    fn test_renal_point_needs_known_crcl() {
        let patient = Patient::new(50, Gender::Male);
        assert_eq!(has_bled(&patient, Some(29)).score, 1);
        assert_eq!(has_bled(&patient, Some(30)).score, 0);
        assert_eq!(has_bled(&patient, None).score, 0);
    }

    #[test]
    fn test_maximum_score() {
        let patient = Patient {
            hypertension: true,
            cirrhosis: true,
            stroke_history: true,
            bleeding_history: true,
            antiplatelet_use: true,
            nsaid_use: true,
            alcohol_abuse: true,
            ..Patient::new(80, Gender::Male)
        };
        let score = has_bled(&patient, Some(20));
        // labile INR is never scored, so 8 is the DOAC maximum
        assert_eq!(score.score, 8);
        assert_eq!(
            score.to_string(),
            "HAS-BLED 8 (high risk): hypertension +1, abnormal renal function +1, \
             abnormal liver function +2, prior stroke +1, prior bleeding +1, \
             age over 65 +1, antiplatelet or NSAID use +1, alcohol abuse +1"
        );
    }
}
