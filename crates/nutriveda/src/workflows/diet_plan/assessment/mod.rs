//! Prakruti questionnaire scoring.
//!
//! Scoring is a commutative fold of answered items into per-axis totals; the
//! percentage derivation refuses an all-zero vector instead of producing NaN.

mod insights;
mod questionnaire;

pub use insights::{CategoryBreakdown, PotentialImbalance};
pub use questionnaire::{
    AssessmentMode, Question, QuestionCategory, QuestionOption, Questionnaire, QuestionnaireError,
};

use serde::{Deserialize, Serialize};

use super::classification::ConstitutionProfile;
use super::domain::{AnsweredItem, DemographicProfile, DoshaAxis, PercentageVector, ScoreVector};
use super::error::EngineError;

/// Sum item weights per axis.
pub fn score(items: &[AnsweredItem]) -> Result<ScoreVector, EngineError> {
    if items.is_empty() {
        return Err(EngineError::EmptyAssessment);
    }

    let mut scores = ScoreVector::default();
    for item in items {
        scores.add(item.axis, item.weight)?;
    }
    Ok(scores)
}

/// Convert totals into shares of 100. No rounding is applied.
pub fn to_percentages(scores: &ScoreVector) -> Result<PercentageVector, EngineError> {
    let total = scores.total();
    if total == 0 {
        return Err(EngineError::DegenerateScores);
    }

    let share = |axis: DoshaAxis| f64::from(scores.get(axis)) / total as f64 * 100.0;
    Ok(PercentageVector::new(
        share(DoshaAxis::Vata),
        share(DoshaAxis::Pitta),
        share(DoshaAxis::Kapha),
    ))
}

/// Everything derived from one assessment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub scores: ScoreVector,
    pub profile: ConstitutionProfile,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub strengths: Vec<String>,
    pub imbalances: Vec<PotentialImbalance>,
    pub personality_traits: Vec<String>,
}

impl AssessmentReport {
    pub fn dominant(&self) -> DoshaAxis {
        self.profile.dominant()
    }

    pub fn imbalance_notes(&self) -> Vec<&'static str> {
        if self.imbalances.is_empty() {
            return vec!["No significant imbalances detected"];
        }
        self.imbalances
            .iter()
            .map(|imbalance| imbalance.message())
            .collect()
    }
}

/// Stateless calculator bound to one questionnaire.
pub struct AssessmentCalculator {
    questionnaire: Questionnaire,
}

impl AssessmentCalculator {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn assess(
        &self,
        items: &[AnsweredItem],
        demographics: Option<&DemographicProfile>,
    ) -> Result<AssessmentReport, EngineError> {
        let scores = score(items)?;
        let percentages = to_percentages(&scores)?;
        let profile = ConstitutionProfile::from_percentages(percentages);
        let dominant = profile.dominant();

        let category_breakdown = insights::category_breakdown(&self.questionnaire, items)?;
        let strengths = insights::strengths(&category_breakdown, dominant);
        let imbalances = insights::imbalances(&category_breakdown, demographics);

        Ok(AssessmentReport {
            scores,
            profile,
            category_breakdown,
            strengths,
            imbalances,
            personality_traits: insights::personality_traits(dominant)
                .iter()
                .map(|trait_name| trait_name.to_string())
                .collect(),
        })
    }
}
