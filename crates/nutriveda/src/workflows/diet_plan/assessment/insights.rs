use serde::{Deserialize, Serialize};

use super::super::domain::{
    ActivityLevel, AnsweredItem, DemographicProfile, DoshaAxis, ScoreVector,
};
use super::questionnaire::{QuestionCategory, Questionnaire};
use super::super::error::EngineError;

/// A category counts as a strength once the dominant axis scores above this.
const STRENGTH_THRESHOLD: u32 = 4;
/// A single axis above this within a category flags an imbalance.
const IMBALANCE_THRESHOLD: u32 = 6;
const GROWING_PHASE_BELOW_AGE: u16 = 16;
const MATURE_PHASE_ABOVE_AGE: u16 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: QuestionCategory,
    pub scores: ScoreVector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialImbalance {
    IrregularDigestion,
    StrongDigestiveFire,
    SlowDigestion,
    AnxietyTendency,
    IrritabilityTendency,
    LethargyTendency,
    GrowingPhase,
    MaturePhase,
    LowActivity,
    HighActivity,
}

impl PotentialImbalance {
    pub const fn message(self) -> &'static str {
        match self {
            Self::IrregularDigestion => "Irregular digestion - focus on regular eating schedule",
            Self::StrongDigestiveFire => "Strong digestive fire - avoid skipping meals",
            Self::SlowDigestion => "Slow digestion - incorporate digestive spices",
            Self::AnxietyTendency => "Tendency toward anxiety - practice grounding activities",
            Self::IrritabilityTendency => {
                "Tendency toward irritability - practice cooling activities"
            }
            Self::LethargyTendency => {
                "Tendency toward lethargy - increase stimulating activities"
            }
            Self::GrowingPhase => "Growing phase - ensure adequate nutrition for development",
            Self::MaturePhase => "Mature phase - focus on easily digestible foods",
            Self::LowActivity => "Low activity - gradually increase movement and exercise",
            Self::HighActivity => "High activity - ensure adequate rest and recovery",
        }
    }

    pub const fn affects_digestion(self) -> bool {
        matches!(self, Self::IrregularDigestion | Self::SlowDigestion)
    }
}

pub(crate) fn category_breakdown(
    questionnaire: &Questionnaire,
    items: &[AnsweredItem],
) -> Result<Vec<CategoryBreakdown>, EngineError> {
    let mut breakdown: Vec<CategoryBreakdown> = QuestionCategory::ordered()
        .into_iter()
        .map(|category| CategoryBreakdown {
            category,
            scores: ScoreVector::default(),
        })
        .collect();

    for item in items {
        let Some(category) = questionnaire.category_of(item.question_id) else {
            continue;
        };
        if let Some(entry) = breakdown.iter_mut().find(|entry| entry.category == category) {
            entry.scores.add(item.axis, item.weight)?;
        }
    }

    Ok(breakdown)
}

pub(crate) fn strengths(breakdown: &[CategoryBreakdown], dominant: DoshaAxis) -> Vec<String> {
    let strengths: Vec<String> = breakdown
        .iter()
        .filter(|entry| entry.scores.get(dominant) > STRENGTH_THRESHOLD)
        .filter_map(|entry| match entry.category {
            QuestionCategory::PhysicalConstitution => Some("Strong physical foundation"),
            QuestionCategory::DigestivePatterns => Some("Good digestive capacity"),
            QuestionCategory::MentalEmotional => Some("Stable mental-emotional state"),
            QuestionCategory::SleepEnergy => Some("Good energy and sleep patterns"),
            QuestionCategory::PhysicalActivity | QuestionCategory::EnvironmentalPreferences => {
                None
            }
        })
        .map(str::to_string)
        .collect();

    if strengths.is_empty() {
        vec!["Balanced overall constitution".to_string()]
    } else {
        strengths
    }
}

pub(crate) fn imbalances(
    breakdown: &[CategoryBreakdown],
    demographics: Option<&DemographicProfile>,
) -> Vec<PotentialImbalance> {
    let mut imbalances = Vec::new();

    for entry in breakdown {
        let leader = entry.scores.dominant();
        if entry.scores.get(leader) <= IMBALANCE_THRESHOLD {
            continue;
        }

        let imbalance = match (entry.category, leader) {
            (QuestionCategory::DigestivePatterns, DoshaAxis::Vata) => {
                PotentialImbalance::IrregularDigestion
            }
            (QuestionCategory::DigestivePatterns, DoshaAxis::Pitta) => {
                PotentialImbalance::StrongDigestiveFire
            }
            (QuestionCategory::DigestivePatterns, DoshaAxis::Kapha) => {
                PotentialImbalance::SlowDigestion
            }
            (QuestionCategory::MentalEmotional, DoshaAxis::Vata) => {
                PotentialImbalance::AnxietyTendency
            }
            (QuestionCategory::MentalEmotional, DoshaAxis::Pitta) => {
                PotentialImbalance::IrritabilityTendency
            }
            (QuestionCategory::MentalEmotional, DoshaAxis::Kapha) => {
                PotentialImbalance::LethargyTendency
            }
            _ => continue,
        };
        imbalances.push(imbalance);
    }

    if let Some(profile) = demographics {
        match profile.age {
            Some(age) if age < GROWING_PHASE_BELOW_AGE => {
                imbalances.push(PotentialImbalance::GrowingPhase)
            }
            Some(age) if age > MATURE_PHASE_ABOVE_AGE => {
                imbalances.push(PotentialImbalance::MaturePhase)
            }
            _ => {}
        }

        match profile.activity {
            Some(ActivityLevel::Low) => imbalances.push(PotentialImbalance::LowActivity),
            Some(ActivityLevel::High) => imbalances.push(PotentialImbalance::HighActivity),
            _ => {}
        }
    }

    imbalances
}

pub(crate) fn personality_traits(dominant: DoshaAxis) -> &'static [&'static str] {
    match dominant {
        DoshaAxis::Vata => &["creativity", "enthusiasm", "flexibility", "quick thinking"],
        DoshaAxis::Pitta => &["intelligence", "focus", "determination", "leadership"],
        DoshaAxis::Kapha => &["stability", "endurance", "compassion", "patience"],
    }
}
