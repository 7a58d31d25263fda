use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{AnswerSelection, AnsweredItem, DoshaAxis, QuestionId};

/// Which of the two fixed questionnaires a session uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    /// Eight items, two points each.
    Basic,
    /// Twelve categorized items weighted two or three points.
    #[default]
    Enhanced,
}

impl AssessmentMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "enhanced" => Some(Self::Enhanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    PhysicalConstitution,
    DigestivePatterns,
    MentalEmotional,
    SleepEnergy,
    PhysicalActivity,
    EnvironmentalPreferences,
}

impl QuestionCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::PhysicalConstitution,
            Self::DigestivePatterns,
            Self::MentalEmotional,
            Self::SleepEnergy,
            Self::PhysicalActivity,
            Self::EnvironmentalPreferences,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PhysicalConstitution => "Physical Constitution",
            Self::DigestivePatterns => "Digestive Patterns",
            Self::MentalEmotional => "Mental & Emotional",
            Self::SleepEnergy => "Sleep & Energy",
            Self::PhysicalActivity => "Physical Activity",
            Self::EnvironmentalPreferences => "Environmental Preferences",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub text: &'static str,
    pub axis: DoshaAxis,
    pub points: u32,
}

/// A questionnaire item offering exactly one option per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: QuestionCategory,
    pub prompt: &'static str,
    pub options: [QuestionOption; 3],
}

impl Question {
    pub fn option_for(&self, axis: DoshaAxis) -> &QuestionOption {
        match axis {
            DoshaAxis::Vata => &self.options[0],
            DoshaAxis::Pitta => &self.options[1],
            DoshaAxis::Kapha => &self.options[2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("question {0} is not part of the questionnaire")]
    UnknownQuestion(QuestionId),
    #[error("question {0} was answered more than once")]
    DuplicateAnswer(QuestionId),
}

/// One of the fixed, ordered Prakruti questionnaires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Questionnaire {
    pub mode: AssessmentMode,
    pub questions: &'static [Question],
}

impl Questionnaire {
    pub const fn for_mode(mode: AssessmentMode) -> Self {
        let questions = match mode {
            AssessmentMode::Basic => BASIC_QUESTIONS,
            AssessmentMode::Enhanced => ENHANCED_QUESTIONS,
        };
        Self { mode, questions }
    }

    pub fn question(&self, id: QuestionId) -> Option<&'static Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Resolve raw selections into weighted answered items, preserving order.
    pub fn resolve(
        &self,
        selections: &[AnswerSelection],
    ) -> Result<Vec<AnsweredItem>, QuestionnaireError> {
        let mut seen = BTreeSet::new();
        let mut items = Vec::with_capacity(selections.len());

        for selection in selections {
            let question = self
                .question(selection.question_id)
                .ok_or(QuestionnaireError::UnknownQuestion(selection.question_id))?;
            if !seen.insert(selection.question_id) {
                return Err(QuestionnaireError::DuplicateAnswer(selection.question_id));
            }

            let option = question.option_for(selection.axis);
            items.push(AnsweredItem {
                question_id: question.id,
                axis: option.axis,
                weight: option.points,
            });
        }

        Ok(items)
    }

    pub fn category_of(&self, id: QuestionId) -> Option<QuestionCategory> {
        self.question(id).map(|question| question.category)
    }
}

const fn options(
    vata: &'static str,
    pitta: &'static str,
    kapha: &'static str,
    points: u32,
) -> [QuestionOption; 3] {
    [
        QuestionOption {
            text: vata,
            axis: DoshaAxis::Vata,
            points,
        },
        QuestionOption {
            text: pitta,
            axis: DoshaAxis::Pitta,
            points,
        },
        QuestionOption {
            text: kapha,
            axis: DoshaAxis::Kapha,
            points,
        },
    ]
}

const fn question(
    id: u16,
    category: QuestionCategory,
    prompt: &'static str,
    options: [QuestionOption; 3],
) -> Question {
    Question {
        id: QuestionId(id),
        category,
        prompt,
        options,
    }
}

use QuestionCategory::*;

const BASIC_QUESTIONS: &[Question] = &[
    question(
        1,
        PhysicalConstitution,
        "What is your body build?",
        options("Thin, light frame", "Medium build", "Large, heavy frame", 2),
    ),
    question(
        2,
        PhysicalConstitution,
        "How is your skin?",
        options(
            "Dry, rough, cool",
            "Warm, oily, prone to rashes",
            "Thick, oily, cool, smooth",
            2,
        ),
    ),
    question(
        3,
        PhysicalConstitution,
        "How is your hair?",
        options(
            "Dry, brittle, thin",
            "Fine, oily, early graying",
            "Thick, oily, wavy, lustrous",
            2,
        ),
    ),
    question(
        4,
        DigestivePatterns,
        "How is your appetite?",
        options(
            "Variable, skip meals easily",
            "Strong, get irritable when hungry",
            "Steady, can skip meals without discomfort",
            2,
        ),
    ),
    question(
        5,
        DigestivePatterns,
        "How is your digestion?",
        options(
            "Irregular, gas, bloating",
            "Strong, heartburn, loose stools",
            "Slow but steady",
            2,
        ),
    ),
    question(
        6,
        SleepEnergy,
        "How is your sleep?",
        options(
            "Light, interrupted, 6-7 hours",
            "Sound, moderate, 6-8 hours",
            "Deep, long, 8+ hours",
            2,
        ),
    ),
    question(
        7,
        SleepEnergy,
        "How is your energy level?",
        options(
            "Comes in bursts, gets tired easily",
            "Moderate, consistent",
            "Steady, good endurance",
            2,
        ),
    ),
    question(
        8,
        MentalEmotional,
        "How is your mental activity?",
        options(
            "Quick thinking, restless mind",
            "Sharp, focused, judgmental",
            "Calm, steady, good long-term memory",
            2,
        ),
    ),
];

const ENHANCED_QUESTIONS: &[Question] = &[
    question(
        1,
        PhysicalConstitution,
        "What is your body build?",
        options(
            "Thin, light frame, prominent bones",
            "Medium build, well-proportioned",
            "Large, heavy frame, broad shoulders",
            3,
        ),
    ),
    question(
        2,
        PhysicalConstitution,
        "How is your skin texture and appearance?",
        options(
            "Dry, rough, cool to touch, thin",
            "Warm, oily, soft, prone to rashes/acne",
            "Thick, oily, cool, smooth, pale",
            2,
        ),
    ),
    question(
        3,
        PhysicalConstitution,
        "Describe your hair characteristics:",
        options(
            "Dry, brittle, thin, coarse",
            "Fine, oily, early graying/balding",
            "Thick, oily, wavy, lustrous, strong",
            2,
        ),
    ),
    question(
        4,
        DigestivePatterns,
        "How is your appetite throughout the day?",
        options(
            "Variable, sometimes forget to eat",
            "Strong, get irritable when hungry",
            "Steady, can skip meals easily",
            3,
        ),
    ),
    question(
        5,
        DigestivePatterns,
        "How is your digestion after meals?",
        options(
            "Variable, sometimes bloated/gassy",
            "Strong, digest quickly, rarely bloated",
            "Slow, feel heavy after eating",
            2,
        ),
    ),
    question(
        6,
        DigestivePatterns,
        "What foods do you naturally crave?",
        options(
            "Sweet, sour, salty foods",
            "Sweet, bitter, astringent foods",
            "Pungent, bitter, astringent foods",
            2,
        ),
    ),
    question(
        7,
        MentalEmotional,
        "How do you typically handle stress?",
        options(
            "Become anxious, worried, restless",
            "Become irritable, angry, impatient",
            "Become withdrawn, depressed, lethargic",
            2,
        ),
    ),
    question(
        8,
        MentalEmotional,
        "Describe your memory and learning style:",
        options(
            "Quick to learn, quick to forget",
            "Sharp memory, focused learning",
            "Slow to learn, excellent long-term memory",
            2,
        ),
    ),
    question(
        9,
        SleepEnergy,
        "How is your sleep pattern?",
        options(
            "Light sleeper, difficulty falling asleep",
            "Moderate sleep, wake up refreshed",
            "Deep sleeper, need more than 8 hours",
            2,
        ),
    ),
    question(
        10,
        SleepEnergy,
        "When do you have the most energy?",
        options(
            "Energy comes in bursts, then crashes",
            "Consistent energy throughout the day",
            "Slow to start, steady energy once going",
            2,
        ),
    ),
    question(
        11,
        PhysicalActivity,
        "What type of exercise do you prefer?",
        options(
            "Light, flexible activities (yoga, walking)",
            "Moderate, competitive activities (swimming, cycling)",
            "Gentle, consistent activities (walking, light weights)",
            2,
        ),
    ),
    question(
        12,
        EnvironmentalPreferences,
        "What weather/climate do you prefer?",
        options(
            "Warm, humid weather",
            "Cool, moderate weather",
            "Warm, dry weather",
            2,
        ),
    ),
];
