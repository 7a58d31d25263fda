//! Adherence scoring and follow-up guidance from a patient check-in.

use serde::{Deserialize, Serialize};

/// Points earned per followed habit; four habits make a full score of 100.
pub const HABIT_POINTS: u8 = 25;
pub const HIGH_ADHERENCE: u8 = 75;
pub const MEDIUM_ADHERENCE: u8 = 50;

pub const MAX_RATING: u8 = 10;
const SETTLING_IN_DAYS: u32 = 7;
const ADVANCE_AFTER_DAYS: u32 = 14;

/// Self-rated wellbeing on a 1 to 10 scale. Unrated fields are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellbeingRatings {
    #[serde(default)]
    pub energy: Option<u8>,
    #[serde(default)]
    pub digestion: Option<u8>,
    #[serde(default)]
    pub sleep: Option<u8>,
}

impl WellbeingRatings {
    fn fields(&self) -> [(&'static str, Option<u8>); 3] {
        [
            ("energy", self.energy),
            ("digestion", self.digestion),
            ("sleep", self.sleep),
        ]
    }
}

/// What the patient reports after following a plan for a while.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCheckIn {
    #[serde(default)]
    pub followed_meal_timing: bool,
    #[serde(default)]
    pub followed_food_guidelines: bool,
    #[serde(default)]
    pub avoided_restricted_foods: bool,
    #[serde(default)]
    pub regular_exercise: bool,
    #[serde(default)]
    pub cravings: Vec<String>,
    /// Days on the plan; derived from the patient's plan history when absent.
    #[serde(default)]
    pub days_on_plan: Option<u32>,
    #[serde(default)]
    pub baseline: WellbeingRatings,
    #[serde(default)]
    pub current: WellbeingRatings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adherence {
    pub score: u8,
    pub level: AdherenceLevel,
}

impl Adherence {
    pub fn from_score(score: u8) -> Self {
        let level = if score >= HIGH_ADHERENCE {
            AdherenceLevel::High
        } else if score >= MEDIUM_ADHERENCE {
            AdherenceLevel::Medium
        } else {
            AdherenceLevel::Low
        };
        Self { score, level }
    }

    pub fn of_check_in(check_in: &ProgressCheckIn) -> Self {
        let followed = [
            check_in.followed_meal_timing,
            check_in.followed_food_guidelines,
            check_in.avoided_restricted_foods,
            check_in.regular_exercise,
        ]
        .into_iter()
        .filter(|habit| *habit)
        .count();
        // At most four habits, so the product stays within 100.
        Self::from_score(HABIT_POINTS * followed as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressInsights {
    pub days_on_plan: u32,
    pub adherence: Adherence,
    pub improvements: Vec<String>,
    pub challenges: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("{field} rating {value} is outside 1..={MAX_RATING}")]
    RatingOutOfRange { field: &'static str, value: u8 },
}

/// Rate adherence and derive improvements, challenges and next steps.
pub fn assess_progress(
    check_in: &ProgressCheckIn,
    days_on_plan: u32,
) -> Result<ProgressInsights, ProgressError> {
    for ratings in [&check_in.baseline, &check_in.current] {
        for (field, value) in ratings.fields() {
            if let Some(value) = value.filter(|value| !(1..=MAX_RATING).contains(value)) {
                return Err(ProgressError::RatingOutOfRange { field, value });
            }
        }
    }

    let adherence = Adherence::of_check_in(check_in);
    Ok(ProgressInsights {
        days_on_plan,
        adherence,
        improvements: improvements(&check_in.baseline, &check_in.current),
        challenges: challenges(check_in),
        next_steps: next_steps(check_in, adherence, days_on_plan),
    })
}

fn improvements(baseline: &WellbeingRatings, current: &WellbeingRatings) -> Vec<String> {
    let improved = |before: Option<u8>, after: Option<u8>| match (before, after) {
        (Some(before), Some(after)) => after > before,
        _ => false,
    };

    [
        (baseline.energy, current.energy, "Energy levels have improved"),
        (baseline.digestion, current.digestion, "Digestive health has improved"),
        (baseline.sleep, current.sleep, "Sleep quality has improved"),
    ]
    .into_iter()
    .filter(|(before, after, _)| improved(*before, *after))
    .map(|(_, _, line)| line.to_string())
    .collect()
}

fn challenges(check_in: &ProgressCheckIn) -> Vec<String> {
    let mut challenges = Vec::new();
    if !check_in.followed_meal_timing {
        challenges.push("Difficulty maintaining regular meal timing".to_string());
    }
    if !check_in.followed_food_guidelines {
        challenges.push("Difficulty following food guidelines".to_string());
    }
    if check_in.cravings.iter().any(|craving| !craving.trim().is_empty()) {
        challenges.push("Managing food cravings".to_string());
    }
    challenges
}

fn next_steps(check_in: &ProgressCheckIn, adherence: Adherence, days_on_plan: u32) -> Vec<String> {
    let mut steps = Vec::new();
    if days_on_plan < SETTLING_IN_DAYS {
        steps.push("Continue following the current plan for at least one more week".to_string());
    } else if days_on_plan >= ADVANCE_AFTER_DAYS && adherence.level == AdherenceLevel::High {
        steps.push("Consider advancing to more specific dietary modifications".to_string());
    }
    if !check_in.followed_meal_timing {
        steps.push("Focus on establishing regular meal routines".to_string());
    }
    steps
}
