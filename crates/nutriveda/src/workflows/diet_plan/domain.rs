use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// One of the three constitution axes. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoshaAxis {
    Vata,
    Pitta,
    Kapha,
}

impl DoshaAxis {
    pub const fn ordered() -> [Self; 3] {
        [Self::Vata, Self::Pitta, Self::Kapha]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Vata => "vata",
            Self::Pitta => "pitta",
            Self::Kapha => "kapha",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vata => "Vata",
            Self::Pitta => "Pitta",
            Self::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for DoshaAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DoshaAxis {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vata" => Ok(Self::Vata),
            "pitta" => Ok(Self::Pitta),
            "kapha" => Ok(Self::Kapha),
            _ => Err(EngineError::UnknownAxis(raw.to_string())),
        }
    }
}

/// Identifier of a questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u16);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// A single questionnaire response resolved to its axis and point weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredItem {
    pub question_id: QuestionId,
    pub axis: DoshaAxis,
    pub weight: u32,
}

/// Raw answer as submitted by the questionnaire UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSelection {
    pub question_id: QuestionId,
    pub axis: DoshaAxis,
}

/// Per-axis point totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl ScoreVector {
    pub fn get(&self, axis: DoshaAxis) -> u32 {
        match axis {
            DoshaAxis::Vata => self.vata,
            DoshaAxis::Pitta => self.pitta,
            DoshaAxis::Kapha => self.kapha,
        }
    }

    pub(crate) fn add(&mut self, axis: DoshaAxis, weight: u32) -> Result<(), EngineError> {
        let slot = match axis {
            DoshaAxis::Vata => &mut self.vata,
            DoshaAxis::Pitta => &mut self.pitta,
            DoshaAxis::Kapha => &mut self.kapha,
        };
        *slot = slot
            .checked_add(weight)
            .ok_or(EngineError::ScoreOverflow(axis))?;
        Ok(())
    }

    /// Sum of all three axes, widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.vata) + u64::from(self.pitta) + u64::from(self.kapha)
    }

    /// The axis holding the most points; ties resolve in axis order.
    pub fn dominant(&self) -> DoshaAxis {
        let mut best = DoshaAxis::Vata;
        for axis in DoshaAxis::ordered() {
            if self.get(axis) > self.get(best) {
                best = axis;
            }
        }
        best
    }
}

/// Per-axis share of the total score, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageVector {
    pub vata: f64,
    pub pitta: f64,
    pub kapha: f64,
}

impl PercentageVector {
    pub const fn new(vata: f64, pitta: f64, kapha: f64) -> Self {
        Self { vata, pitta, kapha }
    }

    pub fn get(&self, axis: DoshaAxis) -> f64 {
        match axis {
            DoshaAxis::Vata => self.vata,
            DoshaAxis::Pitta => self.pitta,
            DoshaAxis::Kapha => self.kapha,
        }
    }

    pub fn sum(&self) -> f64 {
        self.vata + self.pitta + self.kapha
    }

    /// Axes sorted by descending share. Exact ties keep axis order.
    pub fn ranked(&self) -> [(DoshaAxis, f64); 3] {
        let mut ranked = DoshaAxis::ordered().map(|axis| (axis, self.get(axis)));
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
        ranked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Spring,
    Summer,
    Monsoon,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Fixed vocabulary of self-reported health conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthCondition {
    Diabetes,
    #[serde(alias = "high-blood-pressure")]
    Hypertension,
    #[serde(alias = "digestive")]
    DigestiveIssues,
    AnxietyStress,
    SleepIssues,
    WeightManagement,
}

/// Food restriction applied before ingredient selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryPreference {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthGoal {
    WeightManagement,
    BetterDigestion,
    IncreasedEnergy,
    BetterSleep,
    StressManagement,
    OverallWellness,
    DiseasePrevention,
}

/// Optional demographic signals collected alongside the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicProfile {
    #[serde(default)]
    pub age: Option<u16>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub activity: Option<ActivityLevel>,
    #[serde(default)]
    pub health_conditions: BTreeSet<HealthCondition>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub dietary_preference: DietaryPreference,
    #[serde(default)]
    pub goals: BTreeSet<HealthGoal>,
}

impl DemographicProfile {
    pub fn has_condition(&self, condition: HealthCondition) -> bool {
        self.health_conditions.contains(&condition)
    }
}

/// Six Ayurvedic taste categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rasa {
    Sweet,
    Sour,
    Salty,
    Pungent,
    Bitter,
    Astringent,
}

impl Rasa {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Sweet,
            Self::Sour,
            Self::Salty,
            Self::Pungent,
            Self::Bitter,
            Self::Astringent,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sweet => "sweet",
            Self::Sour => "sour",
            Self::Salty => "salty",
            Self::Pungent => "pungent",
            Self::Bitter => "bitter",
            Self::Astringent => "astringent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Grains,
    Vegetables,
    Fruits,
    Proteins,
    Fats,
    Spices,
    Beverages,
}

impl FoodCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grains => "Grains",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Proteins => "Proteins",
            Self::Fats => "Fats & Oils",
            Self::Spices => "Spices",
            Self::Beverages => "Beverages",
        }
    }
}

/// Meal slots of a day plan, in serving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const fn ordered() -> [Self; 4] {
        [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }
}

/// Error raised when a free-form tag does not belong to a fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '_', '/'], "-")
}

impl FromStr for ActivityLevel {
    type Err = UnknownTag;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "low" | "sedentary" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" | "active" => Ok(Self::High),
            _ => Err(UnknownTag {
                kind: "activity level",
                value: raw.to_string(),
            }),
        }
    }
}

impl FromStr for Season {
    type Err = UnknownTag;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "monsoon" => Ok(Self::Monsoon),
            "winter" => Ok(Self::Winter),
            _ => Err(UnknownTag {
                kind: "season",
                value: raw.to_string(),
            }),
        }
    }
}

impl FromStr for HealthCondition {
    type Err = UnknownTag;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "diabetes" => Ok(Self::Diabetes),
            "hypertension" | "high-blood-pressure" => Ok(Self::Hypertension),
            "digestive" | "digestive-issues" => Ok(Self::DigestiveIssues),
            "anxiety-stress" | "anxiety" | "stress" => Ok(Self::AnxietyStress),
            "sleep-issues" | "sleep" => Ok(Self::SleepIssues),
            "weight-management" | "weight-management-concerns" => Ok(Self::WeightManagement),
            _ => Err(UnknownTag {
                kind: "health condition",
                value: raw.to_string(),
            }),
        }
    }
}

impl FromStr for DietaryPreference {
    type Err = UnknownTag;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "omnivore" | "none" => Ok(Self::Omnivore),
            "vegetarian" => Ok(Self::Vegetarian),
            "vegan" => Ok(Self::Vegan),
            _ => Err(UnknownTag {
                kind: "dietary preference",
                value: raw.to_string(),
            }),
        }
    }
}

impl FromStr for HealthGoal {
    type Err = UnknownTag;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "weight-management" => Ok(Self::WeightManagement),
            "better-digestion" => Ok(Self::BetterDigestion),
            "increased-energy" => Ok(Self::IncreasedEnergy),
            "better-sleep" => Ok(Self::BetterSleep),
            "stress-management" => Ok(Self::StressManagement),
            "overall-wellness" => Ok(Self::OverallWellness),
            "disease-prevention" => Ok(Self::DiseasePrevention),
            _ => Err(UnknownTag {
                kind: "health goal",
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parsing_rejects_values_outside_the_closed_set() {
        assert_eq!(" Pitta ".parse::<DoshaAxis>().unwrap(), DoshaAxis::Pitta);
        match "ether".parse::<DoshaAxis>() {
            Err(EngineError::UnknownAxis(value)) => assert_eq!(value, "ether"),
            other => panic!("expected unknown axis, got {other:?}"),
        }
    }

    #[test]
    fn ranked_keeps_axis_order_on_exact_ties() {
        let percentages = PercentageVector::new(25.0, 50.0, 25.0);
        let ranked = percentages.ranked();
        assert_eq!(ranked[0].0, DoshaAxis::Pitta);
        assert_eq!(ranked[1].0, DoshaAxis::Vata);
        assert_eq!(ranked[2].0, DoshaAxis::Kapha);
    }

    #[test]
    fn health_condition_tags_accept_questionnaire_labels() {
        assert_eq!(
            "High Blood Pressure".parse::<HealthCondition>().unwrap(),
            HealthCondition::Hypertension
        );
        assert_eq!(
            "Digestive Issues".parse::<HealthCondition>().unwrap(),
            HealthCondition::DigestiveIssues
        );
        assert!("gout".parse::<HealthCondition>().is_err());
    }

    #[test]
    fn demographic_profile_deserializes_with_defaults() {
        let profile: DemographicProfile =
            serde_json::from_str(r#"{"age": 34, "health_conditions": ["digestive"]}"#)
                .expect("profile parses");
        assert_eq!(profile.age, Some(34));
        assert!(profile.has_condition(HealthCondition::DigestiveIssues));
        assert_eq!(profile.dietary_preference, DietaryPreference::Omnivore);
        assert!(profile.goals.is_empty());
    }
}
