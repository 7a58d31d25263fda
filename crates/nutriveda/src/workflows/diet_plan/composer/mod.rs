//! Expands a classified constitution into a structured day plan.
//!
//! Composition is a pure function of the constitution profile, the optional
//! demographic profile, the static tables and the caller's random source.
//! Base picks always come from the dominant axis's tables; the secondary axis
//! can only add items, never replace them.

mod config;
mod modifiers;
mod selection;
pub mod tables;

pub use config::{ComposerConfig, ComposerConfigError, MealCounts, SlotCounts};
pub use tables::{FoodOrigin, Ingredient};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agni::{daily_routine, MindfulEatingGuide};
use super::classification::{ConstitutionLabel, ConstitutionProfile};
use super::domain::{DemographicProfile, DietaryPreference, DoshaAxis, MealSlot, PercentageVector};

const BLEND_SPICE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub slot: MealSlot,
    pub items: Vec<String>,
    pub timing: String,
    pub portions: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSchedule {
    pub breakfast: MealPlan,
    pub lunch: MealPlan,
    pub dinner: MealPlan,
    pub snacks: MealPlan,
}

impl MealSchedule {
    pub fn get(&self, slot: MealSlot) -> &MealPlan {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub fn get_mut(&mut self, slot: MealSlot) -> &mut MealPlan {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MealPlan> {
        [&self.breakfast, &self.lunch, &self.dinner, &self.snacks].into_iter()
    }
}

/// Items mixed in from the second-ranked axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryBlend {
    pub axis: DoshaAxis,
    pub percentage: f64,
    pub snack_items: Vec<String>,
    pub spices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaGuidance {
    pub goal: String,
    pub qualities: String,
    pub rasas: String,
    pub avoid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPreferences {
    pub temperature: String,
    pub consistency: String,
}

/// Composed day plan. Persisted by collaborators as a plain value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub constitution: ConstitutionLabel,
    pub dominant: DoshaAxis,
    pub percentages: PercentageVector,
    pub guidance: DoshaGuidance,
    pub meals: MealSchedule,
    pub spices: Vec<String>,
    pub spices_note: String,
    pub beverages: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub food_preferences: FoodPreferences,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub special_notes: Vec<String>,
    #[serde(default)]
    pub seasonal_adjustment: Option<String>,
    #[serde(default)]
    pub health_adjustments: Vec<String>,
    #[serde(default)]
    pub secondary_blend: Option<SecondaryBlend>,
    pub key_principles: Vec<String>,
    pub mindful_eating: MindfulEatingGuide,
    pub daily_routine: Vec<String>,
}

impl PlanDocument {
    /// Every meal item across all slots, in serving order.
    pub fn meal_items(&self) -> impl Iterator<Item = &str> {
        self.meals
            .iter()
            .flat_map(|meal| meal.items.iter().map(String::as_str))
    }
}

pub struct PlanComposer {
    config: ComposerConfig,
}

impl PlanComposer {
    pub fn new(config: ComposerConfig) -> Result<Self, ComposerConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn compose<R>(
        &self,
        profile: &ConstitutionProfile,
        demographics: Option<&DemographicProfile>,
        rng: &mut R,
    ) -> PlanDocument
    where
        R: Rng + ?Sized,
    {
        let dominant = profile.dominant();
        let preference = demographics
            .map(|demographics| demographics.dietary_preference)
            .unwrap_or_default();

        let mut meals = self.base_meals(dominant, preference, rng);
        let mut spices: Vec<String> = tables::table(dominant)
            .spices
            .iter()
            .filter(|spice| spice.allowed_for(preference))
            .map(|spice| spice.name.to_string())
            .collect();

        let secondary_blend =
            self.blend_secondary(profile, preference, &mut meals, &mut spices, rng);
        let adjustments = modifiers::adjustments(&self.config, demographics);
        let recommendations = modifiers::recommendations(&self.config, dominant, demographics);

        let goal = tables::dosha_goal(dominant);
        let template = tables::meal_template(dominant);

        PlanDocument {
            constitution: profile.label,
            dominant,
            percentages: profile.percentages,
            guidance: DoshaGuidance {
                goal: goal.goal.to_string(),
                qualities: goal.qualities.to_string(),
                rasas: goal.rasas.to_string(),
                avoid: goal.avoid.to_string(),
            },
            meals,
            spices,
            spices_note: tables::SPICES_NOTE.to_string(),
            beverages: owned(tables::beverage_guidance(dominant)),
            foods_to_avoid: owned(tables::unfavorable_foods(dominant)),
            food_preferences: FoodPreferences {
                temperature: template.temperature.to_string(),
                consistency: template.consistency.to_string(),
            },
            recommendations,
            special_notes: adjustments.special_notes,
            seasonal_adjustment: adjustments.seasonal,
            health_adjustments: adjustments.health,
            secondary_blend,
            key_principles: vec![
                format!("Focus on {} tastes", goal.rasas),
                format!("Seek {} qualities in food", goal.qualities),
                format!("Avoid {}", goal.avoid),
                "Eat your largest meal at lunch when Agni is strongest".to_string(),
                "Only eat when truly hungry".to_string(),
                "Follow mindful eating practices".to_string(),
            ],
            mindful_eating: MindfulEatingGuide::standard(),
            daily_routine: daily_routine(),
        }
    }

    fn base_meals<R>(
        &self,
        dominant: DoshaAxis,
        preference: DietaryPreference,
        rng: &mut R,
    ) -> MealSchedule
    where
        R: Rng + ?Sized,
    {
        let table = tables::table(dominant);
        let template = tables::meal_template(dominant);

        let mut meal = |slot: MealSlot| {
            let counts = self.config.meal_counts.slot(slot);
            let items = SlotCounts::MEAL_ORDER
                .into_iter()
                .flat_map(|category| {
                    let pool = table.category(category);
                    selection::pick(pool, counts.get(category), preference, rng)
                })
                .map(str::to_string)
                .collect();
            let guidance = template.slot(slot);

            MealPlan {
                slot,
                items,
                timing: guidance.timing.to_string(),
                portions: guidance.portions.to_string(),
                note: guidance.note.to_string(),
            }
        };

        MealSchedule {
            breakfast: meal(MealSlot::Breakfast),
            lunch: meal(MealSlot::Lunch),
            dinner: meal(MealSlot::Dinner),
            snacks: meal(MealSlot::Snacks),
        }
    }

    fn blend_secondary<R>(
        &self,
        profile: &ConstitutionProfile,
        preference: DietaryPreference,
        meals: &mut MealSchedule,
        spices: &mut Vec<String>,
        rng: &mut R,
    ) -> Option<SecondaryBlend>
    where
        R: Rng + ?Sized,
    {
        let (axis, percentage) = profile.secondary();
        if !self.config.secondary_blend || percentage <= self.config.secondary_blend_threshold {
            return None;
        }

        let table = tables::table(axis);
        let snack_items: Vec<String> =
            selection::pick_new(table.fruits, &meals.snacks.items, preference, rng)
                .map(str::to_string)
                .into_iter()
                .collect();
        meals.snacks.items.extend(snack_items.iter().cloned());

        let blend_spices: Vec<String> = table
            .spices
            .iter()
            .filter(|spice| spice.allowed_for(preference))
            .filter(|spice| !spices.iter().any(|name| name == spice.name))
            .take(BLEND_SPICE_COUNT)
            .map(|spice| spice.name.to_string())
            .collect();
        spices.extend(blend_spices.iter().cloned());

        Some(SecondaryBlend {
            axis,
            percentage,
            snack_items,
            spices: blend_spices,
        })
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::diet_plan::domain::{ActivityLevel, HealthCondition, Season};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn composer() -> PlanComposer {
        PlanComposer::new(ComposerConfig::default()).expect("default config is valid")
    }

    fn profile(vata: f64, pitta: f64, kapha: f64) -> ConstitutionProfile {
        ConstitutionProfile::from_percentages(PercentageVector::new(vata, pitta, kapha))
    }

    #[test]
    fn meals_follow_configured_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let plan = composer().compose(&profile(10.0, 20.0, 70.0), None, &mut rng);

        assert_eq!(plan.dominant, DoshaAxis::Kapha);
        assert_eq!(plan.meals.breakfast.items.len(), 4);
        assert_eq!(plan.meals.lunch.items.len(), 9);
        assert_eq!(plan.meals.dinner.items.len(), 3);
        assert_eq!(plan.meals.snacks.items.len(), 2);
        assert!(plan.secondary_blend.is_none());
        assert_eq!(plan.meals.lunch.timing, "11:00 AM - 12:00 PM");
    }

    #[test]
    fn blend_threshold_is_exclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let plan = composer().compose(&profile(70.0, 30.0, 0.0), None, &mut rng);
        assert!(plan.secondary_blend.is_none());
        assert_eq!(plan.spices.len(), tables::table(DoshaAxis::Vata).spices.len());
    }

    #[test]
    fn blend_can_be_switched_off() {
        let composer = PlanComposer::new(ComposerConfig {
            secondary_blend: false,
            ..ComposerConfig::default()
        })
        .expect("valid config");
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let plan = composer.compose(&profile(55.0, 45.0, 0.0), None, &mut rng);

        assert!(plan.secondary_blend.is_none());
        assert_eq!(plan.meals.snacks.items.len(), 2);
    }

    #[test]
    fn label_is_threaded_from_the_profile() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let plan = composer().compose(&profile(36.0, 34.0, 30.0), None, &mut rng);
        assert_eq!(plan.constitution, ConstitutionLabel::Balanced);
        assert_eq!(plan.dominant, DoshaAxis::Vata);
    }

    #[test]
    fn vegan_plans_contain_no_animal_products() {
        let demographics = DemographicProfile {
            dietary_preference: DietaryPreference::Vegan,
            ..DemographicProfile::default()
        };
        let animal: Vec<&str> = tables::table(DoshaAxis::Vata)
            .iter()
            .filter(|ingredient| ingredient.origin != FoodOrigin::Plant)
            .map(|ingredient| ingredient.name)
            .collect();

        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let plan =
                composer().compose(&profile(80.0, 10.0, 10.0), Some(&demographics), &mut rng);
            assert!(plan.meal_items().all(|item| !animal.contains(&item)));
        }
    }

    #[test]
    fn demographics_fill_optional_sections() {
        let demographics = DemographicProfile {
            age: Some(8),
            activity: Some(ActivityLevel::High),
            season: Some(Season::Monsoon),
            health_conditions: [HealthCondition::DigestiveIssues].into_iter().collect(),
            ..DemographicProfile::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let plan = composer().compose(
            &profile(20.0, 65.0, 15.0),
            Some(&demographics),
            &mut rng,
        );

        assert_eq!(plan.special_notes.len(), 2);
        assert_eq!(
            plan.seasonal_adjustment.as_deref(),
            Some("Boost digestion with warm, light foods")
        );
        assert_eq!(plan.health_adjustments.len(), 1);
        assert!(plan
            .recommendations
            .contains(&"Ensure adequate rest and recovery time".to_string()));
        assert_eq!(plan.key_principles[0], "Focus on Sweet, Bitter, Astringent tastes");
    }
}
