use serde::{Deserialize, Serialize};

use super::super::domain::{FoodCategory, MealSlot};

/// How many items of each category a meal slot receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    #[serde(default)]
    pub grains: usize,
    #[serde(default)]
    pub vegetables: usize,
    #[serde(default)]
    pub fruits: usize,
    #[serde(default)]
    pub proteins: usize,
    #[serde(default)]
    pub fats: usize,
    #[serde(default)]
    pub beverages: usize,
}

impl SlotCounts {
    /// Categories in the order their picks appear in a meal.
    pub const MEAL_ORDER: [FoodCategory; 6] = [
        FoodCategory::Grains,
        FoodCategory::Vegetables,
        FoodCategory::Fruits,
        FoodCategory::Proteins,
        FoodCategory::Fats,
        FoodCategory::Beverages,
    ];

    pub fn get(&self, category: FoodCategory) -> usize {
        match category {
            FoodCategory::Grains => self.grains,
            FoodCategory::Vegetables => self.vegetables,
            FoodCategory::Fruits => self.fruits,
            FoodCategory::Proteins => self.proteins,
            FoodCategory::Fats => self.fats,
            FoodCategory::Beverages => self.beverages,
            FoodCategory::Spices => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.grains + self.vegetables + self.fruits + self.proteins + self.fats + self.beverages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealCounts {
    pub breakfast: SlotCounts,
    pub lunch: SlotCounts,
    pub dinner: SlotCounts,
    pub snacks: SlotCounts,
}

impl MealCounts {
    pub fn slot(&self, slot: MealSlot) -> &SlotCounts {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }
}

impl Default for MealCounts {
    fn default() -> Self {
        Self {
            breakfast: SlotCounts {
                grains: 1,
                fruits: 2,
                beverages: 1,
                ..SlotCounts::default()
            },
            lunch: SlotCounts {
                grains: 2,
                vegetables: 3,
                proteins: 2,
                fats: 1,
                beverages: 1,
                ..SlotCounts::default()
            },
            dinner: SlotCounts {
                grains: 1,
                vegetables: 1,
                beverages: 1,
                ..SlotCounts::default()
            },
            snacks: SlotCounts {
                fruits: 1,
                beverages: 1,
                ..SlotCounts::default()
            },
        }
    }
}

/// Feature switches and selection counts for plan composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    pub secondary_blend: bool,
    pub secondary_blend_threshold: f64,
    /// Age and activity notes plus the matching recommendation sentences.
    pub personalization: bool,
    pub seasonal_adjustments: bool,
    pub health_adjustments: bool,
    pub meal_counts: MealCounts,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            secondary_blend: true,
            secondary_blend_threshold: 30.0,
            personalization: true,
            seasonal_adjustments: true,
            health_adjustments: true,
            meal_counts: MealCounts::default(),
        }
    }
}

impl ComposerConfig {
    pub fn validate(&self) -> Result<(), ComposerConfigError> {
        let threshold = self.secondary_blend_threshold;
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(ComposerConfigError::BlendThreshold(threshold));
        }

        let breakfast = self.meal_counts.breakfast.total();
        let lunch = self.meal_counts.lunch.total();
        let dinner = self.meal_counts.dinner.total();
        if lunch < breakfast || breakfast < dinner {
            return Err(ComposerConfigError::MealRichness {
                breakfast,
                lunch,
                dinner,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComposerConfigError {
    #[error("secondary blend threshold {0} must be a percentage between 0 and 100")]
    BlendThreshold(f64),
    #[error(
        "lunch ({lunch} items) must be at least as rich as breakfast ({breakfast}), \
         and breakfast at least as rich as dinner ({dinner})"
    )]
    MealRichness {
        breakfast: usize,
        lunch: usize,
        dinner: usize,
    },
}
