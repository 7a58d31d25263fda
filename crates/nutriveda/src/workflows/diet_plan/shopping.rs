use serde::{Deserialize, Serialize};

use super::composer::{tables, PlanDocument};
use super::domain::FoodCategory;

/// Plan ingredients grouped by food category, each list de-duplicated and in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub grains: Vec<String>,
    pub vegetables: Vec<String>,
    pub fruits: Vec<String>,
    pub proteins: Vec<String>,
    pub fats: Vec<String>,
    pub spices: Vec<String>,
    pub beverages: Vec<String>,
    /// Items added during review that no table knows about.
    pub other: Vec<String>,
}

impl ShoppingList {
    pub fn from_plan(plan: &PlanDocument) -> Self {
        let mut list = Self::default();

        for item in plan.meal_items() {
            let section = match tables::categorize(item) {
                Some(category) => list.section_mut(category),
                None => &mut list.other,
            };
            push_unique(section, item);
        }
        for spice in &plan.spices {
            push_unique(&mut list.spices, spice);
        }

        list
    }

    pub fn section(&self, category: FoodCategory) -> &[String] {
        match category {
            FoodCategory::Grains => &self.grains,
            FoodCategory::Vegetables => &self.vegetables,
            FoodCategory::Fruits => &self.fruits,
            FoodCategory::Proteins => &self.proteins,
            FoodCategory::Fats => &self.fats,
            FoodCategory::Spices => &self.spices,
            FoodCategory::Beverages => &self.beverages,
        }
    }

    fn section_mut(&mut self, category: FoodCategory) -> &mut Vec<String> {
        match category {
            FoodCategory::Grains => &mut self.grains,
            FoodCategory::Vegetables => &mut self.vegetables,
            FoodCategory::Fruits => &mut self.fruits,
            FoodCategory::Proteins => &mut self.proteins,
            FoodCategory::Fats => &mut self.fats,
            FoodCategory::Spices => &mut self.spices,
            FoodCategory::Beverages => &mut self.beverages,
        }
    }

    pub fn len(&self) -> usize {
        self.grains.len()
            + self.vegetables.len()
            + self.fruits.len()
            + self.proteins.len()
            + self.fats.len()
            + self.spices.len()
            + self.beverages.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn push_unique(section: &mut Vec<String>, item: &str) {
    if !section.iter().any(|existing| existing == item) {
        section.push(item.to_string());
    }
}
