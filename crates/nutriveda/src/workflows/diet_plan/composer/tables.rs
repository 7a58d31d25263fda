//! Static lookup tables consumed by the composer, keyed by [`DoshaAxis`].

use serde::Serialize;

use super::super::domain::{
    DietaryPreference, DoshaAxis, FoodCategory, HealthCondition, MealSlot, Rasa, Season,
};

/// Where an ingredient comes from, used by the dietary preference filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodOrigin {
    Plant,
    Dairy,
    Egg,
    Meat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: &'static str,
    pub rasas: &'static [Rasa],
    pub heavy: bool,
    pub warming: bool,
    pub oily: bool,
    pub origin: FoodOrigin,
}

impl Ingredient {
    pub fn allowed_for(&self, preference: DietaryPreference) -> bool {
        match preference {
            DietaryPreference::Omnivore => true,
            DietaryPreference::Vegetarian => {
                matches!(self.origin, FoodOrigin::Plant | FoodOrigin::Dairy)
            }
            DietaryPreference::Vegan => self.origin == FoodOrigin::Plant,
        }
    }
}

/// Favorable foods for balancing one dosha.
#[derive(Debug)]
pub struct DoshaTable {
    pub grains: &'static [Ingredient],
    pub vegetables: &'static [Ingredient],
    pub fruits: &'static [Ingredient],
    pub proteins: &'static [Ingredient],
    pub fats: &'static [Ingredient],
    pub spices: &'static [Ingredient],
    pub beverages: &'static [Ingredient],
}

impl DoshaTable {
    pub fn category(&self, category: FoodCategory) -> &'static [Ingredient] {
        match category {
            FoodCategory::Grains => self.grains,
            FoodCategory::Vegetables => self.vegetables,
            FoodCategory::Fruits => self.fruits,
            FoodCategory::Proteins => self.proteins,
            FoodCategory::Fats => self.fats,
            FoodCategory::Spices => self.spices,
            FoodCategory::Beverages => self.beverages,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Ingredient> + '_ {
        FOOD_CATEGORIES
            .into_iter()
            .flat_map(move |category| self.category(category).iter())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|ingredient| ingredient.name == name)
    }
}

const FOOD_CATEGORIES: [FoodCategory; 7] = [
    FoodCategory::Grains,
    FoodCategory::Vegetables,
    FoodCategory::Fruits,
    FoodCategory::Proteins,
    FoodCategory::Fats,
    FoodCategory::Spices,
    FoodCategory::Beverages,
];

pub fn table(axis: DoshaAxis) -> &'static DoshaTable {
    match axis {
        DoshaAxis::Vata => &VATA_TABLE,
        DoshaAxis::Pitta => &PITTA_TABLE,
        DoshaAxis::Kapha => &KAPHA_TABLE,
    }
}

/// Table entry for a named ingredient, with the category it is listed under.
pub fn lookup(name: &str) -> Option<(FoodCategory, &'static Ingredient)> {
    DoshaAxis::ordered().into_iter().find_map(|axis| {
        let table = table(axis);
        FOOD_CATEGORIES.into_iter().find_map(|category| {
            table
                .category(category)
                .iter()
                .find(|ingredient| ingredient.name.eq_ignore_ascii_case(name))
                .map(|ingredient| (category, ingredient))
        })
    })
}

/// Category of a named ingredient in any table, if it is known.
pub fn categorize(name: &str) -> Option<FoodCategory> {
    lookup(name).map(|(category, _)| category)
}

const fn food(
    name: &'static str,
    rasas: &'static [Rasa],
    heavy: bool,
    warming: bool,
    oily: bool,
) -> Ingredient {
    Ingredient {
        name,
        rasas,
        heavy,
        warming,
        oily,
        origin: FoodOrigin::Plant,
    }
}

const fn of_origin(origin: FoodOrigin, ingredient: Ingredient) -> Ingredient {
    Ingredient {
        origin,
        ..ingredient
    }
}

use FoodOrigin::{Dairy, Egg, Meat};
use Rasa::{Astringent, Bitter, Pungent, Salty, Sour, Sweet};

static VATA_TABLE: DoshaTable = DoshaTable {
    grains: &[
        food("Basmati Rice", &[Sweet], true, true, true),
        food("Oatmeal (cooked)", &[Sweet], true, true, true),
        food("Wheat Bread", &[Sweet], true, true, false),
        food("Quinoa (cooked)", &[Sweet], true, true, false),
    ],
    vegetables: &[
        food("Cooked Carrots", &[Sweet], true, true, false),
        food("Cooked Beets", &[Sweet], true, true, false),
        food("Sweet Potato (cooked)", &[Sweet], true, true, false),
        food("Cooked Zucchini", &[Sweet], false, true, false),
    ],
    fruits: &[
        food("Stewed Apples", &[Sweet], false, true, false),
        food("Ripe Bananas", &[Sweet], true, false, false),
        food("Cooked Pears", &[Sweet], false, true, false),
        food("Sweet Mango", &[Sweet, Sour], true, false, false),
    ],
    proteins: &[
        food("Mung Dal (cooked)", &[Sweet], false, true, false),
        of_origin(Dairy, food("Paneer", &[Sweet], true, false, true)),
        of_origin(Egg, food("Eggs (cooked)", &[Sweet], true, true, true)),
        of_origin(Meat, food("Chicken (well-cooked)", &[Sweet], true, true, true)),
    ],
    fats: &[
        of_origin(Dairy, food("Ghee", &[Sweet], true, true, true)),
        food("Sesame Oil", &[Sweet], true, true, true),
        food("Avocado", &[Sweet], true, false, true),
    ],
    spices: &[
        food("Ginger", &[Pungent], false, true, false),
        food("Cinnamon", &[Sweet, Pungent], false, true, false),
        food("Cardamom", &[Sweet, Pungent], false, true, false),
        food("Cumin", &[Pungent], false, true, false),
        food("Fennel", &[Sweet], false, true, false),
        food("Rock Salt", &[Salty], false, true, false),
    ],
    beverages: &[
        of_origin(Dairy, food("Warm Milk with Honey", &[Sweet], true, true, true)),
        food("Ginger Tea", &[Pungent], false, true, false),
        food("Warm Water", &[Sweet], false, true, false),
    ],
};

static PITTA_TABLE: DoshaTable = DoshaTable {
    grains: &[
        food("Basmati Rice", &[Sweet], true, false, false),
        food("Barley", &[Sweet, Astringent], false, false, false),
        food("Oats (cooked)", &[Sweet], true, false, false),
        food("Wheat", &[Sweet], true, false, false),
    ],
    vegetables: &[
        food("Cucumber", &[Sweet, Astringent], false, false, false),
        food("Cilantro", &[Bitter, Astringent], false, false, false),
        food("Leafy Greens", &[Bitter, Astringent], false, false, false),
        food("Zucchini", &[Sweet], false, false, false),
        food("Asparagus", &[Sweet, Bitter], false, false, false),
    ],
    fruits: &[
        food("Sweet Grapes", &[Sweet], false, false, false),
        food("Watermelon", &[Sweet], false, false, false),
        food("Sweet Apple", &[Sweet, Astringent], false, false, false),
        food("Pomegranate", &[Sweet, Astringent], false, false, false),
    ],
    proteins: &[
        food("Mung Dal", &[Sweet, Astringent], false, false, false),
        food("Chickpeas", &[Sweet, Astringent], true, false, false),
        food("Tofu", &[Sweet], true, false, false),
    ],
    fats: &[
        of_origin(Dairy, food("Ghee (small amount)", &[Sweet], true, false, true)),
        food("Coconut Oil", &[Sweet], true, false, true),
        food("Sunflower Oil", &[Sweet], false, false, true),
    ],
    spices: &[
        food("Coriander", &[Sweet, Bitter], false, false, false),
        food("Fennel", &[Sweet], false, false, false),
        food("Cardamom", &[Sweet, Pungent], false, false, false),
        food("Mint", &[Pungent, Bitter], false, false, false),
        food("Turmeric (small)", &[Bitter, Pungent], false, false, false),
        food("Dill", &[Pungent], false, false, false),
    ],
    beverages: &[
        food("Coconut Water", &[Sweet], false, false, false),
        food("Mint Tea", &[Bitter], false, false, false),
        food("Rose Water", &[Sweet, Astringent], false, false, false),
    ],
};

static KAPHA_TABLE: DoshaTable = DoshaTable {
    grains: &[
        food("Barley", &[Sweet, Astringent], false, true, false),
        food("Millet", &[Sweet, Astringent], false, true, false),
        food("Quinoa", &[Sweet, Astringent], false, true, false),
        food("Buckwheat", &[Sweet, Astringent], false, true, false),
    ],
    vegetables: &[
        food("Leafy Greens", &[Bitter, Astringent], false, false, false),
        food("Radish", &[Pungent], false, true, false),
        food("Cabbage", &[Sweet, Astringent], false, false, false),
        food("Cauliflower", &[Sweet, Astringent], false, true, false),
        food("Bitter Gourd", &[Bitter], false, false, false),
    ],
    fruits: &[
        food("Apple", &[Sweet, Astringent], false, false, false),
        food("Pear", &[Sweet, Astringent], false, false, false),
        food("Pomegranate", &[Sweet, Astringent], false, false, false),
        food("Cranberries", &[Astringent], false, false, false),
    ],
    proteins: &[
        food("Red Lentils", &[Sweet, Astringent], false, true, false),
        food("Mung Dal", &[Sweet, Astringent], false, true, false),
        food("Chickpeas (dry)", &[Sweet, Astringent], false, true, false),
    ],
    fats: &[
        food("Mustard Oil (small)", &[Pungent], false, true, true),
        food("Sunflower Oil (small)", &[Sweet], false, false, true),
    ],
    spices: &[
        food("Black Pepper", &[Pungent], false, true, false),
        food("Ginger", &[Pungent], false, true, false),
        food("Turmeric", &[Bitter, Pungent], false, true, false),
        food("Cinnamon", &[Pungent, Sweet], false, true, false),
        food("Cloves", &[Pungent], false, true, false),
        food("Mustard Seeds", &[Pungent], false, true, false),
    ],
    beverages: &[
        food("Ginger Tea", &[Pungent], false, true, false),
        food("Green Tea", &[Bitter, Astringent], false, false, false),
        food("Warm Water with Honey", &[Sweet], false, true, false),
    ],
};

/// Timing, portion and note for one meal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGuidance {
    pub timing: &'static str,
    pub portions: &'static str,
    pub note: &'static str,
}

#[derive(Debug)]
pub struct MealTemplate {
    pub breakfast: SlotGuidance,
    pub lunch: SlotGuidance,
    pub dinner: SlotGuidance,
    pub snacks: SlotGuidance,
    pub temperature: &'static str,
    pub consistency: &'static str,
}

impl MealTemplate {
    pub fn slot(&self, slot: MealSlot) -> &SlotGuidance {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }
}

const LUNCH_NOTE: &str =
    "Main meal of the day. Your Agni is strongest now. Include all food groups.";
const DINNER_NOTE: &str = "Keep it light and simple. Avoid heavy foods before sleep.";
const SNACK_GUIDANCE: SlotGuidance = SlotGuidance {
    timing: "Only if truly hungry between meals",
    portions: "Very light (handful or 1/2 cup)",
    note: "Snack only when genuinely hungry. Wait 3-4 hours between meals.",
};

pub fn meal_template(axis: DoshaAxis) -> &'static MealTemplate {
    match axis {
        DoshaAxis::Vata => &VATA_TEMPLATE,
        DoshaAxis::Pitta => &PITTA_TEMPLATE,
        DoshaAxis::Kapha => &KAPHA_TEMPLATE,
    }
}

static VATA_TEMPLATE: MealTemplate = MealTemplate {
    breakfast: SlotGuidance {
        timing: "7:00 AM - 8:00 AM",
        portions: "Moderate (1-1.5 cups total)",
        note: "Start your day gently with something warm and easy to digest.",
    },
    lunch: SlotGuidance {
        timing: "12:00 PM - 1:00 PM",
        portions: "Substantial (2-3 cups total)",
        note: LUNCH_NOTE,
    },
    dinner: SlotGuidance {
        timing: "6:00 PM - 7:00 PM",
        portions: "Light (1 cup total)",
        note: DINNER_NOTE,
    },
    snacks: SNACK_GUIDANCE,
    temperature: "warm",
    consistency: "moist, oily",
};

static PITTA_TEMPLATE: MealTemplate = MealTemplate {
    breakfast: SlotGuidance {
        timing: "6:00 AM - 7:00 AM",
        portions: "Moderate (1-1.5 cups total)",
        note: "Do not skip breakfast. Favor cooling, naturally sweet foods.",
    },
    lunch: SlotGuidance {
        timing: "12:00 PM - 1:00 PM",
        portions: "Substantial (2-3 cups total)",
        note: LUNCH_NOTE,
    },
    dinner: SlotGuidance {
        timing: "7:00 PM - 8:00 PM",
        portions: "Moderate (1-1.5 cups total)",
        note: DINNER_NOTE,
    },
    snacks: SNACK_GUIDANCE,
    temperature: "cool to moderate",
    consistency: "moderate",
};

static KAPHA_TEMPLATE: MealTemplate = MealTemplate {
    breakfast: SlotGuidance {
        timing: "7:00 AM - 8:00 AM",
        portions: "Light (1 cup or skip if not hungry)",
        note: "Keep breakfast small and warm. Skip it if you are not hungry.",
    },
    lunch: SlotGuidance {
        timing: "11:00 AM - 12:00 PM",
        portions: "Substantial (2-3 cups total)",
        note: LUNCH_NOTE,
    },
    dinner: SlotGuidance {
        timing: "5:00 PM - 6:00 PM",
        portions: "Light (1 cup total)",
        note: DINNER_NOTE,
    },
    snacks: SNACK_GUIDANCE,
    temperature: "warm to hot",
    consistency: "light, dry",
};

/// Balancing goal for one dosha.
#[derive(Debug)]
pub struct DoshaGoal {
    pub goal: &'static str,
    pub qualities: &'static str,
    pub rasas: &'static str,
    pub avoid: &'static str,
}

pub fn dosha_goal(axis: DoshaAxis) -> &'static DoshaGoal {
    match axis {
        DoshaAxis::Vata => &DoshaGoal {
            goal: "Balance excess Vata",
            qualities: "Warmth, Oiliness, Heaviness",
            rasas: "Sweet, Sour, Salty",
            avoid: "Cold, dry, raw foods",
        },
        DoshaAxis::Pitta => &DoshaGoal {
            goal: "Balance excess Pitta",
            qualities: "Cooling, Heaviness, Dryness",
            rasas: "Sweet, Bitter, Astringent",
            avoid: "Spicy, sour, salty foods",
        },
        DoshaAxis::Kapha => &DoshaGoal {
            goal: "Balance excess Kapha",
            qualities: "Lightness, Warmth, Dryness",
            rasas: "Pungent, Bitter, Astringent",
            avoid: "Heavy, oily, sweet foods",
        },
    }
}

pub fn beverage_guidance(axis: DoshaAxis) -> &'static [&'static str] {
    match axis {
        DoshaAxis::Vata => &[
            "Warm water",
            "Herbal teas (ginger, cinnamon)",
            "Warm milk with spices",
        ],
        DoshaAxis::Pitta => &[
            "Room temperature water",
            "Coconut water",
            "Mint tea",
            "Rose water",
        ],
        DoshaAxis::Kapha => &[
            "Warm water",
            "Ginger tea",
            "Honey water (warm)",
            "Spiced teas",
        ],
    }
}

pub fn unfavorable_foods(axis: DoshaAxis) -> &'static [&'static str] {
    match axis {
        DoshaAxis::Vata => &[
            "raw vegetables",
            "cold foods",
            "dry foods",
            "carbonated drinks",
        ],
        DoshaAxis::Pitta => &[
            "spicy foods",
            "fermented foods",
            "citrus fruits",
            "tomatoes",
        ],
        DoshaAxis::Kapha => &["heavy foods", "oily foods", "cold foods", "sweet foods"],
    }
}

pub fn lifestyle_recommendations(axis: DoshaAxis) -> &'static [&'static str] {
    match axis {
        DoshaAxis::Vata => &[
            "Eat at regular intervals",
            "Favor warm, cooked foods",
            "Practice calming activities like meditation",
            "Go to bed early (before 10 PM)",
        ],
        DoshaAxis::Pitta => &[
            "Avoid skipping meals",
            "Stay cool and avoid excessive heat",
            "Practice moderation in all activities",
            "Include cooling activities like swimming",
        ],
        DoshaAxis::Kapha => &[
            "Eat your largest meal at midday",
            "Stay active and exercise regularly",
            "Avoid heavy, oily foods",
            "Wake up early (before 6 AM)",
        ],
    }
}

pub fn seasonal_adjustment(season: Season) -> &'static str {
    match season {
        Season::Spring => "Reduce kapha-increasing foods, add more bitter and pungent tastes",
        Season::Summer => "Focus on cooling foods, avoid excessive heat and spice",
        Season::Monsoon => "Boost digestion with warm, light foods",
        Season::Winter => "Increase warming foods and healthy fats",
    }
}

/// Conditions without a mapped sentence yield `None`.
pub fn health_adjustment(condition: HealthCondition) -> Option<&'static str> {
    match condition {
        HealthCondition::Diabetes => {
            Some("Avoid sweet and refined foods, focus on complex carbs")
        }
        HealthCondition::Hypertension => {
            Some("Reduce salt intake, increase potassium-rich foods")
        }
        HealthCondition::DigestiveIssues => {
            Some("Focus on easily digestible foods, proper food combining")
        }
        HealthCondition::AnxietyStress
        | HealthCondition::SleepIssues
        | HealthCondition::WeightManagement => None,
    }
}

pub const SPICES_NOTE: &str =
    "Use these spices liberally to balance your Dosha. They enhance Agni and aid digestion.";
