use serde::{Deserialize, Serialize};

use super::assessment::PotentialImbalance;
use super::classification::ConstitutionLabel;
use super::composer::{tables, PlanDocument};
use super::domain::{DemographicProfile, DoshaAxis, HealthGoal, PercentageVector, Rasa};

const HEADLINE_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusArea {
    pub area: String,
    pub priority: Priority,
    pub action: String,
}

impl FocusArea {
    fn new(area: &str, priority: Priority, action: &str) -> Self {
        Self {
            area: area.to_string(),
            priority,
            action: action.to_string(),
        }
    }
}

/// Tastes and physical qualities of the known ingredients in a plan.
/// Items added during review that no table lists are not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteProfile {
    pub tastes: Vec<Rasa>,
    pub missing: Vec<Rasa>,
    pub warming: usize,
    pub cooling: usize,
    pub heavy: usize,
    pub light: usize,
    pub oily: usize,
    pub dry: usize,
}

impl TasteProfile {
    pub fn of_plan(plan: &PlanDocument) -> Self {
        let mut profile = Self::default();
        let mut seen = Vec::new();

        let names = plan.meal_items().chain(plan.spices.iter().map(String::as_str));
        for (_, ingredient) in names.filter_map(tables::lookup) {
            seen.extend_from_slice(ingredient.rasas);
            if ingredient.warming {
                profile.warming += 1;
            } else {
                profile.cooling += 1;
            }
            if ingredient.heavy {
                profile.heavy += 1;
            } else {
                profile.light += 1;
            }
            if ingredient.oily {
                profile.oily += 1;
            } else {
                profile.dry += 1;
            }
        }

        (profile.tastes, profile.missing) =
            Rasa::ordered().into_iter().partition(|rasa| seen.contains(rasa));
        profile
    }

    /// Whether the dominant qualities pacify the given dosha: vata wants warm,
    /// heavy and oily food, pitta cooling food, kapha warm, light and dry food.
    pub fn pacifies(&self, axis: DoshaAxis) -> bool {
        match axis {
            DoshaAxis::Vata => {
                self.warming >= self.cooling && self.heavy >= self.light && self.oily >= self.dry
            }
            DoshaAxis::Pitta => self.cooling >= self.warming,
            DoshaAxis::Kapha => {
                self.warming >= self.cooling && self.light >= self.heavy && self.dry >= self.oily
            }
        }
    }
}

/// Patient-facing overview of an assessment and its plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub primary: DoshaAxis,
    pub constitution: ConstitutionLabel,
    pub breakdown: PercentageVector,
    pub key_recommendations: Vec<String>,
    pub focus_areas: Vec<FocusArea>,
    pub expected_benefits: Vec<String>,
    pub taste_profile: TasteProfile,
}

pub fn summarize(
    plan: &PlanDocument,
    imbalances: &[PotentialImbalance],
    demographics: Option<&DemographicProfile>,
) -> PlanSummary {
    let mut key_recommendations = vec![
        format!(
            "Your primary dosha is {}",
            plan.dominant.key().to_ascii_uppercase()
        ),
        format!("Constitution type: {}", plan.constitution),
    ];
    key_recommendations.extend(
        plan.recommendations
            .iter()
            .take(HEADLINE_RECOMMENDATIONS)
            .cloned(),
    );
    let taste_profile = TasteProfile::of_plan(plan);
    if !taste_profile.missing.is_empty() {
        let missing: Vec<&str> = taste_profile.missing.iter().map(|rasa| rasa.label()).collect();
        key_recommendations.push(format!(
            "Include {} tastes to cover all six rasas",
            missing.join(", ")
        ));
    }
    key_recommendations.push("Follow the personalized diet plan for best results".to_string());

    let goals: Vec<HealthGoal> = demographics
        .map(|profile| profile.goals.iter().copied().collect())
        .unwrap_or_default();

    PlanSummary {
        primary: plan.dominant,
        constitution: plan.constitution,
        breakdown: plan.percentages,
        key_recommendations,
        focus_areas: focus_areas(imbalances, &goals),
        expected_benefits: expected_benefits(plan.dominant, plan.constitution, &goals),
        taste_profile,
    }
}

fn focus_areas(imbalances: &[PotentialImbalance], goals: &[HealthGoal]) -> Vec<FocusArea> {
    let mut areas = Vec::new();

    if imbalances.iter().any(|imbalance| imbalance.affects_digestion()) {
        areas.push(FocusArea::new(
            "Digestive Health",
            Priority::High,
            "Follow meal timing and food combination guidelines",
        ));
    }
    if imbalances.contains(&PotentialImbalance::AnxietyTendency) {
        areas.push(FocusArea::new(
            "Stress Management",
            Priority::High,
            "Incorporate calming foods and regular routines",
        ));
    }
    if imbalances.contains(&PotentialImbalance::LethargyTendency) {
        areas.push(FocusArea::new(
            "Energy Balance",
            Priority::Medium,
            "Adjust meal portions and timing as recommended",
        ));
    }

    for goal in goals {
        let area = match goal {
            HealthGoal::WeightManagement => FocusArea::new(
                "Weight Management",
                Priority::High,
                "Follow portion guidelines and exercise recommendations",
            ),
            HealthGoal::BetterSleep => FocusArea::new(
                "Sleep Quality",
                Priority::Medium,
                "Follow evening routine and dietary recommendations",
            ),
            HealthGoal::IncreasedEnergy => FocusArea::new(
                "Energy Optimization",
                Priority::High,
                "Follow meal timing and energy-boosting food guidelines",
            ),
            _ => continue,
        };
        areas.push(area);
    }

    areas
}

fn expected_benefits(
    dominant: DoshaAxis,
    constitution: ConstitutionLabel,
    goals: &[HealthGoal],
) -> Vec<String> {
    let base: &[&str] = match dominant {
        DoshaAxis::Vata => &[
            "Improved digestion and reduced bloating",
            "Better sleep quality and reduced anxiety",
            "Increased energy and vitality",
            "Enhanced mental clarity and focus",
        ],
        DoshaAxis::Pitta => &[
            "Better temperature regulation and cooling",
            "Reduced irritability and improved mood",
            "Enhanced mental focus and decision-making",
            "Improved skin health and complexion",
        ],
        DoshaAxis::Kapha => &[
            "Increased energy and motivation",
            "Better weight management",
            "Enhanced mental alertness",
            "Improved respiratory health",
        ],
    };

    let mut benefits: Vec<String> = base.iter().map(|line| line.to_string()).collect();
    if constitution.is_balanced() {
        benefits.push("Steady balance across all three doshas".to_string());
    }
    for goal in goals {
        let extra = match goal {
            HealthGoal::WeightManagement => "Gradual and sustainable weight management",
            HealthGoal::BetterDigestion => "Improved digestive function and comfort",
            HealthGoal::StressManagement => "Better stress resilience and emotional balance",
            _ => continue,
        };
        benefits.push(extra.to_string());
    }
    benefits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::diet_plan::classification::ConstitutionProfile;
    use crate::workflows::diet_plan::composer::{ComposerConfig, PlanComposer};
    use crate::workflows::diet_plan::domain::MealSlot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn goals_without_a_focus_area_are_skipped() {
        let areas = focus_areas(
            &[PotentialImbalance::SlowDigestion],
            &[HealthGoal::OverallWellness, HealthGoal::BetterSleep],
        );
        let names: Vec<&str> = areas.iter().map(|area| area.area.as_str()).collect();
        assert_eq!(names, vec!["Digestive Health", "Sleep Quality"]);
    }

    #[test]
    fn benefits_extend_with_goals() {
        let benefits = expected_benefits(
            DoshaAxis::Kapha,
            ConstitutionLabel::Dominant(DoshaAxis::Kapha),
            &[HealthGoal::WeightManagement, HealthGoal::BetterDigestion],
        );
        assert_eq!(benefits.len(), 6);
        assert_eq!(benefits[4], "Gradual and sustainable weight management");
    }

    #[test]
    fn balanced_constitutions_expect_steady_balance() {
        let benefits = expected_benefits(DoshaAxis::Vata, ConstitutionLabel::Balanced, &[]);
        assert_eq!(benefits.len(), 5);
        assert_eq!(benefits[4], "Steady balance across all three doshas");
    }

    #[test]
    fn taste_profile_reads_ingredient_qualities() {
        let composer = PlanComposer::new(ComposerConfig::default()).expect("valid config");
        let profile = ConstitutionProfile::from_percentages(PercentageVector::new(80.0, 10.0, 10.0));
        let mut plan = composer.compose(&profile, None, &mut ChaCha8Rng::seed_from_u64(5));

        let tastes = TasteProfile::of_plan(&plan);
        let known = plan
            .meal_items()
            .chain(plan.spices.iter().map(String::as_str))
            .filter(|name| tables::lookup(name).is_some())
            .count();
        assert_eq!(tastes.warming + tastes.cooling, known);
        assert_eq!(tastes.heavy + tastes.light, known);
        assert_eq!(tastes.oily + tastes.dry, known);
        assert_eq!(tastes.tastes.len() + tastes.missing.len(), 6);
        assert!(tastes.tastes.contains(&Rasa::Sweet));

        plan.meals
            .get_mut(MealSlot::Dinner)
            .items
            .push("Homemade vegetable broth".to_string());
        assert_eq!(TasteProfile::of_plan(&plan), tastes);
    }

    #[test]
    fn qualities_decide_which_dosha_is_pacified() {
        let warm_heavy_oily = TasteProfile {
            warming: 5,
            cooling: 1,
            heavy: 4,
            light: 2,
            oily: 4,
            dry: 2,
            ..TasteProfile::default()
        };
        assert!(warm_heavy_oily.pacifies(DoshaAxis::Vata));
        assert!(!warm_heavy_oily.pacifies(DoshaAxis::Pitta));
        assert!(!warm_heavy_oily.pacifies(DoshaAxis::Kapha));
    }

    #[test]
    fn missing_tastes_become_a_recommendation() {
        let composer = PlanComposer::new(ComposerConfig::default()).expect("valid config");
        let profile = ConstitutionProfile::from_percentages(PercentageVector::new(10.0, 80.0, 10.0));
        let mut plan = composer.compose(&profile, None, &mut ChaCha8Rng::seed_from_u64(2));
        for meal in [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner, MealSlot::Snacks] {
            plan.meals.get_mut(meal).items.clear();
        }
        plan.spices.clear();

        let summary = summarize(&plan, &[], None);

        assert!(summary.taste_profile.tastes.is_empty());
        assert_eq!(summary.taste_profile.missing, Rasa::ordered().to_vec());
        assert!(summary.key_recommendations.contains(
            &"Include sweet, sour, salty, pungent, bitter, astringent tastes to cover all six rasas"
                .to_string()
        ));
    }
}
