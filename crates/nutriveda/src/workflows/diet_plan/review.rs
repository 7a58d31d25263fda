//! Doctor edits and patient feedback applied to a copy of a plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::composer::PlanDocument;
use super::domain::MealSlot;

/// A single change requested during doctor review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanEdit {
    AddMealItem { slot: MealSlot, item: String },
    EditMealItem { slot: MealSlot, index: usize, item: String },
    RemoveMealItem { slot: MealSlot, index: usize },
    AddRecommendation { text: String },
    EditRecommendation { index: usize, text: String },
    RemoveRecommendation { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("review contains no edits")]
    NoEdits,
    #[error("edited text must not be blank")]
    BlankText,
    #[error("{slot:?} has {len} item(s); index {index} is out of range")]
    MealItemOutOfRange {
        slot: MealSlot,
        index: usize,
        len: usize,
    },
    #[error("plan has {len} recommendation(s); index {index} is out of range")]
    RecommendationOutOfRange { index: usize, len: usize },
}

/// Apply edits in order to a copy of `plan`. Any failing edit rejects the
/// whole batch.
pub fn apply_edits(
    plan: &PlanDocument,
    edits: &[PlanEdit],
) -> Result<PlanDocument, ReviewError> {
    if edits.is_empty() {
        return Err(ReviewError::NoEdits);
    }

    let mut revised = plan.clone();
    for edit in edits {
        apply_edit(&mut revised, edit)?;
    }
    Ok(revised)
}

fn apply_edit(plan: &mut PlanDocument, edit: &PlanEdit) -> Result<(), ReviewError> {
    match edit {
        PlanEdit::AddMealItem { slot, item } => {
            let item = non_blank(item)?;
            plan.meals.get_mut(*slot).items.push(item);
        }
        PlanEdit::EditMealItem { slot, index, item } => {
            let item = non_blank(item)?;
            let items = &mut plan.meals.get_mut(*slot).items;
            let len = items.len();
            let target = items
                .get_mut(*index)
                .ok_or(ReviewError::MealItemOutOfRange {
                    slot: *slot,
                    index: *index,
                    len,
                })?;
            *target = item;
        }
        PlanEdit::RemoveMealItem { slot, index } => {
            let items = &mut plan.meals.get_mut(*slot).items;
            if *index >= items.len() {
                return Err(ReviewError::MealItemOutOfRange {
                    slot: *slot,
                    index: *index,
                    len: items.len(),
                });
            }
            items.remove(*index);
        }
        PlanEdit::AddRecommendation { text } => {
            let text = non_blank(text)?;
            plan.recommendations.push(text);
        }
        PlanEdit::EditRecommendation { index, text } => {
            let text = non_blank(text)?;
            let len = plan.recommendations.len();
            let target = plan
                .recommendations
                .get_mut(*index)
                .ok_or(ReviewError::RecommendationOutOfRange { index: *index, len })?;
            *target = text;
        }
        PlanEdit::RemoveRecommendation { index } => {
            if *index >= plan.recommendations.len() {
                return Err(ReviewError::RecommendationOutOfRange {
                    index: *index,
                    len: plan.recommendations.len(),
                });
            }
            plan.recommendations.remove(*index);
        }
    }
    Ok(())
}

fn non_blank(text: &str) -> Result<String, ReviewError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ReviewError::BlankText)
    } else {
        Ok(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestionQuality {
    Poor,
    Fair,
    Good,
}

/// Patient-reported progress on the current plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeedback {
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub digestion: Option<DigestionQuality>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub recorded_at: DateTime<Utc>,
    pub feedback: PlanFeedback,
    pub adjustments: Vec<String>,
}

const LOW_ENERGY_ADVICE: &str = "Consider adding more warming spices and proteins";
const POOR_DIGESTION_ADVICE: &str = "Focus on lighter, more easily digestible foods";

/// Returns the adjusted plan and the recommendations that were appended.
/// Advice already present in the plan is not repeated.
pub fn apply_feedback(
    plan: &PlanDocument,
    feedback: &PlanFeedback,
) -> (PlanDocument, Vec<String>) {
    let mut revised = plan.clone();
    let mut added = Vec::new();

    let advice = [
        (feedback.energy_level == Some(EnergyLevel::Low), LOW_ENERGY_ADVICE),
        (feedback.digestion == Some(DigestionQuality::Poor), POOR_DIGESTION_ADVICE),
    ];
    for (applies, text) in advice {
        if applies && !revised.recommendations.iter().any(|existing| existing == text) {
            revised.recommendations.push(text.to_string());
            added.push(text.to_string());
        }
    }

    (revised, added)
}
