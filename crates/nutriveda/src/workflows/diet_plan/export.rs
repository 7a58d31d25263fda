use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::CategoryBreakdown;
use super::classification::ConstitutionLabel;
use super::domain::{DoshaAxis, MealSlot, PercentageVector};
use super::repository::{DoctorId, PatientId, PlanId, PlanRecord};
use super::summary::FocusArea;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub constitution: ConstitutionLabel,
    pub dominant: DoshaAxis,
    pub percentages: PercentageVector,
    pub category_breakdown: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTiming {
    pub slot: MealSlot,
    pub timing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietSnapshot {
    pub meal_timing: Vec<MealTiming>,
    pub key_principles: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub special_notes: Vec<String>,
}

/// Condensed plan handed to a doctor, with an empty notes field to fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorReviewExport {
    pub plan_id: PlanId,
    pub patient_id: PatientId,
    pub doctor_id: Option<DoctorId>,
    pub created_at: DateTime<Utc>,
    pub assessment: AssessmentSnapshot,
    pub diet: DietSnapshot,
    pub recommendations: Vec<String>,
    pub focus_areas: Vec<FocusArea>,
    pub doctor_notes: String,
}

impl DoctorReviewExport {
    pub fn from_record(record: &PlanRecord) -> Self {
        let plan = &record.plan;
        Self {
            plan_id: record.plan_id,
            patient_id: record.patient_id.clone(),
            doctor_id: record.doctor_id.clone(),
            created_at: record.created_at,
            assessment: AssessmentSnapshot {
                constitution: plan.constitution,
                dominant: plan.dominant,
                percentages: plan.percentages,
                category_breakdown: record.assessment.category_breakdown.clone(),
            },
            diet: DietSnapshot {
                meal_timing: plan
                    .meals
                    .iter()
                    .map(|meal| MealTiming {
                        slot: meal.slot,
                        timing: meal.timing.clone(),
                    })
                    .collect(),
                key_principles: plan.key_principles.clone(),
                foods_to_avoid: plan.foods_to_avoid.clone(),
                special_notes: plan.special_notes.clone(),
            },
            recommendations: record.summary.key_recommendations.clone(),
            focus_areas: record.summary.focus_areas.clone(),
            doctor_notes: String::new(),
        }
    }
}
