//! Prakruti assessment to Ayurvedic diet plan workflow.
//!
//! Answers are scored and classified into a constitution, the constitution
//! drives plan composition, and every revision of a plan is stored as a new
//! record so the latest plan per patient can be reviewed, adjusted from
//! feedback, checked against reported progress, exported for a doctor, or
//! turned into a shopping list.

pub mod agni;
pub mod assessment;
pub mod classification;
pub mod composer;
pub mod domain;
pub mod error;
pub mod export;
pub mod progress;
pub mod repository;
pub mod review;
pub mod router;
pub mod service;
pub mod shopping;
pub mod summary;

#[cfg(test)]
mod tests;

pub use agni::{check_agni, AgniAdvice, MindfulEatingGuide};
pub use assessment::{
    AssessmentCalculator, AssessmentMode, AssessmentReport, PotentialImbalance, Questionnaire,
    QuestionnaireError,
};
pub use classification::{classify, ConstitutionLabel, ConstitutionProfile};
pub use composer::{ComposerConfig, ComposerConfigError, PlanComposer, PlanDocument};
pub use domain::{
    AnswerSelection, DemographicProfile, DoshaAxis, MealSlot, PercentageVector, QuestionId,
    ScoreVector,
};
pub use error::EngineError;
pub use export::DoctorReviewExport;
pub use progress::{Adherence, AdherenceLevel, ProgressCheckIn, ProgressError, ProgressInsights};
pub use repository::{
    DoctorId, PatientId, PlanId, PlanRecord, PlanRepository, PlanSource, RepositoryError,
};
pub use review::{PlanEdit, PlanFeedback, ReviewError};
pub use router::diet_plan_router;
pub use service::{
    AssessmentSubmission, DietPlanService, DietPlanServiceError, EngineConfig, PlanRequest,
    ReviewRequest,
};
pub use shopping::ShoppingList;
pub use summary::{PlanSummary, TasteProfile};
