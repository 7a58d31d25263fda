use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::assessment::{
    AssessmentCalculator, AssessmentMode, AssessmentReport, Questionnaire, QuestionnaireError,
};
use super::composer::{ComposerConfig, ComposerConfigError, PlanComposer};
use super::domain::{AnswerSelection, DemographicProfile};
use super::error::EngineError;
use super::export::DoctorReviewExport;
use super::progress::{assess_progress, ProgressCheckIn, ProgressError, ProgressInsights};
use super::repository::{
    DoctorId, PatientId, PlanId, PlanRecord, PlanRepository, PlanSource, RepositoryError,
};
use super::review::{
    apply_edits, apply_feedback, FeedbackEntry, PlanEdit, PlanFeedback, ReviewError,
};
use super::shopping::ShoppingList;
use super::summary::summarize;

/// Engine settings supplied at construction instead of process-wide flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub assessment_mode: AssessmentMode,
    pub composer: ComposerConfig,
    /// Seeds item selection; entropy is used when absent.
    pub selection_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub answers: Vec<AnswerSelection>,
    #[serde(default)]
    pub demographics: Option<DemographicProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub patient_id: PatientId,
    #[serde(default)]
    pub doctor_id: Option<DoctorId>,
    pub answers: Vec<AnswerSelection>,
    #[serde(default)]
    pub demographics: Option<DemographicProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub doctor_id: DoctorId,
    pub edits: Vec<PlanEdit>,
}

/// Service tying the assessment calculator, plan composer and repository together.
pub struct DietPlanService<R> {
    repository: Arc<R>,
    calculator: AssessmentCalculator,
    composer: PlanComposer,
    rng: Mutex<ChaCha8Rng>,
}

static PLAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_plan_id() -> PlanId {
    PlanId(PLAN_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

impl<R> DietPlanService<R>
where
    R: PlanRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EngineConfig) -> Result<Self, ComposerConfigError> {
        let composer = PlanComposer::new(config.composer)?;
        let rng = match config.selection_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            repository,
            calculator: AssessmentCalculator::new(Questionnaire::for_mode(config.assessment_mode)),
            composer,
            rng: Mutex::new(rng),
        })
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        self.calculator.questionnaire()
    }

    /// Score and classify answers without composing or storing a plan.
    pub fn assess(
        &self,
        submission: &AssessmentSubmission,
    ) -> Result<AssessmentReport, DietPlanServiceError> {
        let items = self
            .questionnaire()
            .resolve(&submission.answers)
            .map_err(|error| {
                warn!(%error, "rejected questionnaire answers");
                error
            })?;
        let report = self
            .calculator
            .assess(&items, submission.demographics.as_ref())
            .map_err(|error| {
                warn!(%error, "assessment failed");
                error
            })?;

        debug!(
            scores = ?report.scores,
            label = %report.profile.label,
            "assessment scored"
        );
        Ok(report)
    }

    /// Assess, compose and persist a new plan for the patient.
    pub fn generate(&self, request: PlanRequest) -> Result<PlanRecord, DietPlanServiceError> {
        let report = self.assess(&AssessmentSubmission {
            answers: request.answers,
            demographics: request.demographics.clone(),
        })?;
        let demographics = request.demographics;

        let plan = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.composer
                .compose(&report.profile, demographics.as_ref(), &mut *rng)
        };
        let summary = summarize(&plan, &report.imbalances, demographics.as_ref());

        let record = PlanRecord {
            plan_id: next_plan_id(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            created_at: Utc::now(),
            source: PlanSource::Generated,
            assessment: report,
            demographics,
            plan,
            summary,
            feedback_history: Vec::new(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            plan_id = %stored.plan_id,
            patient_id = %stored.patient_id,
            constitution = %stored.plan.constitution,
            "diet plan generated"
        );
        Ok(stored)
    }

    pub fn latest(&self, patient_id: &PatientId) -> Result<PlanRecord, DietPlanServiceError> {
        self.repository
            .latest_for_patient(patient_id)?
            .ok_or_else(|| DietPlanServiceError::PlanNotFound(patient_id.clone()))
    }

    /// Apply doctor edits to the latest plan and store the result as a new record.
    pub fn review(
        &self,
        patient_id: &PatientId,
        request: ReviewRequest,
    ) -> Result<PlanRecord, DietPlanServiceError> {
        let latest = self.latest(patient_id)?;
        let plan = apply_edits(&latest.plan, &request.edits).map_err(|error| {
            warn!(%error, %patient_id, "rejected plan review");
            error
        })?;
        let summary = summarize(
            &plan,
            &latest.assessment.imbalances,
            latest.demographics.as_ref(),
        );

        let record = PlanRecord {
            plan_id: next_plan_id(),
            doctor_id: Some(request.doctor_id),
            created_at: Utc::now(),
            source: PlanSource::DoctorReview,
            plan,
            summary,
            ..latest
        };

        let stored = self.repository.insert(record)?;
        info!(
            plan_id = %stored.plan_id,
            %patient_id,
            edits = request.edits.len(),
            "diet plan reviewed"
        );
        Ok(stored)
    }

    /// Record patient feedback, storing an adjusted copy of the latest plan.
    pub fn record_feedback(
        &self,
        patient_id: &PatientId,
        feedback: PlanFeedback,
    ) -> Result<PlanRecord, DietPlanServiceError> {
        let latest = self.latest(patient_id)?;
        let (plan, adjustments) = apply_feedback(&latest.plan, &feedback);
        let summary = summarize(
            &plan,
            &latest.assessment.imbalances,
            latest.demographics.as_ref(),
        );
        let now = Utc::now();

        let mut feedback_history = latest.feedback_history.clone();
        feedback_history.push(FeedbackEntry {
            recorded_at: now,
            feedback,
            adjustments,
        });

        let record = PlanRecord {
            plan_id: next_plan_id(),
            created_at: now,
            source: PlanSource::Feedback,
            plan,
            summary,
            feedback_history,
            ..latest
        };

        let stored = self.repository.insert(record)?;
        info!(plan_id = %stored.plan_id, %patient_id, "feedback recorded");
        Ok(stored)
    }

    /// Score a progress check-in against the patient's plan history. Without
    /// an explicit duration, days are counted from the earliest stored plan.
    pub fn progress(
        &self,
        patient_id: &PatientId,
        check_in: &ProgressCheckIn,
    ) -> Result<ProgressInsights, DietPlanServiceError> {
        let history = self.repository.for_patient(patient_id)?;
        let Some(started_at) = history.iter().map(|record| record.created_at).min() else {
            return Err(DietPlanServiceError::PlanNotFound(patient_id.clone()));
        };
        let days_on_plan = check_in.days_on_plan.unwrap_or_else(|| {
            let elapsed = Utc::now().signed_duration_since(started_at).num_days();
            u32::try_from(elapsed.max(0)).unwrap_or(u32::MAX)
        });

        let insights = assess_progress(check_in, days_on_plan).map_err(|error| {
            warn!(%error, %patient_id, "rejected progress check-in");
            error
        })?;
        info!(
            %patient_id,
            days_on_plan,
            adherence = insights.adherence.score,
            "progress assessed"
        );
        Ok(insights)
    }

    pub fn export_for_review(
        &self,
        patient_id: &PatientId,
    ) -> Result<DoctorReviewExport, DietPlanServiceError> {
        let latest = self.latest(patient_id)?;
        Ok(DoctorReviewExport::from_record(&latest))
    }

    pub fn shopping_list(
        &self,
        patient_id: &PatientId,
    ) -> Result<ShoppingList, DietPlanServiceError> {
        let latest = self.latest(patient_id)?;
        Ok(ShoppingList::from_plan(&latest.plan))
    }
}

/// Error raised by the diet plan service.
#[derive(Debug, thiserror::Error)]
pub enum DietPlanServiceError {
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no diet plan recorded for patient {0}")]
    PlanNotFound(PatientId),
}
