use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::diet_plan::assessment::AssessmentMode;
use crate::workflows::diet_plan::domain::{AnswerSelection, DemographicProfile, DoshaAxis, QuestionId};
use crate::workflows::diet_plan::repository::{
    PatientId, PlanRecord, PlanRepository, RepositoryError,
};
use crate::workflows::diet_plan::service::{DietPlanService, EngineConfig, PlanRequest};

pub(super) const SEED: u64 = 42;

/// Answers the first questions with `vata`, then `pitta`, then `kapha`
/// selections, numbering from one.
pub(super) fn answers(vata: u16, pitta: u16, kapha: u16) -> Vec<AnswerSelection> {
    let axes = std::iter::repeat(DoshaAxis::Vata)
        .take(vata.into())
        .chain(std::iter::repeat(DoshaAxis::Pitta).take(pitta.into()))
        .chain(std::iter::repeat(DoshaAxis::Kapha).take(kapha.into()));

    axes.zip(1..)
        .map(|(axis, id)| AnswerSelection {
            question_id: QuestionId(id),
            axis,
        })
        .collect()
}

pub(super) fn engine_config(mode: AssessmentMode) -> EngineConfig {
    EngineConfig {
        assessment_mode: mode,
        selection_seed: Some(SEED),
        ..EngineConfig::default()
    }
}

pub(super) fn build_service(
    mode: AssessmentMode,
) -> (DietPlanService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = DietPlanService::new(repository.clone(), engine_config(mode))
        .expect("default composer config is valid");
    (service, repository)
}

pub(super) fn plan_request(patient: &str, answers: Vec<AnswerSelection>) -> PlanRequest {
    PlanRequest {
        patient_id: PatientId(patient.to_string()),
        doctor_id: None,
        answers,
        demographics: None,
    }
}

pub(super) fn demographics() -> DemographicProfile {
    serde_json::from_value(serde_json::json!({
        "age": 58,
        "activity": "low",
        "season": "winter",
        "health_conditions": ["digestive-issues", "sleep-issues"],
        "goals": ["better-sleep"],
    }))
    .expect("demographics parse")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<PatientId, Vec<PlanRecord>>>>,
}

impl MemoryRepository {
    pub(super) fn count(&self, patient_id: &PatientId) -> usize {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(patient_id)
            .map_or(0, Vec::len)
    }
}

impl PlanRepository for MemoryRepository {
    fn insert(&self, record: PlanRecord) -> Result<PlanRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let history = guard.entry(record.patient_id.clone()).or_default();
        if history
            .iter()
            .any(|existing| existing.plan_id == record.plan_id)
        {
            return Err(RepositoryError::Conflict);
        }
        history.push(record.clone());
        Ok(record)
    }

    fn for_patient(&self, patient_id: &PatientId) -> Result<Vec<PlanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(patient_id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl PlanRepository for UnavailableRepository {
    fn insert(&self, _record: PlanRecord) -> Result<PlanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_patient(&self, _patient_id: &PatientId) -> Result<Vec<PlanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
