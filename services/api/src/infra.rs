use metrics_exporter_prometheus::PrometheusHandle;
use nutriveda::workflows::diet_plan::domain::{AnswerSelection, DoshaAxis, QuestionId};
use nutriveda::workflows::diet_plan::{PatientId, PlanRecord, PlanRepository, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Plan history per patient, oldest first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPlanRepository {
    records: Arc<Mutex<HashMap<PatientId, Vec<PlanRecord>>>>,
}

impl InMemoryPlanRepository {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<PatientId, Vec<PlanRecord>>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn insert(&self, record: PlanRecord) -> Result<PlanRecord, RepositoryError> {
        let mut guard = self.guard()?;
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
        let guard = self.guard()?;
        Ok(guard.get(patient_id).cloned().unwrap_or_default())
    }
}

/// Parse a `question=axis` pair such as `3=pitta`.
pub(crate) fn parse_answer(raw: &str) -> Result<AnswerSelection, String> {
    let (question, axis) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=AXIS, got '{raw}'"))?;
    let question_id = question
        .trim()
        .parse::<u16>()
        .map_err(|err| format!("invalid question number '{question}' ({err})"))?;
    let axis = axis
        .parse::<DoshaAxis>()
        .map_err(|err| err.to_string())?;

    Ok(AnswerSelection {
        question_id: QuestionId(question_id),
        axis,
    })
}
