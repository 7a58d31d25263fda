use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::assessment::AssessmentReport;
use super::composer::PlanDocument;
use super::domain::DemographicProfile;
use super::review::FeedbackEntry;
use super::summary::PlanSummary;

/// Sequence-backed plan identifier, rendered as `plan-000042`. Ordering is
/// numeric, so ids past six digits still sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(pub String);

const PLAN_ID_PREFIX: &str = "plan-";

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PLAN_ID_PREFIX}{:06}", self.0)
    }
}

impl FromStr for PlanId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.strip_prefix(PLAN_ID_PREFIX)
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(PlanId)
            .ok_or_else(|| format!("invalid plan id '{raw}'"))
    }
}

impl Serialize for PlanId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlanId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a stored plan came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Generated,
    DoctorReview,
    Feedback,
}

impl PlanSource {
    pub fn label(&self) -> &'static str {
        match self {
            PlanSource::Generated => "generated",
            PlanSource::DoctorReview => "doctor_review",
            PlanSource::Feedback => "feedback",
        }
    }
}

/// Stored plan. Edits never mutate a record; they produce a newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: PlanId,
    pub patient_id: PatientId,
    pub doctor_id: Option<DoctorId>,
    pub created_at: DateTime<Utc>,
    pub source: PlanSource,
    pub assessment: AssessmentReport,
    #[serde(default)]
    pub demographics: Option<DemographicProfile>,
    pub plan: PlanDocument,
    pub summary: PlanSummary,
    #[serde(default)]
    pub feedback_history: Vec<FeedbackEntry>,
}

/// Storage abstraction for plan documents keyed by patient.
pub trait PlanRepository: Send + Sync {
    fn insert(&self, record: PlanRecord) -> Result<PlanRecord, RepositoryError>;
    fn for_patient(&self, patient_id: &PatientId) -> Result<Vec<PlanRecord>, RepositoryError>;

    /// Newest record for the patient. Ordering happens client-side since the
    /// store is not assumed to index creation time.
    fn latest_for_patient(
        &self,
        patient_id: &PatientId,
    ) -> Result<Option<PlanRecord>, RepositoryError> {
        let mut records = self.for_patient(patient_id)?;
        records.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.plan_id.cmp(&left.plan_id))
        });
        Ok(records.into_iter().next())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("plan already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
