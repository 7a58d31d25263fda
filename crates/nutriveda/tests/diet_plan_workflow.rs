//! End-to-end scenarios for the assessment to diet plan workflow.
//!
//! Scenarios drive the public service facade and HTTP router only, the way a
//! consuming service would.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use nutriveda::workflows::diet_plan::domain::{AnswerSelection, DoshaAxis, QuestionId};
    use nutriveda::workflows::diet_plan::{
        AssessmentMode, DietPlanService, EngineConfig, PatientId, PlanRecord, PlanRepository,
        PlanRequest, RepositoryError,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<PatientId, Vec<PlanRecord>>>>,
    }

    impl PlanRepository for MemoryRepository {
        fn insert(&self, record: PlanRecord) -> Result<PlanRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            guard
                .entry(record.patient_id.clone())
                .or_default()
                .push(record.clone());
            Ok(record)
        }

        fn for_patient(
            &self,
            patient_id: &PatientId,
        ) -> Result<Vec<PlanRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(patient_id).cloned().unwrap_or_default())
        }
    }

    pub(super) fn service(
        mode: AssessmentMode,
        seed: u64,
    ) -> DietPlanService<MemoryRepository> {
        DietPlanService::new(
            Arc::new(MemoryRepository::default()),
            EngineConfig {
                assessment_mode: mode,
                selection_seed: Some(seed),
                ..EngineConfig::default()
            },
        )
        .expect("default composer config is valid")
    }

    pub(super) fn request(patient: &str, axes: &[DoshaAxis]) -> PlanRequest {
        PlanRequest {
            patient_id: PatientId(patient.to_string()),
            doctor_id: None,
            answers: axes
                .iter()
                .zip(1..)
                .map(|(axis, id)| AnswerSelection {
                    question_id: QuestionId(id),
                    axis: *axis,
                })
                .collect(),
            demographics: None,
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use nutriveda::workflows::diet_plan::composer::tables;
use nutriveda::workflows::diet_plan::domain::{DemographicProfile, DoshaAxis, MealSlot};
use nutriveda::workflows::diet_plan::{
    diet_plan_router, AssessmentMode, ConstitutionLabel, PlanEdit, PlanFeedback, ReviewRequest,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use DoshaAxis::{Kapha, Pitta, Vata};

#[test]
fn basic_assessment_yields_vata_dominant_plan_with_pitta_blend() {
    let service = service(AssessmentMode::Basic, 7);
    let record = service
        .generate(request(
            "integration-vata",
            &[Vata, Vata, Vata, Vata, Vata, Pitta, Pitta, Pitta],
        ))
        .expect("plan generated");

    assert_eq!(record.assessment.scores.vata, 10);
    assert_eq!(record.assessment.scores.pitta, 6);
    assert_eq!(record.plan.constitution, ConstitutionLabel::Dominant(Vata));

    let blend = record.plan.secondary_blend.expect("pitta blend recorded");
    assert_eq!(blend.axis, Pitta);
    assert_eq!(blend.snack_items.len(), 1);
    assert_eq!(blend.spices.len(), 2);

    let kapha = tables::table(Kapha);
    let vata = tables::table(Vata);
    for slot in MealSlot::ordered() {
        for item in &record.plan.meals.get(slot).items {
            assert!(
                vata.contains(item) || !kapha.contains(item),
                "{item} came from the kapha table"
            );
        }
    }
}

#[test]
fn near_even_answers_classify_as_tri_doshic() {
    let service = service(AssessmentMode::Enhanced, 1);
    let report = service
        .assess(&nutriveda::workflows::diet_plan::AssessmentSubmission {
            answers: request(
                "integration-balanced",
                &[
                    Vata, Vata, Vata, Pitta, Vata, Pitta, Pitta, Pitta, Kapha, Kapha, Kapha, Kapha,
                ],
            )
            .answers,
            demographics: None,
        })
        .expect("assessment succeeds");

    // 9 / 9 / 8 points
    assert_eq!(report.scores.total(), 26);
    assert_eq!(report.profile.label, ConstitutionLabel::Balanced);
    assert_eq!(report.profile.label.to_string(), "tri-doshic (balanced)");
}

#[test]
fn review_and_feedback_build_a_plan_history() {
    let service = service(AssessmentMode::Enhanced, 11);
    let generated = service
        .generate(request("integration-history", &[Kapha; 12]))
        .expect("plan generated");
    assert_eq!(generated.plan.constitution.to_string(), "kapha-dominant");

    service
        .review(
            &generated.patient_id,
            ReviewRequest {
                doctor_id: nutriveda::workflows::diet_plan::DoctorId("dr-k".to_string()),
                edits: vec![PlanEdit::EditMealItem {
                    slot: MealSlot::Breakfast,
                    index: 0,
                    item: "Millet porridge".to_string(),
                }],
            },
        )
        .expect("review applied");
    let latest = service
        .record_feedback(&generated.patient_id, PlanFeedback::default())
        .expect("feedback recorded");

    assert_eq!(latest.plan.meals.breakfast.items[0], "Millet porridge");
    assert_eq!(latest.feedback_history.len(), 1);

    let list = service
        .shopping_list(&generated.patient_id)
        .expect("shopping list");
    assert_eq!(list.other, vec!["Millet porridge".to_string()]);
}

#[tokio::test]
async fn router_serves_plan_for_vegan_patient() {
    let app = diet_plan_router(Arc::new(service(AssessmentMode::Enhanced, 21)));
    let demographics = DemographicProfile {
        dietary_preference: nutriveda::workflows::diet_plan::domain::DietaryPreference::Vegan,
        ..DemographicProfile::default()
    };
    let answers: Vec<Value> = (1..=12)
        .map(|id| json!({ "question_id": id, "axis": if id % 3 == 0 { "kapha" } else { "pitta" } }))
        .collect();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/plans")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "patient_id": "integration-vegan",
                        "answers": answers,
                        "demographics": demographics,
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["plan"]["dominant"], "pitta");

    let items = payload["plan"]["meals"]["lunch"]["items"]
        .as_array()
        .expect("lunch items");
    assert!(items
        .iter()
        .all(|item| item != "Ghee (small amount)"));
}
