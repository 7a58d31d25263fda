use std::sync::Arc;

use super::common::*;
use crate::workflows::diet_plan::assessment::{AssessmentMode, PotentialImbalance, QuestionnaireError};
use crate::workflows::diet_plan::domain::{MealSlot, QuestionId};
use crate::workflows::diet_plan::repository::{
    DoctorId, PatientId, PlanId, PlanRepository, PlanSource, RepositoryError,
};
use crate::workflows::diet_plan::review::{
    DigestionQuality, EnergyLevel, PlanEdit, PlanFeedback, ReviewError,
};
use crate::workflows::diet_plan::service::{DietPlanService, DietPlanServiceError, ReviewRequest};
use crate::workflows::diet_plan::progress::{AdherenceLevel, ProgressCheckIn};
use crate::workflows::diet_plan::summary::Priority;

#[test]
fn generate_stores_plan_with_summary() {
    let (service, repository) = build_service(AssessmentMode::Enhanced);
    let mut request = plan_request("patient-1", answers(2, 8, 2));
    request.doctor_id = Some(DoctorId("dr-rao".to_string()));
    request.demographics = Some(demographics());

    let record = service.generate(request).expect("plan generated");

    assert!(record.plan_id.to_string().starts_with("plan-"));
    assert_eq!(record.source, PlanSource::Generated);
    assert_eq!(record.doctor_id, Some(DoctorId("dr-rao".to_string())));
    assert_eq!(repository.count(&record.patient_id), 1);

    assert_eq!(record.summary.constitution, record.plan.constitution);
    assert_eq!(
        record.summary.key_recommendations[0],
        format!(
            "Your primary dosha is {}",
            record.plan.dominant.key().to_ascii_uppercase()
        )
    );
    assert!(record
        .summary
        .focus_areas
        .iter()
        .any(|area| area.area == "Sleep Quality" && area.priority == Priority::Medium));
    assert!(record
        .assessment
        .imbalances
        .contains(&PotentialImbalance::MaturePhase));
    assert_eq!(
        record.plan.seasonal_adjustment.as_deref(),
        Some(crate::workflows::diet_plan::composer::tables::seasonal_adjustment(
            crate::workflows::diet_plan::domain::Season::Winter
        ))
    );
    assert!(record
        .plan
        .recommendations
        .contains(&"Eat mindfully and chew food thoroughly".to_string()));
}

#[test]
fn generate_rejects_unknown_questions_without_storing() {
    let (service, repository) = build_service(AssessmentMode::Basic);

    let result = service.generate(plan_request("patient-2", answers(6, 3, 0)));

    match result {
        Err(DietPlanServiceError::Questionnaire(QuestionnaireError::UnknownQuestion(id))) => {
            assert_eq!(id, QuestionId(9));
        }
        other => panic!("expected unknown question, got {other:?}"),
    }
    assert_eq!(repository.count(&PatientId("patient-2".to_string())), 0);
}

#[test]
fn latest_returns_not_found_for_new_patient() {
    let (service, _) = build_service(AssessmentMode::Enhanced);
    let patient = PatientId("nobody".to_string());

    match service.latest(&patient) {
        Err(DietPlanServiceError::PlanNotFound(missing)) => assert_eq!(missing, patient),
        other => panic!("expected missing plan, got {other:?}"),
    }
}

#[test]
fn latest_breaks_timestamp_ties_on_numeric_plan_id() {
    let (service, repository) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-9", answers(6, 4, 2)))
        .expect("plan generated");

    for id in [1_000_000, 999_999] {
        let mut copy = generated.clone();
        copy.plan_id = PlanId(id);
        repository.insert(copy).expect("stored");
    }

    let latest = repository
        .latest_for_patient(&generated.patient_id)
        .expect("history readable")
        .expect("plan present");
    assert_eq!(latest.created_at, generated.created_at);
    assert_eq!(latest.plan_id, PlanId(1_000_000));
    assert_eq!(latest.plan_id.to_string(), "plan-1000000");
    assert_eq!("plan-000042".parse::<PlanId>(), Ok(PlanId(42)));
}

#[test]
fn review_stores_a_new_record_and_keeps_the_original() {
    let (service, repository) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-3", answers(8, 2, 2)))
        .expect("plan generated");

    let reviewed = service
        .review(
            &generated.patient_id,
            ReviewRequest {
                doctor_id: DoctorId("dr-iyer".to_string()),
                edits: vec![
                    PlanEdit::AddMealItem {
                        slot: MealSlot::Dinner,
                        item: "Khichdi".to_string(),
                    },
                    PlanEdit::RemoveRecommendation { index: 0 },
                ],
            },
        )
        .expect("review applied");

    assert_ne!(reviewed.plan_id, generated.plan_id);
    assert_eq!(reviewed.source, PlanSource::DoctorReview);
    assert_eq!(reviewed.doctor_id, Some(DoctorId("dr-iyer".to_string())));
    assert_eq!(
        reviewed.plan.meals.dinner.items.last().map(String::as_str),
        Some("Khichdi")
    );
    assert_eq!(
        reviewed.plan.recommendations.len() + 1,
        generated.plan.recommendations.len()
    );
    assert_eq!(repository.count(&generated.patient_id), 2);

    let history = repository
        .for_patient(&generated.patient_id)
        .expect("history readable");
    assert!(history.iter().any(|record| record.plan == generated.plan));

    let latest = service.latest(&generated.patient_id).expect("latest plan");
    assert_eq!(latest.plan_id, reviewed.plan_id);
}

#[test]
fn invalid_review_leaves_history_untouched() {
    let (service, repository) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-4", answers(4, 4, 4)))
        .expect("plan generated");

    let result = service.review(
        &generated.patient_id,
        ReviewRequest {
            doctor_id: DoctorId("dr-iyer".to_string()),
            edits: vec![PlanEdit::EditRecommendation {
                index: 0,
                text: "   ".to_string(),
            }],
        },
    );

    assert!(matches!(
        result,
        Err(DietPlanServiceError::Review(ReviewError::BlankText))
    ));
    assert_eq!(repository.count(&generated.patient_id), 1);
}

#[test]
fn feedback_appends_history_and_adjusts_the_plan() {
    let (service, _) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-5", answers(3, 3, 6)))
        .expect("plan generated");

    let adjusted = service
        .record_feedback(
            &generated.patient_id,
            PlanFeedback {
                energy_level: Some(EnergyLevel::Low),
                digestion: Some(DigestionQuality::Good),
                notes: Some("Feeling heavy after dinner".to_string()),
            },
        )
        .expect("feedback recorded");

    assert_eq!(adjusted.source, PlanSource::Feedback);
    assert_eq!(adjusted.feedback_history.len(), 1);
    assert_eq!(
        adjusted.feedback_history[0].adjustments,
        vec!["Consider adding more warming spices and proteins".to_string()]
    );
    assert_eq!(
        adjusted.plan.recommendations.len(),
        generated.plan.recommendations.len() + 1
    );

    let again = service
        .record_feedback(&generated.patient_id, PlanFeedback::default())
        .expect("feedback recorded");
    assert_eq!(again.feedback_history.len(), 2);
    assert!(again.feedback_history[1].adjustments.is_empty());
}

#[test]
fn shopping_list_covers_latest_plan() {
    let (service, _) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-6", answers(12, 0, 0)))
        .expect("plan generated");

    let list = service
        .shopping_list(&generated.patient_id)
        .expect("shopping list");

    assert_eq!(list.spices, generated.plan.spices);
    assert!(list.other.is_empty());
    for item in generated.plan.meal_items() {
        assert!(
            list.grains.iter()
                .chain(&list.vegetables)
                .chain(&list.fruits)
                .chain(&list.proteins)
                .chain(&list.fats)
                .chain(&list.spices)
                .chain(&list.beverages)
                .any(|listed| listed == item),
            "{item} missing from list"
        );
    }
}

#[test]
fn repository_failures_propagate() {
    let service = DietPlanService::new(
        Arc::new(UnavailableRepository),
        engine_config(AssessmentMode::Enhanced),
    )
    .expect("valid config");

    let result = service.generate(plan_request("patient-8", answers(4, 4, 4)));
    assert!(matches!(
        result,
        Err(DietPlanServiceError::Repository(RepositoryError::Unavailable(_)))
    ));

    let latest = service.latest(&PatientId("patient-8".to_string()));
    assert!(matches!(
        latest,
        Err(DietPlanServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn progress_counts_days_from_the_first_plan() {
    let (service, _) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-10", answers(6, 4, 2)))
        .expect("plan generated");

    let insights = service
        .progress(&generated.patient_id, &ProgressCheckIn::default())
        .expect("progress assessed");

    assert_eq!(insights.days_on_plan, 0);
    assert_eq!(insights.adherence.level, AdherenceLevel::Low);
    assert_eq!(
        insights.next_steps[0],
        "Continue following the current plan for at least one more week"
    );

    let missing = service.progress(&PatientId("nobody".to_string()), &ProgressCheckIn::default());
    assert!(matches!(missing, Err(DietPlanServiceError::PlanNotFound(_))));
}

#[test]
fn export_follows_the_latest_revision() {
    let (service, _) = build_service(AssessmentMode::Enhanced);
    let generated = service
        .generate(plan_request("patient-11", answers(2, 2, 8)))
        .expect("plan generated");
    let reviewed = service
        .review(
            &generated.patient_id,
            ReviewRequest {
                doctor_id: DoctorId("dr-iyer".to_string()),
                edits: vec![PlanEdit::AddRecommendation {
                    text: "Walk after meals".to_string(),
                }],
            },
        )
        .expect("review applied");

    let export = service
        .export_for_review(&generated.patient_id)
        .expect("export built");

    assert_eq!(export.plan_id, reviewed.plan_id);
    assert_eq!(export.doctor_id, Some(DoctorId("dr-iyer".to_string())));
    assert_eq!(export.assessment.constitution, reviewed.plan.constitution);
    assert_eq!(
        export.assessment.category_breakdown,
        reviewed.assessment.category_breakdown
    );
    assert_eq!(export.focus_areas, reviewed.summary.focus_areas);
    assert!(export.doctor_notes.is_empty());
}
