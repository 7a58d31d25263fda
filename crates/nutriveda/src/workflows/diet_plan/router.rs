use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::agni::check_agni;
use super::progress::ProgressCheckIn;
use super::repository::{PatientId, PlanRepository};
use super::review::PlanFeedback;
use super::service::{
    AssessmentSubmission, DietPlanService, DietPlanServiceError, PlanRequest, ReviewRequest,
};

/// Router builder exposing assessment, plan, review and progress endpoints.
pub fn diet_plan_router<R>(service: Arc<DietPlanService<R>>) -> Router
where
    R: PlanRepository + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler::<R>))
        .route("/api/v1/assessments", post(assess_handler::<R>))
        .route("/api/v1/plans", post(generate_handler::<R>))
        .route(
            "/api/v1/patients/:patient_id/plans/latest",
            get(latest_handler::<R>),
        )
        .route(
            "/api/v1/patients/:patient_id/plans/latest/review",
            post(review_handler::<R>),
        )
        .route(
            "/api/v1/patients/:patient_id/plans/latest/feedback",
            post(feedback_handler::<R>),
        )
        .route(
            "/api/v1/patients/:patient_id/plans/latest/progress",
            post(progress_handler::<R>),
        )
        .route(
            "/api/v1/patients/:patient_id/plans/latest/export",
            get(export_handler::<R>),
        )
        .route(
            "/api/v1/patients/:patient_id/plans/latest/shopping-list",
            get(shopping_list_handler::<R>),
        )
        .route("/api/v1/agni", post(agni_handler))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
) -> Response
where
    R: PlanRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.questionnaire())).into_response()
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.assess(&submission) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn generate_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    axum::Json(request): axum::Json<PlanRequest>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.generate(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    Path(patient_id): Path<String>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.latest(&PatientId(patient_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    Path(patient_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.review(&PatientId(patient_id), request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn feedback_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    Path(patient_id): Path<String>,
    axum::Json(feedback): axum::Json<PlanFeedback>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.record_feedback(&PatientId(patient_id), feedback) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    Path(patient_id): Path<String>,
    axum::Json(check_in): axum::Json<ProgressCheckIn>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.progress(&PatientId(patient_id), &check_in) {
        Ok(insights) => (StatusCode::OK, axum::Json(insights)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    Path(patient_id): Path<String>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.export_for_review(&PatientId(patient_id)) {
        Ok(export) => (StatusCode::OK, axum::Json(export)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn shopping_list_handler<R>(
    State(service): State<Arc<DietPlanService<R>>>,
    Path(patient_id): Path<String>,
) -> Response
where
    R: PlanRepository + 'static,
{
    match service.shopping_list(&PatientId(patient_id)) {
        Ok(list) => (StatusCode::OK, axum::Json(list)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgniQuery {
    is_hungry: bool,
}

pub(crate) async fn agni_handler(axum::Json(query): axum::Json<AgniQuery>) -> Response {
    (StatusCode::OK, axum::Json(check_agni(query.is_hungry))).into_response()
}

fn error_response(error: DietPlanServiceError) -> Response {
    let status = match &error {
        DietPlanServiceError::Questionnaire(_)
        | DietPlanServiceError::Engine(_)
        | DietPlanServiceError::Review(_)
        | DietPlanServiceError::Progress(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DietPlanServiceError::PlanNotFound(_) => StatusCode::NOT_FOUND,
        DietPlanServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
