use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::calendar::YearMonth;
use super::domain::{DateRange, Employee};
use super::evaluation::EvaluationWindow;
use super::repository::SnapshotStore;
use super::service::{EvaluationService, EvaluationServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeEvaluationRequest {
    pub employee: Employee,
    pub attendance_month: YearMonth,
    #[serde(default)]
    pub range: Option<DateRange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMetricsRequest {
    pub employee: Employee,
    pub month: YearMonth,
}

/// Router builder exposing the snapshot and evaluation endpoints.
pub fn evaluation_router<S>(service: Arc<EvaluationService<S>>) -> Router
where
    S: SnapshotStore + 'static,
{
    Router::new()
        .route("/api/v1/snapshot", put(publish_handler::<S>))
        .route("/api/v1/evaluations", post(team_handler::<S>))
        .route("/api/v1/evaluations/employee", post(employee_handler::<S>))
        .route("/api/v1/attendance/metrics", post(attendance_handler::<S>))
        .with_state(service)
}

pub(crate) async fn publish_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    axum::Json(raw): axum::Json<Value>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    match service.publish(&raw) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn team_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    axum::Json(window): axum::Json<EvaluationWindow>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    match service.team_report(window) {
        Ok(report) => (StatusCode::OK, axum::Json(report.summary())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    axum::Json(request): axum::Json<EmployeeEvaluationRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    let window = EvaluationWindow {
        attendance_month: request.attendance_month,
        range: request.range,
    };

    match service.evaluate_employee(&request.employee, window) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn attendance_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    axum::Json(request): axum::Json<AttendanceMetricsRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
{
    match service.attendance(&request.employee, request.month) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_status(error: &EvaluationServiceError) -> StatusCode {
    match error {
        EvaluationServiceError::NoSnapshot => StatusCode::NOT_FOUND,
        EvaluationServiceError::Snapshot(_) => StatusCode::BAD_REQUEST,
        EvaluationServiceError::Identity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: EvaluationServiceError) -> Response {
    let status = error_status(&error);
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
