use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EvaluationDraft, EvaluationFilter, EvaluationId, EvaluationRecord};
use super::period::{PeriodDescriptor, PeriodKind};
use super::repository::{EvaluationStore, RepositoryError};
use super::scoring::{color_band, format_score, RatingSet};
use super::service::{EvaluationService, EvaluationServiceError};
use crate::workflows::people::{PersonId, ProjectId, Viewer};

/// Query string of the list endpoint. Values stay raw strings so a bad period
/// kind surfaces as a 422 instead of a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub period: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub employee_id: String,
    pub period: String,
    pub period_value: String,
}

pub fn evaluation_router<S>(service: Arc<EvaluationService<S>>) -> Router
where
    S: EvaluationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/evaluations",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/v1/evaluations/lookup", get(lookup_handler::<S>))
        .route("/api/v1/evaluations/preview", post(preview_handler::<S>))
        .route(
            "/api/v1/evaluations/:evaluation_id",
            put(update_handler::<S>).delete(delete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    let period = match query.period.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => match raw.parse::<PeriodKind>() {
            Ok(kind) => Some(kind),
            Err(err) => return unprocessable(err.to_string()),
        },
        None => None,
    };
    let filter = EvaluationFilter {
        period,
        project_id: query
            .project_id
            .filter(|raw| !raw.trim().is_empty())
            .map(ProjectId),
    };

    match service.list(&viewer, &filter) {
        Ok(records) => {
            let rows: Vec<_> = records.iter().map(EvaluationRecord::summary).collect();
            let payload = json!({
                "count": records.len(),
                "rows": rows,
                "evaluations": records,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn lookup_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    headers: HeaderMap,
    Query(query): Query<LookupQuery>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    let period = match query
        .period
        .parse::<PeriodKind>()
        .and_then(|kind| PeriodDescriptor::parse(kind, &query.period_value))
    {
        Ok(period) => period,
        Err(err) => return unprocessable(err.to_string()),
    };

    match service.find_for_period(&viewer, &PersonId(query.employee_id), &period) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no evaluation for {period}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    axum::Json(ratings): axum::Json<RatingSet>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let average = service.preview(&ratings);
    let payload = json!({
        "soft_skills": average,
        "display": format_score(average),
        "band": color_band(average),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<EvaluationDraft>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    match service.create(&viewer, draft) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    headers: HeaderMap,
    Path(evaluation_id): Path<String>,
    axum::Json(draft): axum::Json<EvaluationDraft>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    match service.update(&viewer, &EvaluationId(evaluation_id), draft) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<EvaluationService<S>>>,
    headers: HeaderMap,
    Path(evaluation_id): Path<String>,
) -> Response
where
    S: EvaluationStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    match service.delete(&viewer, &EvaluationId(evaluation_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn missing_viewer() -> Response {
    let payload = json!({ "error": "missing viewer identity" });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn error_response(err: EvaluationServiceError) -> Response {
    let status = match &err {
        EvaluationServiceError::Forbidden => StatusCode::FORBIDDEN,
        EvaluationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationServiceError::NothingDeleted
        | EvaluationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EvaluationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        EvaluationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
