use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::service::{LifecycleService, LifecycleServiceError, StageChangeRequest};
use super::store::{LifecycleStore, LifecycleStoreError};
use crate::workflows::people::{PersonId, Viewer};

pub fn lifecycle_router<S>(service: Arc<LifecycleService<S>>) -> Router
where
    S: LifecycleStore + 'static,
{
    Router::new()
        .route("/api/v1/lifecycle/employees", get(employees_handler::<S>))
        .route(
            "/api/v1/lifecycle/employees/:employee_id/history",
            get(history_handler::<S>),
        )
        .route(
            "/api/v1/lifecycle/employees/:employee_id/stage",
            post(change_stage_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn employees_handler<S>(
    State(service): State<Arc<LifecycleService<S>>>,
) -> Response
where
    S: LifecycleStore + 'static,
{
    match service.employees() {
        Ok(employees) => {
            let rows: Vec<_> = employees
                .iter()
                .map(|profile| {
                    json!({
                        "id": profile.id,
                        "full_name": profile.full_name,
                        "email": profile.email,
                        "stage": profile.employee_stage.label(),
                        "track": profile.track_label(),
                    })
                })
                .collect();
            (StatusCode::OK, axum::Json(json!({ "employees": rows }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<S>(
    State(service): State<Arc<LifecycleService<S>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    S: LifecycleStore + 'static,
{
    match service.history(&PersonId(employee_id)) {
        Ok(history) => {
            let rows: Vec<_> = history
                .iter()
                .map(|change| {
                    json!({
                        "transition": change.transition_label(),
                        "change": change,
                    })
                })
                .collect();
            (StatusCode::OK, axum::Json(json!({ "history": rows }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn change_stage_handler<S>(
    State(service): State<Arc<LifecycleService<S>>>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    axum::Json(request): axum::Json<StageChangeRequest>,
) -> Response
where
    S: LifecycleStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        let payload = json!({ "error": "missing viewer identity" });
        return (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response();
    };
    match service.change_stage(&viewer, &PersonId(employee_id), request) {
        Ok(change) => (StatusCode::OK, axum::Json(change)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: LifecycleServiceError) -> Response {
    let status = match &err {
        LifecycleServiceError::Forbidden => StatusCode::FORBIDDEN,
        LifecycleServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LifecycleServiceError::Store(LifecycleStoreError::UnknownEmployee(_)) => {
            StatusCode::NOT_FOUND
        }
        LifecycleServiceError::Store(LifecycleStoreError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({
        "error": format!("Failed to update stage: {err}"),
    });
    (status, axum::Json(payload)).into_response()
}
