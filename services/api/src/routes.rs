use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use serde_json::json;
use talent_ops::workflows::documents::{document_router, DocumentService, DocumentStore};
use talent_ops::workflows::evaluations::{evaluation_router, EvaluationService, EvaluationStore};
use talent_ops::workflows::hierarchy::{hierarchy_router, OrgHierarchyService, ProfileStore};
use talent_ops::workflows::lifecycle::{lifecycle_router, LifecycleService, LifecycleStore};

use crate::infra::AppState;

/// Services backing the HTTP surface.
pub(crate) struct Services<P, E, L, D> {
    pub(crate) hierarchy: Arc<OrgHierarchyService<P>>,
    pub(crate) evaluations: Arc<EvaluationService<E>>,
    pub(crate) lifecycle: Arc<LifecycleService<L>>,
    pub(crate) documents: Arc<DocumentService<D>>,
}

pub(crate) fn with_workflow_routes<P, E, L, D>(services: Services<P, E, L, D>) -> Router
where
    P: ProfileStore + 'static,
    E: EvaluationStore + 'static,
    L: LifecycleStore + 'static,
    D: DocumentStore + 'static,
{
    hierarchy_router(services.hierarchy)
        .merge(evaluation_router(services.evaluations))
        .merge(lifecycle_router(services.lifecycle))
        .merge(document_router(services.documents))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };
    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
