use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::domain::{DocumentDraft, DocumentId, DocumentUpdate};
use super::service::{DocumentService, DocumentServiceError};
use super::store::{DocumentStore, DocumentStoreError};
use crate::workflows::people::{ProjectId, Viewer};

pub fn document_router<S>(service: Arc<DocumentService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects/:project_id/documents",
            get(list_handler::<S>),
        )
        .route("/api/v1/documents", post(create_handler::<S>))
        .route(
            "/api/v1/documents/:document_id",
            put(update_handler::<S>).delete(delete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<DocumentService<S>>>,
    Path(project_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let project = ProjectId(project_id);
    let listing = service
        .list(&project)
        .and_then(|documents| Ok((documents, service.type_counts(&project)?)));
    match listing {
        Ok((documents, counts)) => {
            let counts: serde_json::Map<String, serde_json::Value> = counts
                .into_iter()
                .map(|(kind, count)| (kind.key().to_string(), json!(count)))
                .collect();
            let payload = json!({
                "documents": documents,
                "type_counts": counts,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<DocumentService<S>>>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<DocumentDraft>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    match service.create(&viewer, draft) {
        Ok(document) => (StatusCode::CREATED, axum::Json(document)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<DocumentService<S>>>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
    axum::Json(update): axum::Json<DocumentUpdate>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    match service.update(&viewer, &DocumentId(document_id), update) {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<DocumentService<S>>>,
    headers: HeaderMap,
    Path(document_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    let Some(viewer) = Viewer::from_headers(&headers) else {
        return missing_viewer();
    };
    match service.delete(&viewer, &DocumentId(document_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn missing_viewer() -> Response {
    let payload = json!({ "error": "missing viewer identity" });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

fn error_response(err: DocumentServiceError) -> Response {
    let status = match &err {
        DocumentServiceError::Forbidden => StatusCode::FORBIDDEN,
        DocumentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DocumentServiceError::Store(DocumentStoreError::NotFound) => StatusCode::NOT_FOUND,
        DocumentServiceError::Store(DocumentStoreError::Conflict) => StatusCode::CONFLICT,
        DocumentServiceError::Store(DocumentStoreError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::documents::{IndexDispatcher, InMemoryDocumentStore};
    use crate::workflows::people::{VIEWER_ID_HEADER, VIEWER_ROLE_HEADER};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn router() -> Router {
        document_router(Arc::new(DocumentService::new(
            Arc::new(InMemoryDocumentStore::default()),
            IndexDispatcher::disabled(),
        )))
    }

    #[tokio::test]
    async fn upload_then_list_with_counts() {
        let router = router();
        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/documents")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(VIEWER_ID_HEADER, "lead-1")
                    .header(VIEWER_ROLE_HEADER, "team_lead")
                    .body(Body::from(
                        json!({
                            "project_id": "apollo",
                            "title": "Architecture",
                            "doc_type": "whiteboard",
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(
                Request::get("/api/v1/projects/apollo/documents")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["documents"][0]["doc_type"], "other");
        assert_eq!(body["type_counts"]["other"], 1);
        assert_eq!(body["type_counts"]["requirements"], 0);
    }

    #[tokio::test]
    async fn employees_are_forbidden() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/documents")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(VIEWER_ID_HEADER, "emp-1")
                    .header(VIEWER_ROLE_HEADER, "employee")
                    .body(Body::from(
                        json!({ "project_id": "apollo", "title": "Notes" }).to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
