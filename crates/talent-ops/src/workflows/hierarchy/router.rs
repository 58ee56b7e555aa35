use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::expansion::ExpansionState;
use super::service::{HierarchyError, HierarchyView, OrgHierarchyService};
use super::store::ProfileStore;

/// Request body for the toggle endpoint: the caller's current state plus the
/// label to flip.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub expansion: Option<ExpansionState>,
    pub label: String,
}

pub fn hierarchy_router<P>(service: Arc<OrgHierarchyService<P>>) -> Router
where
    P: ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/org/hierarchy", get(hierarchy_handler::<P>))
        .route("/api/v1/org/hierarchy/toggle", post(toggle_handler::<P>))
        .with_state(service)
}

pub(crate) async fn hierarchy_handler<P>(
    State(service): State<Arc<OrgHierarchyService<P>>>,
) -> Response
where
    P: ProfileStore + 'static,
{
    match service.refresh() {
        Ok(view) => view_response(view),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn toggle_handler<P>(
    State(service): State<Arc<OrgHierarchyService<P>>>,
    axum::Json(request): axum::Json<ToggleRequest>,
) -> Response
where
    P: ProfileStore + 'static,
{
    match service.refresh() {
        Ok(mut view) => {
            if let Some(expansion) = request.expansion {
                view.expansion = expansion;
            }
            view_response(view.toggle(&request.label))
        }
        Err(err) => error_response(err),
    }
}

fn view_response(view: HierarchyView) -> Response {
    let rows = view.rows();
    let payload = json!({
        "status": "ok",
        "people": view.tree.person_count(),
        "tree": view.tree,
        "expansion": view.expansion,
        "rows": rows,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(err: HierarchyError) -> Response {
    match err {
        HierarchyError::EmptyInput(empty) => {
            let payload = json!({
                "status": "empty",
                "message": empty.to_string(),
                "retryable": true,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        HierarchyError::Store(store) => {
            let payload = json!({
                "error": format!("Failed to load organization hierarchy: {store}"),
                "retryable": true,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::hierarchy::{
        HierarchyBuilder, InMemoryProfileStore, PersonRecord, StoreError,
    };
    use crate::workflows::people::{PersonId, Role};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    struct DownStore;

    impl ProfileStore for DownStore {
        fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
            Err(StoreError::Unavailable("timeout".to_string()))
        }
    }

    fn seeded() -> Arc<OrgHierarchyService<InMemoryProfileStore>> {
        let store = InMemoryProfileStore::new(vec![
            PersonRecord {
                id: PersonId("1".to_string()),
                display_name: Some("Ann".to_string()),
                email: None,
                role: Role::Executive,
                avatar_url: None,
            },
            PersonRecord {
                id: PersonId("2".to_string()),
                display_name: Some("Bo".to_string()),
                email: None,
                role: Role::Employee,
                avatar_url: None,
            },
        ]);
        Arc::new(OrgHierarchyService::new(
            Arc::new(store),
            HierarchyBuilder::default(),
        ))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn hierarchy_route_returns_tree_and_rows() {
        let response = hierarchy_router(seeded())
            .oneshot(
                Request::get("/api/v1/org/hierarchy")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["people"], 2);
        assert_eq!(body["tree"]["type"], "org");
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn toggle_route_applies_client_state() {
        let request = json!({
            "expansion": { "TalentOps Organisation": true },
            "label": "Consultants",
        });
        let response = hierarchy_router(seeded())
            .oneshot(
                Request::post("/api/v1/org/hierarchy/toggle")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(Body::from(request.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router responds");

        let body = body_json(response).await;
        assert_eq!(body["expansion"]["Consultants"], true);
        let last = body["rows"]
            .as_array()
            .and_then(|rows| rows.last())
            .expect("rows present");
        assert_eq!(last["label"], "Bo");
    }

    #[tokio::test]
    async fn store_outage_maps_to_service_unavailable() {
        let service = Arc::new(OrgHierarchyService::new(
            Arc::new(DownStore),
            HierarchyBuilder::default(),
        ));
        let response = hierarchy_handler::<DownStore>(State(service)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
