use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::evaluations::router::{create_handler, evaluation_router};
use crate::workflows::evaluations::EvaluationService;
use crate::workflows::people::{VIEWER_ID_HEADER, VIEWER_ROLE_HEADER};

fn viewer_headers(id: &str, role: &str) -> axum::http::HeaderMap {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(VIEWER_ID_HEADER, id.parse().expect("header value"));
    headers.insert(VIEWER_ROLE_HEADER, role.parse().expect("header value"));
    headers
}

#[tokio::test]
async fn create_route_returns_created_record() {
    let (service, _) = build_service();
    let body = json!({
        "employee_id": "emp-1",
        "period": "quarter",
        "period_value": "Q1 2025",
        "score": 8,
        "ratings": { "accountability": 9, "skill_english": "7", "charisma": 10 },
        "review": "Solid quarter",
    });

    let response = evaluation_router(service)
        .oneshot(
            Request::post("/api/v1/evaluations")
                .header(header::CONTENT_TYPE, "application/json")
                .header(VIEWER_ID_HEADER, "mgr-1")
                .header(VIEWER_ROLE_HEADER, "manager")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = body_json(response).await;
    assert_eq!(payload["soft_skills"], 8.0);
    assert_eq!(payload["period_value"], "Q1 2025");
    assert_eq!(payload["given_by_role"], "Manager");
}

#[tokio::test]
async fn create_handler_forbids_employees() {
    let (service, _) = build_service();
    let response = create_handler(
        State(service),
        viewer_headers("emp-1", "employee"),
        axum::Json(draft_for("emp-1")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_handler_maps_outage_to_service_unavailable() {
    let service = Arc::new(EvaluationService::new(Arc::new(UnavailableStore)));
    let response = create_handler(
        State(service),
        viewer_headers("mgr-1", "manager"),
        axum::Json(draft_for("emp-1")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn requests_without_viewer_are_unauthorized() {
    let (service, _) = build_service();
    let response = evaluation_router(service)
        .oneshot(
            Request::get("/api/v1/evaluations")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_route_rejects_unknown_period_kind() {
    let (service, _) = build_service();
    let response = evaluation_router(service)
        .oneshot(
            Request::get("/api/v1/evaluations?period=weekly")
                .header(VIEWER_ID_HEADER, "mgr-1")
                .header(VIEWER_ROLE_HEADER, "manager")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_route_renders_summary_rows() {
    let (service, _) = build_service();
    service
        .create(&manager(), draft_for("emp-1"))
        .expect("created");

    let response = evaluation_router(service)
        .oneshot(
            Request::get("/api/v1/evaluations?period=month")
                .header(VIEWER_ID_HEADER, "emp-1")
                .header(VIEWER_ROLE_HEADER, "employee")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["rows"][0]["period"], "January 2025");
    assert_eq!(payload["rows"][0]["score"], "7.5");
    assert_eq!(payload["rows"][0]["soft_skills"], "7.0");
    assert_eq!(payload["rows"][0]["soft_skills_band"], "warning");
}

#[tokio::test]
async fn preview_route_formats_average() {
    let (service, _) = build_service();
    let response = evaluation_router(service)
        .oneshot(
            Request::post("/api/v1/evaluations/preview")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "curiosity": 9, "english": 0, "ambitious": "abc" }).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("router responds");

    let payload = body_json(response).await;
    assert_eq!(payload["display"], "9.0");
    assert_eq!(payload["band"], "good");
}

#[tokio::test]
async fn lookup_and_delete_routes() {
    let (service, _) = build_service();
    let created = service
        .create(&manager(), draft_for("emp-1"))
        .expect("created");
    let router = evaluation_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::get(
                "/api/v1/evaluations/lookup?employee_id=emp-1&period=month&period_value=January%202025",
            )
            .header(VIEWER_ID_HEADER, "emp-1")
            .body(Body::empty())
            .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(
            Request::delete(format!("/api/v1/evaluations/{}", created.id.0))
                .header(VIEWER_ID_HEADER, "mgr-1")
                .header(VIEWER_ROLE_HEADER, "manager")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::delete(format!("/api/v1/evaluations/{}", created.id.0))
                .header(VIEWER_ID_HEADER, "mgr-1")
                .header(VIEWER_ROLE_HEADER, "manager")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
