use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::decisions::repository::HistoryId;
use crate::decisions::router::{self, decision_router, HISTORY_ID_HEADER};
use crate::decisions::service::DecisionService;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn evaluate_route_returns_ranking_and_history_header() {
    let (service, store) = build_service();
    let app = decision_router(Arc::new(service));

    let response = app
        .oneshot(post_json(
            "/api/v1/edas",
            json!({
                "alternatives": [
                    { "name": "A", "scores": { "x": 10 } },
                    { "name": "B", "scores": { "x": 20 } }
                ],
                "criteria": [{ "name": "x", "weight": 1, "type": "benefit" }]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let id = response
        .headers()
        .get(HISTORY_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .expect("history id header");
    assert!(HistoryId::parse(&id).is_ok());
    assert_eq!(store.len(), 1);

    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({
            "ranking": [
                { "name": "B", "score": 1.0, "rank": 1 },
                { "name": "A", "score": 0.0, "rank": 2 }
            ]
        })
    );
}

#[tokio::test]
async fn evaluate_route_reports_offending_field() {
    let (service, store) = build_service();
    let app = decision_router(Arc::new(service));

    let response = app
        .oneshot(post_json(
            "/api/v1/edas",
            json!({
                "alternatives": [{ "name": "A", "scores": {} }],
                "criteria": [{ "name": "x", "weight": 1, "type": "benefit" }]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], "alternatives[0].scores.x");
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn evaluate_route_rejects_undecodable_bodies_as_json() {
    let (service, store) = build_service();
    let app = decision_router(Arc::new(service));

    let response = app
        .oneshot(post_json(
            "/api/v1/edas",
            json!({
                "alternatives": [{ "name": "A", "scores": { "x": 1 } }],
                "criteria": [{ "name": "x", "weight": "heavy", "type": "benefit" }]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("weight")));
    assert!(payload.get("field").is_some());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn evaluate_route_rejects_malformed_json_syntax() {
    let (service, _) = build_service();
    let app = decision_router(Arc::new(service));

    let response = app
        .oneshot(
            Request::post("/api/v1/edas")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"alternatives\": ["))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
    assert_eq!(payload["field"], serde_json::Value::Null);
}

#[tokio::test]
async fn evaluate_handler_succeeds_without_history() {
    let service = Arc::new(DecisionService::new(Arc::new(UnavailableStore)));

    let response = router::evaluate_handler::<UnavailableStore>(
        State(service),
        Ok(axum::Json(worked_example())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(HISTORY_ID_HEADER).is_none());
}

#[tokio::test]
async fn history_routes_fetch_list_and_delete() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let id = service
        .evaluate(supplier_request())
        .expect("valid")
        .history_id
        .expect("saved");
    let app = decision_router(service);

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/history/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let record = read_json_body(response).await;
    assert_eq!(record["id"], id.to_string());
    assert_eq!(record["request"]["criteria"][0]["type"], "cost");
    assert_eq!(record["response"]["ranking"][0]["name"], "Initech");

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/v1/history")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let summaries = read_json_body(response).await;
    assert_eq!(summaries.as_array().map(Vec::len), Some(1));
    assert!(summaries[0].get("request").is_none());

    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/api/v1/history/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/history/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_history_ids_are_bad_requests() {
    let (service, _) = build_service();
    let service = Arc::new(service);

    let response =
        router::fetch_handler::<MemoryStore>(State(service.clone()), Path("nope".to_string()))
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        router::delete_handler::<MemoryStore>(State(service), Path("nope".to_string())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_outages_map_to_internal_errors() {
    let service = Arc::new(DecisionService::new(Arc::new(UnavailableStore)));

    let response = router::list_handler::<UnavailableStore>(State(service)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("database offline")));
}
