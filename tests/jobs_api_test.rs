use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use marketplace_backend::{
    database::memory_store::MemoryKeyValueStore,
    routes,
    services::{job_service::JobService, job_store::JobStore, meta_service::MetaService},
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn setup_app() -> Router {
    let store = JobStore::new(Arc::new(MemoryKeyValueStore::new()), 16);
    let state = AppState::from_parts(
        JobService::new(store, "AE"),
        MetaService::new(reqwest::Client::new(), None),
    );
    routes::api_router().with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let res = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn consumer_job() -> JsonValue {
    json!({
        "title": "Move-out cleaning",
        "category": "Cleaning",
        "description": "Three bedroom villa",
        "schedule": { "from": "2025-03-01T08:00:00Z", "to": "2025-03-01T12:00:00Z" },
        "address": "Arabian Ranches, Dubai",
        "countryCode": "AE",
        "services": [
            { "label": "Deep Cleaning", "providersRequired": 2, "durationMinutes": 120 },
            { "label": "Window Cleaning", "providersRequired": 3, "durationMinutes": 60 }
        ]
    })
}

#[tokio::test]
async fn lists_seeded_jobs() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 4);

    let electrical = items.iter().find(|j| j["id"] == "j2").unwrap();
    assert_eq!(electrical["title"], "Electrical Help");
    assert_eq!(electrical["status"], "in_progress");
    assert_eq!(electrical["appliedCount"], 1);
}

#[tokio::test]
async fn create_job_prices_services_and_round_trips() {
    let app = setup_app();

    let (status, created) = send(&app, "POST", "/api/jobs", Some(consumer_job())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["services"][0]["priceMinor"], 48000);
    assert_eq!(created["services"][1]["priceMinor"], 36000);
    assert_eq!(created["priceMinor"], 84000);
    assert_eq!(created["rateLabel"], "AED 840/job");
    assert_eq!(created["capacity"], 5);
    assert_eq!(created["status"], "open");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/jobs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, list) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(list[0]["id"], created["id"]);
    assert_eq!(list[0]["appliedCount"], 0);
}

#[tokio::test]
async fn create_job_validates_payload() {
    let app = setup_app();

    let mut no_services = consumer_job();
    no_services["services"] = json!([]);
    let (status, body) = send(&app, "POST", "/api/jobs", Some(no_services)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let mut reversed = consumer_job();
    reversed["schedule"] = json!({ "from": "2025-03-02T08:00:00Z", "to": "2025-03-01T08:00:00Z" });
    let (status, _) = send(&app, "POST", "/api/jobs", Some(reversed)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_line_items_are_rejected_not_priced() {
    let app = setup_app();

    let mut job = consumer_job();
    job["services"] = json!([
        { "label": "Crew", "providersRequired": 4294967295u32, "durationMinutes": 4294967295u32, "hourlyRateMinor": 9223372036854775807i64 }
    ]);
    let (status, body) = send(&app, "POST", "/api/jobs", Some(job)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let quote = json!({
        "services": [
            { "label": "A", "providersRequired": 2, "priceMinor": 9223372036854775807i64 },
            { "label": "B", "providersRequired": 2, "priceMinor": 9223372036854775807i64 }
        ]
    });
    let (status, _) = send(&app, "POST", "/api/pricing/quote", Some(quote)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(list.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn health_reports_job_counts() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["jobs"], 4);
    assert_eq!(body["acceptingApplications"], 2);
    assert_eq!(body["defaultCountry"], "AE");
}

#[tokio::test]
async fn unknown_job_is_404() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/api/jobs/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job nope not found");
}

#[tokio::test]
async fn quote_does_not_persist() {
    let app = setup_app();

    let quote = json!({ "countryCode": "AE", "services": consumer_job()["services"] });
    let (status, body) = send(&app, "POST", "/api/pricing/quote", Some(quote)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalMinor"], 84000);
    assert_eq!(body["rateLabel"], "AED 840/job");
    assert_eq!(body["currency"], "AED");

    let (_, list) = send(&app, "GET", "/api/jobs", None).await;
    assert_eq!(list.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn countries_fall_back_to_default() {
    let app = setup_app();

    let (status, list) = send(&app, "GET", "/api/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 6);

    let (_, unknown) = send(&app, "GET", "/api/countries/ZZ", None).await;
    assert_eq!(unknown["code"], "AE");
    assert_eq!(unknown["hourlyRateMinor"], 12000);
}

#[tokio::test]
async fn meta_lists_need_configured_upstream() {
    let app = setup_app();

    let (status, _) = send(&app, "GET", "/api/meta/languages", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
