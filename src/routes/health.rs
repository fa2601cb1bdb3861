use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

/// Liveness plus a cheap read of the job collection, so a broken store shows up here.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let summaries = state.job_service.list_summaries().await;
    let open_jobs = summaries
        .iter()
        .filter(|s| s.status.accepts_applications())
        .count();
    let body = json!({
        "status": "ok",
        "jobs": summaries.len(),
        "acceptingApplications": open_jobs,
        "defaultCountry": state.job_service.default_country(),
    });
    (StatusCode::OK, Json(body))
}
