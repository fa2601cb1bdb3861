use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::{SubmitApplicationPayload, TransitionApplicationPayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let applications = state
        .job_service
        .list_applications(&id)
        .await
        .found_or(format!("Job {} not found", id))?;
    Ok(Json(applications))
}

#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service_id = payload.service_id.clone();
    let result = state
        .job_service
        .submit_application(&id, payload)
        .await?
        .found_or(format!("Job {} or service {} not found", id, service_id))?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Decision endpoint; checkout calls it with `accepted` once payment clears.
#[axum::debug_handler]
pub async fn transition_application(
    State(state): State<AppState>,
    Path((id, application_id)): Path<(String, String)>,
    Json(payload): Json<TransitionApplicationPayload>,
) -> Result<impl IntoResponse> {
    let result = state
        .job_service
        .transition_application(&id, &application_id, payload.status)
        .await
        .found_or(format!(
            "Application {} not found on job {}",
            application_id, id
        ))?;
    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
) -> Result<impl IntoResponse> {
    let result = state
        .job_service
        .get_application(&application_id)
        .await
        .found_or(format!("Application {} not found", application_id))?;
    Ok(Json(result))
}
