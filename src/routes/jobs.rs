use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{dto::job_dto::CreateJobPayload, error::Result, AppState};

#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let summaries = state.job_service.list_summaries().await;
    Ok(Json(summaries))
}

#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create_job(payload).await;
    Ok((StatusCode::CREATED, Json(job)))
}

#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let job = state
        .job_service
        .get_job(&id)
        .await
        .found_or(format!("Job {} not found", id))?;
    Ok(Json(job))
}
