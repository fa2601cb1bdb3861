use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn list_service_types(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let options = state.meta_service.fetch_service_types().await?;
    Ok(Json(options))
}

#[axum::debug_handler]
pub async fn list_languages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let options = state.meta_service.fetch_languages().await?;
    Ok(Json(options))
}
