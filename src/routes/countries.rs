use axum::{extract::Path, response::IntoResponse, Json};

use crate::services::country_service;

#[axum::debug_handler]
pub async fn list_countries() -> impl IntoResponse {
    Json(country_service::list_countries())
}

/// Unknown codes answer with the default country.
#[axum::debug_handler]
pub async fn get_country(Path(code): Path<String>) -> impl IntoResponse {
    Json(country_service::get_country_meta(&code))
}
