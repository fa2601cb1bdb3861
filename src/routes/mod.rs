pub mod applications;
pub mod countries;
pub mod health;
pub mod jobs;
pub mod meta;
pub mod pricing;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/:id", get(jobs::get_job))
        .route(
            "/api/jobs/:id/applications",
            get(applications::list_applications).post(applications::submit_application),
        )
        .route(
            "/api/jobs/:id/applications/:application_id",
            patch(applications::transition_application),
        )
        .route(
            "/api/applications/:application_id",
            get(applications::get_application),
        )
        .route("/api/countries", get(countries::list_countries))
        .route("/api/countries/:code", get(countries::get_country))
        .route("/api/pricing/quote", post(pricing::quote))
        .route("/api/meta/services", get(meta::list_service_types))
        .route("/api/meta/languages", get(meta::list_languages))
}
