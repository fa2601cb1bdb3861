use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::QuotePayload, error::Result, services::pricing_service::PricingService,
    AppState,
};

#[axum::debug_handler]
pub async fn quote(
    State(state): State<AppState>,
    Json(payload): Json<QuotePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quote = PricingService::quote(
        payload,
        state.job_service.default_country(),
        state.job_service.rates(),
    );
    Ok(Json(quote))
}
