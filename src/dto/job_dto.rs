use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::application::{ApplicationStatus, Provider};
use crate::models::job::{Coordinates, Schedule, Service};

pub const MAX_SERVICES_PER_JOB: u64 = 50;
pub const MAX_PROVIDERS_PER_SERVICE: u32 = 1_000;
/// Thirty days.
pub const MAX_DURATION_MINUTES: u32 = 43_200;
pub const MAX_HOURLY_RATE_MINOR: i64 = 100_000_000;
pub const MAX_PRICE_MINOR: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(range(min = 1, max = MAX_PROVIDERS_PER_SERVICE))]
    pub providers_required: u32,
    #[serde(default)]
    pub country_codes: Vec<String>,
    #[validate(range(min = 0, max = MAX_PRICE_MINOR))]
    pub price_minor: Option<i64>,
    #[validate(range(min = 0, max = MAX_HOURLY_RATE_MINOR))]
    pub hourly_rate_minor: Option<i64>,
    #[validate(range(max = MAX_DURATION_MINUTES))]
    #[serde(default)]
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_schedule"))]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub schedule: Schedule,
    #[serde(default)]
    pub address: String,
    pub country_code: Option<String>,
    pub map_link: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = MAX_SERVICES_PER_JOB), nested)]
    pub services: Vec<ServicePayload>,
}

fn validate_schedule(payload: &CreateJobPayload) -> std::result::Result<(), ValidationError> {
    if payload.schedule.from > payload.schedule.to {
        return Err(ValidationError::new("schedule_from_after_to"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPayload {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub completed_jobs: u32,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl From<ProviderPayload> for Provider {
    fn from(value: ProviderPayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            avatar: value.avatar,
            rating: value.rating,
            completed_jobs: value.completed_jobs,
            bio: value.bio,
            address: value.address,
            coordinates: value.coordinates,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationPayload {
    #[validate(nested)]
    pub provider: ProviderPayload,
    #[validate(length(min = 1))]
    pub service_id: String,
    #[validate(range(min = 0, max = MAX_PRICE_MINOR))]
    pub price_minor: Option<i64>,
    pub note: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionApplicationPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub country_code: Option<String>,
    #[validate(length(min = 1, max = MAX_SERVICES_PER_JOB), nested)]
    pub services: Vec<ServicePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub country_code: String,
    pub currency: String,
    pub services: Vec<Service>,
    pub capacity: u32,
    pub total_minor: i64,
    pub rate_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_item() -> ServicePayload {
        ServicePayload {
            id: None,
            label: "Deep Cleaning".into(),
            providers_required: MAX_PROVIDERS_PER_SERVICE,
            country_codes: vec![],
            price_minor: Some(MAX_PRICE_MINOR),
            hourly_rate_minor: Some(MAX_HOURLY_RATE_MINOR),
            duration_minutes: MAX_DURATION_MINUTES,
        }
    }

    #[test]
    fn line_item_at_limits_is_valid() {
        assert!(line_item().validate().is_ok());
    }

    #[test]
    fn line_item_beyond_limits_is_rejected() {
        let mut item = line_item();
        item.providers_required = u32::MAX;
        assert!(item.validate().is_err());

        let mut item = line_item();
        item.duration_minutes = u32::MAX;
        assert!(item.validate().is_err());

        let mut item = line_item();
        item.hourly_rate_minor = Some(i64::MAX);
        assert!(item.validate().is_err());

        let mut item = line_item();
        item.price_minor = Some(i64::MAX);
        assert!(item.validate().is_err());
    }

    #[test]
    fn quote_caps_service_count() {
        let quote = QuotePayload {
            country_code: None,
            services: vec![line_item(); MAX_SERVICES_PER_JOB as usize + 1],
        };
        assert!(quote.validate().is_err());
    }
}
