use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::application::Application;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Closed,
    Draft,
}

impl JobStatus {
    /// Whether providers may still apply to the job.
    pub fn accepts_applications(self) -> bool {
        matches!(self, JobStatus::Open | JobStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// A priced line item of a job. Owned by its job and copied into applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub label: String,
    pub providers_required: u32,
    #[serde(default)]
    pub country_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_minor: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate_minor: Option<i64>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: JobStatus,
    pub rate_label: String,
    pub capacity: u32,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub schedule: Schedule,
    pub price_minor: i64,
    pub currency: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub image: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awarded_application_id: Option<String>,
}

impl Job {
    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    pub fn application(&self, application_id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == application_id)
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary::from(self)
    }
}

/// Listing projection of a job, persisted alongside the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: JobStatus,
    pub rate_label: String,
    pub posted_at: DateTime<Utc>,
    pub image: String,
    pub capacity: u32,
    pub applied_count: usize,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            category: job.category.clone(),
            status: job.status,
            rate_label: job.rate_label.clone(),
            posted_at: job.posted_at,
            image: job.image.clone(),
            capacity: job.capacity,
            applied_count: job.applications.len(),
        }
    }
}
