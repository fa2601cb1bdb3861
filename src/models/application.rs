use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::{Coordinates, Job, Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub completed_jobs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub provider: Provider,
    pub price_minor: i64,
    pub currency: String,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub service: Service,
}

impl Application {
    /// Records a decision. `decision_at` is present exactly when the status is not pending.
    pub fn decide(&mut self, status: ApplicationStatus, at: DateTime<Utc>) {
        self.status = status;
        self.decision_at = match status {
            ApplicationStatus::Pending => None,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected => Some(at),
        };
    }
}

/// An application together with the job that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub job: Job,
    pub application: Application,
}
