use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex};
use tracing::info;

use crate::dto::job_dto::{CreateJobPayload, SubmitApplicationPayload};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, JobApplication};
use crate::models::job::{Job, JobStatus, JobSummary};
use crate::models::lookup::Lookup;
use crate::services::country_service::{get_country_meta, CountryRates};
use crate::services::job_store::{JobStore, JobsChanged};
use crate::services::pricing_service::PricingService;
use crate::utils::ids::new_id;
use crate::utils::time::now;

pub const DEFAULT_JOB_IMAGE: &str =
    "https://images.unsplash.com/photo-1581578731548-c64695cc6952";

/// Repository over the persisted job collection.
///
/// Every mutation is a full read-modify-write of the collection. Writers in
/// this process are serialised; writers in other processes sharing the same
/// store are last-write-wins.
#[derive(Clone)]
pub struct JobService {
    store: JobStore,
    rates: CountryRates,
    default_country: String,
    write_lock: Arc<Mutex<()>>,
}

impl JobService {
    pub fn new(store: JobStore, default_country: impl Into<String>) -> Self {
        Self {
            store,
            rates: CountryRates::standard(),
            default_country: default_country.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn rates(&self) -> &CountryRates {
        &self.rates
    }

    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobsChanged> {
        self.store.subscribe()
    }

    pub async fn list_summaries(&self) -> Vec<JobSummary> {
        self.store.load().await.iter().map(Job::summary).collect()
    }

    /// Returns an owned copy; mutating it does not touch stored state.
    pub async fn get_job(&self, id: &str) -> Lookup<Job> {
        self.store
            .load()
            .await
            .into_iter()
            .find(|job| job.id == id)
            .into()
    }

    pub async fn get_application(&self, application_id: &str) -> Lookup<JobApplication> {
        self.store
            .load()
            .await
            .into_iter()
            .find_map(|job| {
                let application = job.application(application_id)?.clone();
                Some(JobApplication { job, application })
            })
            .into()
    }

    pub async fn list_applications(&self, job_id: &str) -> Lookup<Vec<Application>> {
        self.get_job(job_id).await.map(|job| job.applications)
    }

    pub async fn create_job(&self, payload: CreateJobPayload) -> Job {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.store.load().await;

        let country = get_country_meta(
            payload
                .country_code
                .as_deref()
                .unwrap_or(&self.default_country),
        );
        let services = PricingService::resolve_services(payload.services, country, &self.rates);
        let price_minor = PricingService::compute_job_total(&services, &self.rates);

        let job = Job {
            id: new_id("job"),
            title: payload.title,
            category: payload.category,
            status: JobStatus::Open,
            rate_label: PricingService::format_rate_label(price_minor, country.symbol),
            capacity: PricingService::compute_capacity(&services),
            posted_at: now(),
            description: payload.description,
            schedule: payload.schedule,
            price_minor,
            currency: country.currency.to_string(),
            address: payload.address,
            country_code: Some(country.code.to_string()),
            map_link: payload.map_link,
            coordinates: payload.coordinates,
            image: payload
                .image
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_JOB_IMAGE.to_string()),
            services,
            applications: Vec::new(),
            awarded_application_id: None,
        };

        jobs.insert(0, job.clone());
        self.store.save(&jobs, Some(&job.id)).await;
        info!(job_id = %job.id, price_minor = job.price_minor, "job created");
        job
    }

    /// Adds a pending application for one of the job's services.
    pub async fn submit_application(
        &self,
        job_id: &str,
        payload: SubmitApplicationPayload,
    ) -> Result<Lookup<JobApplication>> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.store.load().await;

        let Some(job) = jobs.iter_mut().find(|job| job.id == job_id) else {
            return Ok(Lookup::NotFound);
        };
        if !job.status.accepts_applications() {
            return Err(Error::Conflict(format!(
                "Job {} is not accepting applications",
                job_id
            )));
        }
        let Some(service) = job.service(&payload.service_id).cloned() else {
            return Ok(Lookup::NotFound);
        };

        let application = Application {
            id: new_id("app"),
            provider: payload.provider.into(),
            price_minor: payload
                .price_minor
                .unwrap_or_else(|| PricingService::price_per_provider(&service, &self.rates)),
            currency: job.currency.clone(),
            submitted_at: now(),
            status: ApplicationStatus::Pending,
            decision_at: None,
            note: payload.note,
            country_code: payload
                .country_code
                .map(|code| code.trim().to_ascii_uppercase()),
            service,
        };
        job.applications.push(application.clone());
        let job = job.clone();

        self.store.save(&jobs, Some(job_id)).await;
        info!(job_id, application_id = %application.id, "application submitted");
        Ok(Lookup::Found(JobApplication { job, application }))
    }

    pub async fn transition_application(
        &self,
        job_id: &str,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Lookup<JobApplication> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.store.load().await;

        let Some(job) = jobs.iter_mut().find(|job| job.id == job_id) else {
            return Lookup::NotFound;
        };
        let Some(application) = apply_decision(job, application_id, status, now()) else {
            return Lookup::NotFound;
        };
        let job = job.clone();

        self.store.save(&jobs, Some(job_id)).await;
        info!(
            job_id,
            application_id,
            ?status,
            job_status = ?job.status,
            "application transitioned"
        );
        Lookup::Found(JobApplication { job, application })
    }
}

/// Applies an application decision and the job status changes it drives.
///
/// Accepting while another application holds the award rejects the previous
/// award. Moving the awarded application to any other status clears the award
/// and reopens an in-progress job.
fn apply_decision(
    job: &mut Job,
    application_id: &str,
    status: ApplicationStatus,
    at: DateTime<Utc>,
) -> Option<Application> {
    let idx = job
        .applications
        .iter()
        .position(|a| a.id == application_id)?;

    match status {
        ApplicationStatus::Accepted => {
            if let Some(previous) = job.awarded_application_id.take() {
                if previous != application_id {
                    if let Some(prev) = job
                        .applications
                        .iter_mut()
                        .find(|a| a.id == previous && a.status == ApplicationStatus::Accepted)
                    {
                        prev.decide(ApplicationStatus::Rejected, at);
                    }
                }
            }
            job.applications[idx].decide(status, at);
            job.awarded_application_id = Some(application_id.to_string());
            if job.status == JobStatus::Open {
                job.status = JobStatus::InProgress;
            }
        }
        ApplicationStatus::Rejected | ApplicationStatus::Pending => {
            job.applications[idx].decide(status, at);
            if job.awarded_application_id.as_deref() == Some(application_id) {
                job.awarded_application_id = None;
                if job.status == JobStatus::InProgress {
                    job.status = JobStatus::Open;
                }
            }
        }
    }

    Some(job.applications[idx].clone())
}
