pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::kv_store::KeyValueStore;
use crate::error::Result;
use crate::services::{job_service::JobService, job_store::JobStore, meta_service::MetaService};
use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub meta_service: MetaService,
}

impl AppState {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Result<Self> {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        let store = JobStore::new(kv, config.event_buffer);
        let job_service = JobService::new(store, config.default_country.clone());
        let meta_service = MetaService::new(http_client, config.meta_api_url.clone());

        Ok(Self::from_parts(job_service, meta_service))
    }

    pub fn from_parts(job_service: JobService, meta_service: MetaService) -> Self {
        Self {
            job_service,
            meta_service,
        }
    }
}
