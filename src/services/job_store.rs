use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use crate::database::kv_store::KeyValueStore;
use crate::error::Result;
use crate::models::job::{Job, JobSummary};

pub const JOBS_KEY: &str = "jobs";
pub const JOBS_SUMMARY_KEY: &str = "jobs.summary";

const SEED_JOBS: &str = include_str!("seed_jobs.json");

pub fn seed_jobs() -> Vec<Job> {
    match serde_json::from_str(SEED_JOBS) {
        Ok(jobs) => jobs,
        Err(err) => {
            error!(error = %err, "bundled seed dataset does not parse");
            Vec::new()
        }
    }
}

/// Broadcast after every successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsChanged {
    pub job_id: Option<String>,
}

/// Persistence adapter for the job collection plus the change bus.
///
/// Storage failures never reach callers: reads fall back to the seed dataset
/// and writes are best effort.
#[derive(Clone)]
pub struct JobStore {
    kv: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<JobsChanged>,
}

impl JobStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, event_buffer: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self { kv, events }
    }

    pub async fn load(&self) -> Vec<Job> {
        match self.kv.get(JOBS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Job>>(&raw) {
                Ok(jobs) => return jobs,
                Err(err) => warn!(error = %err, "persisted jobs are malformed, reseeding"),
            },
            Ok(None) => debug!("no persisted jobs, seeding"),
            Err(err) => warn!(error = %err, "failed to read persisted jobs, reseeding"),
        }

        let jobs = seed_jobs();
        if let Err(err) = self.persist(&jobs).await {
            warn!(error = %err, "failed to persist seed jobs");
        }
        jobs
    }

    /// Writes the collection and its summary projection, then notifies
    /// subscribers. A failed write is logged and skips the notification.
    pub async fn save(&self, jobs: &[Job], changed_job_id: Option<&str>) {
        match self.persist(jobs).await {
            Ok(()) => self.notify_changed(changed_job_id),
            Err(err) => warn!(error = %err, "failed to persist jobs"),
        }
    }

    pub fn notify_changed(&self, job_id: Option<&str>) {
        let event = JobsChanged {
            job_id: job_id.map(str::to_string),
        };
        // No receivers is fine.
        let receivers = self.events.send(event).unwrap_or(0);
        debug!(?job_id, receivers, "jobs changed");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobsChanged> {
        self.events.subscribe()
    }

    async fn persist(&self, jobs: &[Job]) -> Result<()> {
        let summaries: Vec<JobSummary> = jobs.iter().map(JobSummary::from).collect();
        let full = serde_json::to_string(jobs)?;
        let summary = serde_json::to_string(&summaries)?;
        self.kv.set(JOBS_KEY, &full).await?;
        self.kv.set(JOBS_SUMMARY_KEY, &summary).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_store::MemoryKeyValueStore;
    use crate::error::Error;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Internal("storage offline".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Internal("storage offline".into()))
        }
    }

    fn memory_store() -> (Arc<MemoryKeyValueStore>, JobStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = JobStore::new(kv.clone(), 8);
        (kv, store)
    }

    #[test]
    fn seed_dataset_parses() {
        let jobs = seed_jobs();
        assert_eq!(jobs.len(), 4);
        let electrical = jobs.iter().find(|j| j.id == "j2").unwrap();
        assert_eq!(electrical.title, "Electrical Help");
        assert_eq!(electrical.awarded_application_id.as_deref(), Some("app_5501"));
    }

    #[tokio::test]
    async fn load_seeds_once() {
        let (kv, store) = memory_store();

        let first = store.load().await;
        let second = store.load().await;

        assert_eq!(first, second);
        assert_eq!(first.len(), seed_jobs().len());
        assert!(kv.get(JOBS_KEY).await.unwrap().is_some());
        assert!(kv.get(JOBS_SUMMARY_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn malformed_data_reseeds() {
        let (kv, store) = memory_store();
        kv.set(JOBS_KEY, "{not json").await.unwrap();

        let jobs = store.load().await;

        assert_eq!(jobs, seed_jobs());
        let raw = kv.get(JOBS_KEY).await.unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<Job>>(&raw).is_ok());
    }

    #[tokio::test]
    async fn save_writes_summary_projection_and_notifies() {
        let (kv, store) = memory_store();
        let mut rx = store.subscribe();
        let mut jobs = store.load().await;
        jobs.truncate(2);

        store.save(&jobs, Some("j1")).await;

        let raw = kv.get(JOBS_SUMMARY_KEY).await.unwrap().unwrap();
        let summaries: Vec<JobSummary> = serde_json::from_str(&raw).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].applied_count, jobs[0].applications.len());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.job_id.as_deref(), Some("j1"));
    }

    #[tokio::test]
    async fn storage_failures_are_swallowed() {
        let store = JobStore::new(Arc::new(BrokenStore), 8);
        let mut rx = store.subscribe();

        let jobs = store.load().await;
        assert_eq!(jobs, seed_jobs());

        store.save(&jobs, None).await;
        assert!(rx.try_recv().is_err());
    }
}
