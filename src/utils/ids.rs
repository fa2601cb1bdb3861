use uuid::Uuid;

/// Prefixed random id, e.g. `job_3f2a...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
