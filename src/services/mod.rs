pub mod country_service;
pub mod job_service;
pub mod job_store;
pub mod meta_service;
pub mod pricing_service;
