pub mod job_dto;
pub mod meta_dto;
