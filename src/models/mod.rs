pub mod application;
pub mod country;
pub mod job;
pub mod lookup;
