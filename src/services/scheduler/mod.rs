//! Cron scheduling of retention and health-check jobs.

mod error;
mod service;

pub use error::SchedulerError;
pub use service::MonitorScheduler;
