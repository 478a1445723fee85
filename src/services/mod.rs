//! Core services of the explorer monitor.
//!
//! - `explorer`: normalized provider access with fallback
//! - `health`: provider health checks against the default provider
//! - `notification`: alert delivery
//! - `retention`: deletion of expired block transfers
//! - `scheduler`: cron scheduling of the jobs above
//! - `store`: persistence of transfers, statuses and defaults

pub mod explorer;
pub mod health;
pub mod notification;
pub mod retention;
pub mod scheduler;
pub mod store;
