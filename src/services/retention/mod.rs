//! Retention of stored block transfers.
//!
//! - `policy`: Retention window per network
//! - `cron`: Atomic delete-and-advance-watermark job
//! - `runner`: Endless shuffled loop over every network

mod cron;
mod error;
mod policy;
mod runner;

pub use cron::{DeleteBlockTxsCron, RetentionOutcome};
pub use error::RetentionError;
pub use policy::RetentionPolicy;
pub use runner::RetentionRunner;
