//! Provider health checking.
//!
//! - `checker`: Runs a check for one (network, operation) pair
//! - `comparison`: Set comparison of provider answers
//! - `selector`: Persisted default provider resolution
//! - `alert`: Alert message formatting

mod alert;
mod checker;
mod comparison;
mod config;
mod error;
mod selector;

pub use alert::{format_alert, format_run_failure};
pub use checker::{
	evaluate_alternative, CheckContext, HealthCheckReport, ProviderCheckOutcome,
	ProviderHealthChecker, ReferenceSample, SampleData, TimedSample,
};
pub use comparison::{compare_transfers, database_mismatches, ResponseSize, TransferComparison};
pub use config::HealthCheckConfig;
pub use error::HealthCheckError;
pub use selector::DefaultProviderSelector;
