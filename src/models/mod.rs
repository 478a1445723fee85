//! Domain models and data structures for the explorer.
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Network, Provider, Transfer, statuses)

mod config;
mod core;

pub use core::{
	Balance, BlockStats, ComparableTransfer, DefaultProviderAssignment, HealthCheckSchedule,
	HealthStatus, Network, NetworkType, Operation, Provider, ProviderEndpoints, ProviderStatus,
	RetentionConfig, TokenContract, Transfer, TransferKey, TransferTx,
};

pub use config::{ConfigError, ConfigLoader};
