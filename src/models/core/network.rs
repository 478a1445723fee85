use serde::{Deserialize, Serialize};

use crate::models::Operation;

/// How transfers of a network are shaped, which decides how tx-details
/// transfers get aggregated before they are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
	AccountBased,
	MemoBased,
	UtxoBased,
}

/// Health check scheduling for a network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthCheckSchedule {
	/// Cron expression (with seconds) driving the health checks
	pub cron_schedule: String,
	/// Operations checked on every run
	pub operations: Vec<Operation>,
	/// Number of blocks sampled for `block_txs` checks
	#[serde(default)]
	pub block_txs_window: Option<u64>,
}

/// Token contract whose transfers are health-checked on a network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenContract {
	pub symbol: String,
	pub contract: String,
}

/// A blockchain network as configured for the explorer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Network {
	pub name: String,
	pub network_type: NetworkType,
	pub block_time_ms: u64,
	pub retention_cron_schedule: String,
	pub health_check: Option<HealthCheckSchedule>,
	#[serde(default)]
	pub tokens: Vec<TokenContract>,
}

impl Network {
	/// Operations the health checker runs for this network
	pub fn health_check_operations(&self) -> Vec<Operation> {
		self.health_check
			.as_ref()
			.map(|h| h.operations.clone())
			.unwrap_or_default()
	}
}
