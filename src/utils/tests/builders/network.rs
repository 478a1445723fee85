//! Test helper utilities for Network configuration
//!
//! - `NetworkBuilder`: Builder for creating test Network instances

use crate::models::{HealthCheckSchedule, Network, NetworkType, Operation, TokenContract};

/// Builder for creating test Network instances
pub struct NetworkBuilder {
	name: String,
	network_type: NetworkType,
	block_time_ms: u64,
	retention_cron_schedule: String,
	health_check: Option<HealthCheckSchedule>,
	tokens: Vec<TokenContract>,
}

impl Default for NetworkBuilder {
	fn default() -> Self {
		Self {
			name: "etc".to_string(),
			network_type: NetworkType::AccountBased,
			block_time_ms: 13_000,
			retention_cron_schedule: "0 */5 * * * *".to_string(),
			health_check: None,
			tokens: Vec::new(),
		}
	}
}

impl NetworkBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(mut self, name: &str) -> Self {
		self.name = name.to_string();
		self
	}

	pub fn network_type(mut self, network_type: NetworkType) -> Self {
		self.network_type = network_type;
		self
	}

	pub fn block_time_ms(mut self, block_time_ms: u64) -> Self {
		self.block_time_ms = block_time_ms;
		self
	}

	pub fn retention_cron_schedule(mut self, schedule: &str) -> Self {
		self.retention_cron_schedule = schedule.to_string();
		self
	}

	pub fn health_check(mut self, schedule: &str, operations: Vec<Operation>) -> Self {
		self.health_check = Some(HealthCheckSchedule {
			cron_schedule: schedule.to_string(),
			operations,
			block_txs_window: None,
		});
		self
	}

	pub fn block_txs_window(mut self, window: u64) -> Self {
		if let Some(health_check) = self.health_check.as_mut() {
			health_check.block_txs_window = Some(window);
		}
		self
	}

	pub fn token(mut self, symbol: &str, contract: &str) -> Self {
		self.tokens.push(TokenContract {
			symbol: symbol.to_string(),
			contract: contract.to_string(),
		});
		self
	}

	pub fn build(self) -> Network {
		Network {
			name: self.name,
			network_type: self.network_type,
			block_time_ms: self.block_time_ms,
			retention_cron_schedule: self.retention_cron_schedule,
			health_check: self.health_check,
			tokens: self.tokens,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_network() {
		let network = NetworkBuilder::new().build();
		assert_eq!(network.name, "etc");
		assert!(network.health_check.is_none());
	}

	#[test]
	fn test_health_check_window() {
		let network = NetworkBuilder::new()
			.name("btc")
			.network_type(NetworkType::UtxoBased)
			.health_check("0 * * * * *", vec![Operation::BlockTxs])
			.block_txs_window(5)
			.build();
		assert_eq!(network.network_type, NetworkType::UtxoBased);
		assert_eq!(
			network.health_check.and_then(|h| h.block_txs_window),
			Some(5)
		);
	}
}
