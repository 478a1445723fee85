use chrono::{DateTime, Duration, Utc};

use crate::models::RetentionConfig;

/// How long block transfers of each network are kept
#[derive(Debug, Clone, Default)]
pub struct RetentionPolicy {
	config: RetentionConfig,
}

impl RetentionPolicy {
	pub fn new(config: RetentionConfig) -> Self {
		Self { config }
	}

	/// High-transaction networks win over wallet-tested ones
	pub fn retention_hours(&self, network: &str) -> u64 {
		let listed = |networks: &[String]| networks.iter().any(|n| n == network);

		if listed(&self.config.high_transaction_networks) {
			self.config.high_transaction_hours
		} else if listed(&self.config.wallet_txs_tested_networks) {
			self.config.wallet_txs_tested_hours
		} else {
			self.config.default_hours
		}
	}

	/// Transfers created before this instant are expired
	pub fn delete_before(&self, network: &str, now: DateTime<Utc>) -> DateTime<Utc> {
		let hours = i64::try_from(self.retention_hours(network)).unwrap_or(i64::MAX);
		Duration::try_hours(hours)
			.and_then(|retention| now.checked_sub_signed(retention))
			.unwrap_or(DateTime::<Utc>::MIN_UTC)
	}
}
