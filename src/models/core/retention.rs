use serde::{Deserialize, Serialize};

const DEFAULT_HIGH_TRANSACTION_HOURS: u64 = 12;
const DEFAULT_WALLET_TXS_TESTED_HOURS: u64 = 5 * 24;
const DEFAULT_RETENTION_HOURS: u64 = 2 * 24;

/// Retention classes of stored block transfers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetentionConfig {
	/// Busy chains kept for the shortest window
	#[serde(default)]
	pub high_transaction_networks: Vec<String>,
	/// Chains whose wallet transactions are verified against stored blocks
	#[serde(default)]
	pub wallet_txs_tested_networks: Vec<String>,
	#[serde(default = "default_high_transaction_hours")]
	pub high_transaction_hours: u64,
	#[serde(default = "default_wallet_txs_tested_hours")]
	pub wallet_txs_tested_hours: u64,
	#[serde(default = "default_retention_hours")]
	pub default_hours: u64,
}

fn default_high_transaction_hours() -> u64 {
	DEFAULT_HIGH_TRANSACTION_HOURS
}

fn default_wallet_txs_tested_hours() -> u64 {
	DEFAULT_WALLET_TXS_TESTED_HOURS
}

fn default_retention_hours() -> u64 {
	DEFAULT_RETENTION_HOURS
}

impl Default for RetentionConfig {
	fn default() -> Self {
		Self {
			high_transaction_networks: Vec::new(),
			wallet_txs_tested_networks: Vec::new(),
			high_transaction_hours: DEFAULT_HIGH_TRANSACTION_HOURS,
			wallet_txs_tested_hours: DEFAULT_WALLET_TXS_TESTED_HOURS,
			default_hours: DEFAULT_RETENTION_HOURS,
		}
	}
}
