use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Capabilities a provider may offer for a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	BlockHead,
	BlockTxs,
	TxDetails,
	AddressTxs,
	/// Transfers of one token contract to or from an address
	TokenTxs,
	Balance,
}

impl Operation {
	pub const ALL: [Operation; 6] = [
		Operation::BlockHead,
		Operation::BlockTxs,
		Operation::TxDetails,
		Operation::AddressTxs,
		Operation::TokenTxs,
		Operation::Balance,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::BlockHead => "block_head",
			Self::BlockTxs => "block_txs",
			Self::TxDetails => "tx_details",
			Self::AddressTxs => "address_txs",
			Self::TokenTxs => "token_txs",
			Self::Balance => "balance",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for Operation {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Operation::ALL
			.iter()
			.find(|op| op.as_str() == s)
			.copied()
			.ok_or_else(|| format!("Unknown operation: {}", s))
	}
}

/// Relative paths of a provider's HTTP endpoints.
///
/// Placeholders `{tx_hash}`, `{height}`, `{address}` and `{contract}` are
/// substituted per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderEndpoints {
	#[serde(default)]
	pub tx_details: Option<String>,
	#[serde(default)]
	pub block_txs: Option<String>,
	#[serde(default)]
	pub block_head: Option<String>,
	#[serde(default)]
	pub address_txs: Option<String>,
	#[serde(default)]
	pub token_txs: Option<String>,
	#[serde(default)]
	pub balance: Option<String>,
}

impl ProviderEndpoints {
	pub fn for_operation(&self, operation: Operation) -> Option<&str> {
		match operation {
			Operation::TxDetails => self.tx_details.as_deref(),
			Operation::BlockTxs => self.block_txs.as_deref(),
			Operation::BlockHead => self.block_head.as_deref(),
			Operation::AddressTxs => self.address_txs.as_deref(),
			Operation::TokenTxs => self.token_txs.as_deref(),
			Operation::Balance => self.balance.as_deref(),
		}
	}
}

/// A third-party data source bound to one network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Provider {
	pub name: String,
	pub network: String,
	pub supported_operations: Vec<Operation>,
	/// Key of the explorer adapter serving this provider. Legacy providers
	/// have none and are never health-checked.
	#[serde(default)]
	pub explorer_interface: Option<String>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub endpoints: ProviderEndpoints,
	#[serde(default)]
	pub headers: HashMap<String, String>,
	/// Lower value is tried first
	#[serde(default)]
	pub priority: u32,
	/// Operations this provider is the initial default for
	#[serde(default)]
	pub default_for: Vec<Operation>,
	#[serde(default)]
	pub need_block_head_for_confirmation: bool,
}

impl Provider {
	pub fn supports(&self, operation: Operation) -> bool {
		self.supported_operations.contains(&operation)
	}
}

/// Persisted primary provider of a (network, operation) pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultProviderAssignment {
	pub network: String,
	pub operation: Operation,
	pub provider: String,
}
