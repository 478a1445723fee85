use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Operation;

/// A value movement as returned by a provider after parsing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransferTx {
	pub tx_hash: String,
	#[serde(default = "default_success")]
	pub success: bool,
	#[serde(default)]
	pub from_address: String,
	#[serde(default)]
	pub to_address: String,
	pub value: Decimal,
	pub symbol: String,
	#[serde(default)]
	pub memo: Option<String>,
	#[serde(default)]
	pub token: Option<String>,
	#[serde(default)]
	pub block_height: Option<u64>,
	#[serde(default)]
	pub block_hash: Option<String>,
	#[serde(default)]
	pub date: Option<DateTime<Utc>>,
	#[serde(default)]
	pub confirmations: Option<u64>,
	#[serde(default)]
	pub tx_fee: Option<Decimal>,
}

fn default_success() -> bool {
	true
}

/// A transfer persisted by the ingestion pipelines
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transfer {
	pub id: u64,
	pub network: String,
	pub tx_hash: String,
	pub success: bool,
	pub from_address: String,
	pub to_address: String,
	pub value: Decimal,
	pub symbol: String,
	pub memo: Option<String>,
	pub token: Option<String>,
	pub block_height: Option<u64>,
	pub source_operation: Operation,
	pub created_at: DateTime<Utc>,
}

impl Transfer {
	/// Builds a not-yet-stored transfer from a provider record. The store
	/// assigns the id on insert.
	pub fn from_transfer_tx(
		network: &str,
		tx: &TransferTx,
		source_operation: Operation,
		created_at: DateTime<Utc>,
	) -> Self {
		Self {
			id: 0,
			network: network.to_string(),
			tx_hash: tx.tx_hash.clone(),
			success: tx.success,
			from_address: tx.from_address.clone(),
			to_address: tx.to_address.clone(),
			value: tx.value,
			symbol: tx.symbol.clone(),
			memo: tx.memo.clone(),
			token: tx.token.clone(),
			block_height: tx.block_height,
			source_operation,
			created_at,
		}
	}

	/// Identity of the row for deduplication
	pub fn key(&self) -> TransferKey {
		TransferKey {
			network: self.network.clone(),
			tx_hash: self.tx_hash.clone(),
			from_address: self.from_address.clone(),
			to_address: self.to_address.clone(),
			token: self.token.clone().filter(|t| !t.is_empty()),
		}
	}

	pub fn comparable(&self) -> ComparableTransfer {
		ComparableTransfer::new(
			&self.tx_hash,
			self.success,
			&self.from_address,
			&self.to_address,
			self.value,
			&self.symbol,
			self.memo.as_deref(),
			self.token.as_deref(),
		)
	}
}

/// Unique address of a stored transfer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferKey {
	pub network: String,
	pub tx_hash: String,
	pub from_address: String,
	pub to_address: String,
	pub token: Option<String>,
}

/// Transfer stripped down to the fields providers must agree on.
///
/// Volatile fields (confirmations, fees, dates, block data) are dropped.
/// Values compare exactly; only trailing zeros are normalized away.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparableTransfer {
	pub tx_hash: String,
	pub success: bool,
	pub from_address: String,
	pub to_address: String,
	pub value: Decimal,
	pub symbol: String,
	pub memo: Option<String>,
	pub token: Option<String>,
}

impl ComparableTransfer {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		tx_hash: &str,
		success: bool,
		from_address: &str,
		to_address: &str,
		value: Decimal,
		symbol: &str,
		memo: Option<&str>,
		token: Option<&str>,
	) -> Self {
		Self {
			tx_hash: tx_hash.to_string(),
			success,
			from_address: from_address.to_string(),
			to_address: to_address.to_string(),
			value: value.normalize(),
			symbol: symbol.to_string(),
			memo: memo.filter(|m| !m.is_empty()).map(str::to_string),
			token: token.filter(|t| !t.is_empty()).map(str::to_string),
		}
	}
}

impl From<&TransferTx> for ComparableTransfer {
	fn from(tx: &TransferTx) -> Self {
		ComparableTransfer::new(
			&tx.tx_hash,
			tx.success,
			&tx.from_address,
			&tx.to_address,
			tx.value,
			&tx.symbol,
			tx.memo.as_deref(),
			tx.token.as_deref(),
		)
	}
}

/// Balance of an address as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Balance {
	pub address: String,
	pub symbol: String,
	pub balance: Decimal,
	#[serde(default)]
	pub unconfirmed_balance: Option<Decimal>,
}
