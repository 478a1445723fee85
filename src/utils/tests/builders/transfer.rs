//! Test helper utilities for transfers
//!
//! - `TransferTxBuilder`: Builder for provider transfer records, which also
//!   produces stored transfers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Operation, Transfer, TransferTx};

/// Builder for creating test TransferTx and Transfer instances
pub struct TransferTxBuilder {
	tx: TransferTx,
}

impl Default for TransferTxBuilder {
	fn default() -> Self {
		Self {
			tx: TransferTx {
				tx_hash: "abc".to_string(),
				success: true,
				from_address: "0xfrom".to_string(),
				to_address: "0xto".to_string(),
				value: Decimal::TEN,
				symbol: "ETC".to_string(),
				memo: None,
				token: None,
				block_height: Some(100),
				block_hash: None,
				date: None,
				confirmations: None,
				tx_fee: None,
			},
		}
	}
}

impl TransferTxBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn tx_hash(mut self, tx_hash: &str) -> Self {
		self.tx.tx_hash = tx_hash.to_string();
		self
	}

	pub fn from_address(mut self, address: &str) -> Self {
		self.tx.from_address = address.to_string();
		self
	}

	pub fn to_address(mut self, address: &str) -> Self {
		self.tx.to_address = address.to_string();
		self
	}

	/// Panics on a malformed decimal, test input only
	pub fn value(mut self, value: &str) -> Self {
		self.tx.value = Decimal::from_str(value).unwrap_or_else(|e| panic!("bad decimal {}: {}", value, e));
		self
	}

	pub fn symbol(mut self, symbol: &str) -> Self {
		self.tx.symbol = symbol.to_string();
		self
	}

	pub fn memo(mut self, memo: &str) -> Self {
		self.tx.memo = Some(memo.to_string());
		self
	}

	pub fn token(mut self, token: &str) -> Self {
		self.tx.token = Some(token.to_string());
		self
	}

	pub fn success(mut self, success: bool) -> Self {
		self.tx.success = success;
		self
	}

	pub fn block_height(mut self, height: Option<u64>) -> Self {
		self.tx.block_height = height;
		self
	}

	pub fn confirmations(mut self, confirmations: u64) -> Self {
		self.tx.confirmations = Some(confirmations);
		self
	}

	pub fn build(self) -> TransferTx {
		self.tx
	}

	/// Stored form, as written by the ingestion pipelines
	pub fn stored(
		self,
		network: &str,
		source_operation: Operation,
		created_at: DateTime<Utc>,
	) -> Transfer {
		Transfer::from_transfer_tx(network, &self.tx, source_operation, created_at)
	}
}
