//! Validation and parsing of raw provider responses.
//!
//! Every provider pairs a [`ResponseValidator`] with a [`ResponseParser`]. The
//! explorer only hands a response to the parser after the matching validator
//! accepted it. Both traits reject everything by default, so a provider
//! implements exactly the operations it supports.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::models::{Balance, TransferTx};

pub trait ResponseValidator: Send + Sync {
	fn validate_tx_details_response(&self, _response: &Value) -> bool {
		false
	}

	fn validate_block_txs_response(&self, _response: &Value) -> bool {
		false
	}

	fn validate_block_head_response(&self, _response: &Value) -> bool {
		false
	}

	fn validate_address_txs_response(&self, _response: &Value) -> bool {
		false
	}

	fn validate_balance_response(&self, _response: &Value) -> bool {
		false
	}

	/// Check a single transaction entry of a list response
	fn validate_transaction(&self, _transaction: &Value) -> bool {
		false
	}
}

pub trait ResponseParser: Send + Sync {
	fn validator(&self) -> &dyn ResponseValidator;

	/// `block_head` lets the parser derive confirmations when the provider
	/// does not report them.
	fn parse_tx_details_response(
		&self,
		_response: &Value,
		_block_head: Option<u64>,
	) -> Vec<TransferTx> {
		Vec::new()
	}

	fn parse_block_txs_response(&self, _response: &Value) -> Vec<TransferTx> {
		Vec::new()
	}

	fn parse_block_head_response(&self, _response: &Value) -> Option<u64> {
		None
	}

	fn parse_address_txs_response(
		&self,
		_address: &str,
		_response: &Value,
		_block_head: Option<u64>,
	) -> Vec<TransferTx> {
		Vec::new()
	}

	fn parse_balance_response(&self, _response: &Value) -> Option<Balance> {
		None
	}
}

/// Validator for providers answering in the explorer's own transfer shape:
///
/// ```json
/// {"transfers": [{"tx_hash": "..", "from_address": "..", "to_address": "..",
///                 "value": "1.5", "symbol": "BTC", "block_height": 10}]}
/// ```
///
/// Block heads are `{"block_head": 123}` and balances are a serialized
/// [`Balance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedJsonValidator;

impl NormalizedJsonValidator {
	fn has_transfer_list(response: &Value) -> bool {
		response
			.get("transfers")
			.map(Value::is_array)
			.unwrap_or(false)
	}
}

impl ResponseValidator for NormalizedJsonValidator {
	fn validate_tx_details_response(&self, response: &Value) -> bool {
		Self::has_transfer_list(response)
	}

	fn validate_block_txs_response(&self, response: &Value) -> bool {
		Self::has_transfer_list(response)
	}

	fn validate_block_head_response(&self, response: &Value) -> bool {
		response
			.get("block_head")
			.and_then(Value::as_u64)
			.is_some()
	}

	fn validate_address_txs_response(&self, response: &Value) -> bool {
		Self::has_transfer_list(response)
	}

	fn validate_balance_response(&self, response: &Value) -> bool {
		response.get("address").and_then(Value::as_str).is_some()
			&& response.get("balance").map(is_decimal).unwrap_or(false)
	}

	fn validate_transaction(&self, transaction: &Value) -> bool {
		let has_text = |field: &str| {
			transaction
				.get(field)
				.and_then(Value::as_str)
				.map(|s| !s.is_empty())
				.unwrap_or(false)
		};

		has_text("tx_hash")
			&& has_text("symbol")
			&& transaction.get("value").map(is_decimal).unwrap_or(false)
	}
}

fn is_decimal(value: &Value) -> bool {
	match value {
		Value::String(s) => Decimal::from_str(s).is_ok(),
		Value::Number(n) => Decimal::from_str(&n.to_string()).is_ok(),
		_ => false,
	}
}

/// Parser counterpart of [`NormalizedJsonValidator`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedJsonParser {
	validator: NormalizedJsonValidator,
}

impl NormalizedJsonParser {
	pub fn new() -> Self {
		Self::default()
	}

	fn parse_transfers(&self, response: &Value, block_head: Option<u64>) -> Vec<TransferTx> {
		let entries = match response.get("transfers").and_then(Value::as_array) {
			Some(entries) => entries,
			None => return Vec::new(),
		};

		entries
			.iter()
			.filter(|entry| self.validator.validate_transaction(entry))
			.filter_map(|entry| match serde_json::from_value::<TransferTx>(entry.clone()) {
				Ok(transfer) => Some(transfer),
				Err(e) => {
					tracing::debug!(error = %e, "skipping malformed transfer");
					None
				}
			})
			.map(|mut transfer| {
				if transfer.confirmations.is_none() {
					transfer.confirmations = match (block_head, transfer.block_height) {
						(Some(head), Some(height)) if head >= height => Some(head - height + 1),
						_ => None,
					};
				}
				transfer
			})
			.collect()
	}
}

impl ResponseParser for NormalizedJsonParser {
	fn validator(&self) -> &dyn ResponseValidator {
		&self.validator
	}

	fn parse_tx_details_response(&self, response: &Value, block_head: Option<u64>) -> Vec<TransferTx> {
		self.parse_transfers(response, block_head)
	}

	fn parse_block_txs_response(&self, response: &Value) -> Vec<TransferTx> {
		self.parse_transfers(response, None)
	}

	fn parse_block_head_response(&self, response: &Value) -> Option<u64> {
		response.get("block_head").and_then(Value::as_u64)
	}

	/// Only transfers touching `address` are kept
	fn parse_address_txs_response(
		&self,
		address: &str,
		response: &Value,
		block_head: Option<u64>,
	) -> Vec<TransferTx> {
		self.parse_transfers(response, block_head)
			.into_iter()
			.filter(|t| t.from_address == address || t.to_address == address)
			.collect()
	}

	fn parse_balance_response(&self, response: &Value) -> Option<Balance> {
		serde_json::from_value(response.clone()).ok()
	}
}
