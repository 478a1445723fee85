//! Aggregation of tx-details transfers by network type.
//!
//! Providers disagree on how they split one transaction into transfers, so
//! tx-details results are merged into a canonical shape before they are
//! returned or compared.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{NetworkType, TransferTx};

/// Merge transfers according to `network_type` and drop self-transfers
pub fn aggregate_transfers(network_type: NetworkType, transfers: Vec<TransferTx>) -> Vec<TransferTx> {
	let aggregated = match network_type {
		NetworkType::AccountBased => aggregate_account_based(transfers),
		NetworkType::MemoBased => aggregate_memo_based(transfers),
		NetworkType::UtxoBased => aggregate_utxo_based(transfers),
	};

	aggregated
		.into_iter()
		.filter(|t| t.from_address != t.to_address)
		.collect()
}

/// Sum values that share a key, keeping first-seen order and the first
/// transfer's other fields.
fn sum_by_key<K, F>(transfers: Vec<TransferTx>, key: F) -> Vec<TransferTx>
where
	K: std::hash::Hash + Eq,
	F: Fn(&TransferTx) -> K,
{
	let mut index: HashMap<K, usize> = HashMap::new();
	let mut merged: Vec<TransferTx> = Vec::new();

	for transfer in transfers {
		match index.get(&key(&transfer)) {
			Some(&i) => merged[i].value += transfer.value,
			None => {
				index.insert(key(&transfer), merged.len());
				merged.push(transfer);
			}
		}
	}
	merged
}

/// Key: (from, to, symbol)
fn aggregate_account_based(transfers: Vec<TransferTx>) -> Vec<TransferTx> {
	sum_by_key(transfers, |t| {
		(t.from_address.clone(), t.to_address.clone(), t.symbol.clone())
	})
}

/// Key: (from, to, memo, symbol). Transfers without a memo pass through
/// untouched after the aggregated ones.
fn aggregate_memo_based(transfers: Vec<TransferTx>) -> Vec<TransferTx> {
	let (with_memo, without_memo): (Vec<_>, Vec<_>) = transfers
		.into_iter()
		.partition(|t| t.memo.as_deref().map(|m| !m.is_empty()).unwrap_or(false));

	let mut aggregated = sum_by_key(with_memo, |t| {
		(
			t.from_address.clone(),
			t.to_address.clone(),
			t.memo.clone(),
			t.symbol.clone(),
		)
	});
	aggregated.extend(without_memo);
	aggregated
}

/// Nets inputs against outputs per address.
///
/// Outgoing values are summed per sender. Each output then either reduces its
/// receiver's outgoing sum (change) or accumulates as incoming. A negative
/// net means the sender received more than it spent, so it turns into an
/// incoming transfer with an empty sender.
fn aggregate_utxo_based(transfers: Vec<TransferTx>) -> Vec<TransferTx> {
	let mut senders: Vec<TransferTx> = Vec::new();
	let mut sender_index: HashMap<String, usize> = HashMap::new();

	for transfer in transfers.iter().filter(|t| !t.from_address.is_empty()) {
		match sender_index.get(&transfer.from_address) {
			Some(&i) => senders[i].value += transfer.value,
			None => {
				sender_index.insert(transfer.from_address.clone(), senders.len());
				senders.push(transfer.clone());
			}
		}
	}

	let mut receivers: Vec<TransferTx> = Vec::new();
	let mut receiver_index: HashMap<String, usize> = HashMap::new();

	for transfer in transfers.iter().filter(|t| !t.to_address.is_empty()) {
		if let Some(&i) = sender_index.get(&transfer.to_address) {
			senders[i].value -= transfer.value;
		} else if let Some(&i) = receiver_index.get(&transfer.to_address) {
			receivers[i].value += transfer.value;
		} else {
			receiver_index.insert(transfer.to_address.clone(), receivers.len());
			let mut incoming = transfer.clone();
			incoming.from_address = String::new();
			receivers.push(incoming);
		}
	}

	for sender in senders.iter_mut() {
		sender.to_address = String::new();
		if sender.value < Decimal::ZERO {
			sender.value = sender.value.abs();
			sender.to_address = std::mem::take(&mut sender.from_address);
		}
	}

	senders.into_iter().chain(receivers).collect()
}
