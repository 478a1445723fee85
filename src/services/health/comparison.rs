//! Set comparison of provider answers.

use std::collections::BTreeSet;

use crate::models::{ComparableTransfer, Transfer, TransferTx};

/// Size of an alternative's answer relative to the default provider's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSize {
	Equal,
	Larger,
	Smaller,
	Empty,
}

impl ResponseSize {
	pub fn gauge_value(&self) -> f64 {
		match self {
			Self::Equal => 0.0,
			Self::Larger => 1.0,
			Self::Smaller | Self::Empty => -1.0,
		}
	}
}

/// Outcome of comparing an alternative answer `A` to the default answer `D`
#[derive(Debug, Clone, PartialEq)]
pub struct TransferComparison {
	/// `|set D ∩ set A|`
	pub common: usize,
	/// `|set D − set A|`
	pub missing: usize,
	/// `|set A − set D|`
	pub extra: usize,
	/// `len(A) / len(D)` over the raw answers
	pub accuracy: f64,
	/// `|common| / |set D|`
	pub completeness: f64,
}

impl TransferComparison {
	pub fn response_size(&self) -> ResponseSize {
		if self.missing > 0 {
			ResponseSize::Smaller
		} else if self.extra > 0 {
			ResponseSize::Larger
		} else {
			ResponseSize::Equal
		}
	}

	/// Every transfer of the default answer is in the alternative answer
	pub fn covers_default(&self) -> bool {
		self.missing == 0
	}
}

pub fn compare_transfers(default: &[TransferTx], alternative: &[TransferTx]) -> TransferComparison {
	let default_set: BTreeSet<ComparableTransfer> = default.iter().map(Into::into).collect();
	let alternative_set: BTreeSet<ComparableTransfer> = alternative.iter().map(Into::into).collect();

	let common = default_set.intersection(&alternative_set).count();
	let missing = default_set.difference(&alternative_set).count();
	let extra = alternative_set.difference(&default_set).count();

	let accuracy = if default.is_empty() {
		if alternative.is_empty() {
			1.0
		} else {
			0.0
		}
	} else {
		alternative.len() as f64 / default.len() as f64
	};
	let completeness = if default_set.is_empty() {
		1.0
	} else {
		common as f64 / default_set.len() as f64
	};

	TransferComparison {
		common,
		missing,
		extra,
		accuracy,
		completeness,
	}
}

/// Fields of the stored reference transfer the alternative failed to
/// reproduce.
///
/// Fields are compared against the returned transfers sharing the
/// reference's hash, and the closest of them decides the verdict. Without
/// such a transfer only `tx_hash` is reported.
pub fn database_mismatches(reference: &Transfer, alternative: &[TransferTx]) -> Vec<&'static str> {
	alternative
		.iter()
		.filter(|t| t.tx_hash == reference.tx_hash)
		.map(|t| field_mismatches(reference, t))
		.min_by_key(Vec::len)
		.unwrap_or_else(|| vec!["tx_hash"])
}

fn field_mismatches(reference: &Transfer, transfer: &TransferTx) -> Vec<&'static str> {
	let mut mismatches = Vec::new();
	if transfer.from_address != reference.from_address || transfer.to_address != reference.to_address
	{
		mismatches.push("addresses");
	}
	if transfer.value.normalize() != reference.value.normalize() {
		mismatches.push("value");
	}
	if transfer.symbol != reference.symbol {
		mismatches.push("symbol");
	}
	mismatches
}
