use std::collections::BTreeSet;

use crate::properties::strategies::transfers_strategy;

use explorer_monitor::{models::ComparableTransfer, services::health::compare_transfers};
use proptest::{prelude::*, test_runner::Config};

fn as_set(transfers: &[explorer_monitor::models::TransferTx]) -> BTreeSet<ComparableTransfer> {
	transfers.iter().map(Into::into).collect()
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_common_is_bounded_by_both_sets(
		default in transfers_strategy(),
		alternative in transfers_strategy(),
	) {
		let comparison = compare_transfers(&default, &alternative);
		let default_set = as_set(&default);
		let alternative_set = as_set(&alternative);

		prop_assert!(comparison.common <= default_set.len().min(alternative_set.len()));
		prop_assert_eq!(comparison.common + comparison.missing, default_set.len());
		prop_assert_eq!(comparison.common + comparison.extra, alternative_set.len());
	}

	#[test]
	fn test_covers_default_iff_subset(
		default in transfers_strategy(),
		alternative in transfers_strategy(),
	) {
		let comparison = compare_transfers(&default, &alternative);
		let is_subset = as_set(&default).is_subset(&as_set(&alternative));

		prop_assert_eq!(comparison.covers_default(), is_subset);
		prop_assert!((0.0..=1.0).contains(&comparison.completeness));
		if is_subset {
			prop_assert_eq!(comparison.completeness, 1.0);
		}
	}

	#[test]
	fn test_answer_always_covers_itself(
		default in transfers_strategy(),
	) {
		let comparison = compare_transfers(&default, &default);

		prop_assert!(comparison.covers_default());
		prop_assert_eq!(comparison.extra, 0);
		prop_assert_eq!(comparison.completeness, 1.0);
	}
}
