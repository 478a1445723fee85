//! Retention job for stored block transfers.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::Operation,
	services::{
		retention::{RetentionError, RetentionPolicy},
		store::ExplorerStore,
	},
	utils::metrics::{record_deleted_transfers, set_min_available_block},
};

const UNKNOWN_PROVIDER: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionOutcome {
	/// Nothing expired; the store is untouched
	Noop,
	Deleted {
		deleted: usize,
		min_available_block: u64,
	},
}

/// Deletes expired `block_txs` transfers of a network and advances its
/// `min_available_block` watermark in the same transaction
pub struct DeleteBlockTxsCron {
	store: Arc<dyn ExplorerStore>,
	policy: RetentionPolicy,
}

impl DeleteBlockTxsCron {
	pub fn new(store: Arc<dyn ExplorerStore>, policy: RetentionPolicy) -> Self {
		Self { store, policy }
	}

	pub fn policy(&self) -> &RetentionPolicy {
		&self.policy
	}

	/// Watermark only moves up. A failed run leaves both the transfers and
	/// the watermark as they were.
	#[instrument(skip_all, fields(network = %network))]
	pub async fn run(
		&self,
		network: &str,
		now: DateTime<Utc>,
	) -> Result<RetentionOutcome, RetentionError> {
		let delete_before = self.policy.delete_before(network, now);

		let mut tx = self.store.begin().await?;
		let expired = tx
			.select_transfers_before(network, Operation::BlockTxs, delete_before)
			.await?;
		let min_height = expired.iter().filter_map(|t| t.block_height).min();

		let outcome = match min_height {
			None => {
				drop(tx);
				tracing::debug!(%delete_before, "no expired block transfers");
				RetentionOutcome::Noop
			}
			Some(min_height) => {
				let ids: Vec<u64> = expired.iter().map(|t| t.id).collect();
				let deleted = tx.delete_transfers(&ids).await?;
				let previous = tx
					.block_stats(network)
					.await?
					.map(|stats| stats.min_available_block)
					.unwrap_or(0);
				let min_available_block = previous.max(min_height + 1);
				tx.set_min_available_block(network, min_available_block)
					.await?;
				tx.commit().await?;

				record_deleted_transfers(network, deleted);
				tracing::info!(
					deleted,
					min_available_block,
					%delete_before,
					"expired block transfers deleted"
				);
				RetentionOutcome::Deleted {
					deleted,
					min_available_block,
				}
			}
		};

		self.publish_watermark(network).await;
		Ok(outcome)
	}

	async fn publish_watermark(&self, network: &str) {
		let stats = match self.store.block_stats(network).await {
			Ok(Some(stats)) => stats,
			Ok(None) => return,
			Err(e) => {
				tracing::warn!(error = %e, "could not read block stats");
				return;
			}
		};
		let provider = match self.store.default_provider(network, Operation::BlockTxs).await {
			Ok(Some(assignment)) => assignment.provider,
			Ok(None) => UNKNOWN_PROVIDER.to_string(),
			Err(e) => {
				tracing::warn!(error = %e, "could not read default block_txs provider");
				UNKNOWN_PROVIDER.to_string()
			}
		};
		set_min_available_block(network, &provider, stats.min_available_block);
	}
}
