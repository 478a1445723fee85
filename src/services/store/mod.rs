//! Persistent store of transfers, watermarks, provider statuses and default
//! provider assignments.
//!
//! The store is the only shared mutable resource of the explorer. Writes that
//! must land together go through a [`StoreTransaction`]; dropping a
//! transaction without committing discards every write made through it.

mod error;
mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
	BlockStats, DefaultProviderAssignment, Operation, ProviderStatus, Transfer,
};

#[async_trait]
pub trait ExplorerStore: Send + Sync {
	/// Insert transfers, ignoring those whose identity key is already stored.
	/// Returns the number of rows inserted.
	async fn insert_transfers(&self, transfers: Vec<Transfer>) -> StoreResult<usize>;

	/// Most recently created transfer of a network, from any pipeline
	async fn latest_transfer(&self, network: &str) -> StoreResult<Option<Transfer>>;

	/// Most recently created transfer of a network carrying `symbol`,
	/// compared case-insensitively
	async fn latest_transfer_by_symbol(
		&self,
		network: &str,
		symbol: &str,
	) -> StoreResult<Option<Transfer>>;

	/// Highest block height among transfers produced by `operation`
	async fn max_block_height(
		&self,
		network: &str,
		operation: Operation,
	) -> StoreResult<Option<u64>>;

	async fn transfers(&self, network: &str) -> StoreResult<Vec<Transfer>>;

	async fn block_stats(&self, network: &str) -> StoreResult<Option<BlockStats>>;

	/// Insert or replace the status keyed by (network, provider, operation)
	async fn upsert_provider_status(&self, status: ProviderStatus) -> StoreResult<()>;

	async fn provider_status(
		&self,
		network: &str,
		provider: &str,
		operation: Operation,
	) -> StoreResult<Option<ProviderStatus>>;

	async fn default_provider(
		&self,
		network: &str,
		operation: Operation,
	) -> StoreResult<Option<DefaultProviderAssignment>>;

	async fn set_default_provider(&self, assignment: DefaultProviderAssignment) -> StoreResult<()>;

	/// Open a transaction. Transactions are serialized against each other.
	async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>>;
}

#[async_trait]
pub trait StoreTransaction: Send {
	async fn select_transfers_before(
		&mut self,
		network: &str,
		operation: Operation,
		before: DateTime<Utc>,
	) -> StoreResult<Vec<Transfer>>;

	/// Returns the number of rows removed
	async fn delete_transfers(&mut self, ids: &[u64]) -> StoreResult<usize>;

	async fn block_stats(&mut self, network: &str) -> StoreResult<Option<BlockStats>>;

	async fn set_min_available_block(&mut self, network: &str, height: u64) -> StoreResult<()>;

	/// Make every write of the transaction visible at once
	async fn commit(self: Box<Self>) -> StoreResult<()>;
}
