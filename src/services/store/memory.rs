//! In-memory store with an optional JSON snapshot on disk.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, HashSet},
	path::{Path, PathBuf},
	sync::Arc,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
	models::{BlockStats, DefaultProviderAssignment, Operation, ProviderStatus, Transfer},
	services::store::{ExplorerStore, StoreResult, StoreTransaction},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
	next_id: u64,
	transfers: BTreeMap<u64, Transfer>,
	block_stats: BTreeMap<String, BlockStats>,
	provider_statuses: Vec<ProviderStatus>,
	default_providers: Vec<DefaultProviderAssignment>,
}

impl StoreState {
	fn set_min_available_block(&mut self, network: &str, height: u64) {
		self.block_stats.insert(
			network.to_string(),
			BlockStats {
				network: network.to_string(),
				min_available_block: height,
			},
		);
	}
}

/// Store keeping every table in memory behind one async mutex.
///
/// With a snapshot path, the whole state is written to disk after each
/// mutation and read back by [`MemoryStore::open`].
#[derive(Clone, Default)]
pub struct MemoryStore {
	state: Arc<Mutex<StoreState>>,
	snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Open a store backed by a snapshot file, loading it when it exists
	pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
		let path = path.into();
		let state = if tokio::fs::try_exists(&path).await? {
			let content = tokio::fs::read(&path).await?;
			let state: StoreState = serde_json::from_slice(&content)?;
			tracing::info!(
				path = %path.display(),
				transfers = state.transfers.len(),
				"loaded store snapshot"
			);
			state
		} else {
			StoreState::default()
		};

		Ok(Self {
			state: Arc::new(Mutex::new(state)),
			snapshot_path: Some(path),
		})
	}

	/// Apply `change` to a copy of `state` and swap the copy in once the
	/// snapshot holds it. A failed snapshot write leaves `state` untouched.
	async fn apply(
		&self,
		state: &mut StoreState,
		change: impl FnOnce(&mut StoreState),
	) -> StoreResult<()> {
		let mut next = state.clone();
		change(&mut next);
		if let Some(path) = &self.snapshot_path {
			write_snapshot(path, &next).await?;
		}
		*state = next;
		Ok(())
	}
}

/// Write to a sibling file first so a crash never leaves a torn snapshot
async fn write_snapshot(path: &Path, state: &StoreState) -> StoreResult<()> {
	let content = serde_json::to_vec_pretty(state)?;
	let tmp_path = path.with_extension("tmp");
	tokio::fs::write(&tmp_path, content).await?;
	tokio::fs::rename(&tmp_path, path).await?;
	Ok(())
}

#[async_trait]
impl ExplorerStore for MemoryStore {
	async fn insert_transfers(&self, transfers: Vec<Transfer>) -> StoreResult<usize> {
		let mut state = self.state.lock().await;
		let mut keys: HashSet<_> = state.transfers.values().map(Transfer::key).collect();
		let fresh: Vec<Transfer> = transfers
			.into_iter()
			.filter(|transfer| keys.insert(transfer.key()))
			.collect();
		if fresh.is_empty() {
			return Ok(0);
		}

		let inserted = fresh.len();
		self.apply(&mut state, |next| {
			for mut transfer in fresh {
				next.next_id += 1;
				transfer.id = next.next_id;
				next.transfers.insert(transfer.id, transfer);
			}
		})
		.await?;
		Ok(inserted)
	}

	async fn latest_transfer(&self, network: &str) -> StoreResult<Option<Transfer>> {
		let state = self.state.lock().await;
		Ok(state
			.transfers
			.values()
			.filter(|t| t.network == network)
			.max_by_key(|t| (t.created_at, t.id))
			.cloned())
	}

	async fn latest_transfer_by_symbol(
		&self,
		network: &str,
		symbol: &str,
	) -> StoreResult<Option<Transfer>> {
		let state = self.state.lock().await;
		Ok(state
			.transfers
			.values()
			.filter(|t| t.network == network && t.symbol.eq_ignore_ascii_case(symbol))
			.max_by_key(|t| (t.created_at, t.id))
			.cloned())
	}

	async fn max_block_height(
		&self,
		network: &str,
		operation: Operation,
	) -> StoreResult<Option<u64>> {
		let state = self.state.lock().await;
		Ok(state
			.transfers
			.values()
			.filter(|t| t.network == network && t.source_operation == operation)
			.filter_map(|t| t.block_height)
			.max())
	}

	async fn transfers(&self, network: &str) -> StoreResult<Vec<Transfer>> {
		let state = self.state.lock().await;
		Ok(state
			.transfers
			.values()
			.filter(|t| t.network == network)
			.cloned()
			.collect())
	}

	async fn block_stats(&self, network: &str) -> StoreResult<Option<BlockStats>> {
		let state = self.state.lock().await;
		Ok(state.block_stats.get(network).cloned())
	}

	async fn upsert_provider_status(&self, status: ProviderStatus) -> StoreResult<()> {
		let mut state = self.state.lock().await;
		self.apply(&mut state, |next| {
			match next.provider_statuses.iter_mut().find(|s| {
				s.network == status.network
					&& s.provider == status.provider
					&& s.operation == status.operation
			}) {
				Some(existing) => *existing = status,
				None => next.provider_statuses.push(status),
			}
		})
		.await
	}

	async fn provider_status(
		&self,
		network: &str,
		provider: &str,
		operation: Operation,
	) -> StoreResult<Option<ProviderStatus>> {
		let state = self.state.lock().await;
		Ok(state
			.provider_statuses
			.iter()
			.find(|s| s.network == network && s.provider == provider && s.operation == operation)
			.cloned())
	}

	async fn default_provider(
		&self,
		network: &str,
		operation: Operation,
	) -> StoreResult<Option<DefaultProviderAssignment>> {
		let state = self.state.lock().await;
		Ok(state
			.default_providers
			.iter()
			.find(|a| a.network == network && a.operation == operation)
			.cloned())
	}

	async fn set_default_provider(&self, assignment: DefaultProviderAssignment) -> StoreResult<()> {
		let mut state = self.state.lock().await;
		self.apply(&mut state, |next| {
			match next
				.default_providers
				.iter_mut()
				.find(|a| a.network == assignment.network && a.operation == assignment.operation)
			{
				Some(existing) => *existing = assignment,
				None => next.default_providers.push(assignment),
			}
		})
		.await
	}

	async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
		let guard = self.state.clone().lock_owned().await;
		let working = guard.clone();
		Ok(Box::new(MemoryTransaction {
			guard,
			working,
			snapshot_path: self.snapshot_path.clone(),
		}))
	}
}

/// Holds the store lock for its whole lifetime and writes to a private copy
/// of the state. Commit swaps the copy in; drop throws it away.
struct MemoryTransaction {
	guard: OwnedMutexGuard<StoreState>,
	working: StoreState,
	snapshot_path: Option<PathBuf>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
	async fn select_transfers_before(
		&mut self,
		network: &str,
		operation: Operation,
		before: DateTime<Utc>,
	) -> StoreResult<Vec<Transfer>> {
		Ok(self
			.working
			.transfers
			.values()
			.filter(|t| {
				t.network == network && t.source_operation == operation && t.created_at < before
			})
			.cloned()
			.collect())
	}

	async fn delete_transfers(&mut self, ids: &[u64]) -> StoreResult<usize> {
		Ok(ids
			.iter()
			.filter(|id| self.working.transfers.remove(*id).is_some())
			.count())
	}

	async fn block_stats(&mut self, network: &str) -> StoreResult<Option<BlockStats>> {
		Ok(self.working.block_stats.get(network).cloned())
	}

	async fn set_min_available_block(&mut self, network: &str, height: u64) -> StoreResult<()> {
		self.working.set_min_available_block(network, height);
		Ok(())
	}

	async fn commit(self: Box<Self>) -> StoreResult<()> {
		let MemoryTransaction {
			mut guard,
			working,
			snapshot_path,
		} = *self;

		if let Some(path) = snapshot_path {
			write_snapshot(&path, &working).await?;
		}
		*guard = working;
		Ok(())
	}
}
