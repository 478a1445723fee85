//! Per-network explorer over several provider clients.
//!
//! `get_*` calls walk the providers configured for the operation in priority
//! order and return the first valid, non-empty answer. `sample_*` calls go to
//! one named provider and surface its failure to the caller.

use async_trait::async_trait;
use futures::{future::join_all, stream, StreamExt};
use std::{future::Future, sync::Arc};

use crate::{
	models::{Balance, Network, NetworkType, Operation, TransferTx},
	services::explorer::{aggregate_transfers, ExplorerError, ProviderApi},
	utils::MaybeEmpty,
};

const DEFAULT_MAX_WORKERS_FOR_GET_BLOCK: usize = 5;

/// Normalized capability interface of one network
#[async_trait]
pub trait ExplorerAdapter: Send + Sync {
	async fn get_tx_details(&self, tx_hash: &str) -> Result<Vec<TransferTx>, ExplorerError>;

	/// Transfers of every block in `min_height..=max_height`
	async fn get_block_txs(
		&self,
		min_height: u64,
		max_height: u64,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	async fn get_block_head(&self) -> Result<u64, ExplorerError>;

	async fn get_address_txs(&self, address: &str) -> Result<Vec<TransferTx>, ExplorerError>;

	/// Transfers of the token at `contract` involving `address`
	async fn get_token_txs(
		&self,
		address: &str,
		contract: &str,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	async fn get_balance(&self, address: &str) -> Result<Balance, ExplorerError>;

	/// Highest block head reported by any block-head provider. Failing
	/// providers are ignored; `None` when every one failed.
	async fn get_max_block_head_of_apis(&self) -> Option<u64>;

	async fn sample_get_tx_details(
		&self,
		provider: &str,
		tx_hash: &str,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	/// Token transfers of a transaction
	async fn sample_get_token_tx_details(
		&self,
		provider: &str,
		tx_hash: &str,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	async fn sample_get_blocks(
		&self,
		provider: &str,
		min_height: u64,
		max_height: u64,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	async fn sample_get_address_txs(
		&self,
		provider: &str,
		address: &str,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	async fn sample_get_token_txs(
		&self,
		provider: &str,
		address: &str,
		contract: &str,
	) -> Result<Vec<TransferTx>, ExplorerError>;

	async fn sample_get_block_head(&self, provider: &str) -> Result<u64, ExplorerError>;
}

/// Provider clients of a network, per operation and in priority order
#[derive(Clone)]
pub struct ExplorerConfig {
	pub network: String,
	pub network_type: NetworkType,
	pub tx_details_apis: Vec<Arc<dyn ProviderApi>>,
	pub block_txs_apis: Vec<Arc<dyn ProviderApi>>,
	pub block_head_apis: Vec<Arc<dyn ProviderApi>>,
	pub address_txs_apis: Vec<Arc<dyn ProviderApi>>,
	pub token_txs_apis: Vec<Arc<dyn ProviderApi>>,
	pub balance_apis: Vec<Arc<dyn ProviderApi>>,
	/// Blocks fetched concurrently by one provider
	pub max_workers_for_get_block: usize,
}

impl ExplorerConfig {
	pub fn new(network: &Network) -> Self {
		Self {
			network: network.name.clone(),
			network_type: network.network_type,
			tx_details_apis: Vec::new(),
			block_txs_apis: Vec::new(),
			block_head_apis: Vec::new(),
			address_txs_apis: Vec::new(),
			token_txs_apis: Vec::new(),
			balance_apis: Vec::new(),
			max_workers_for_get_block: DEFAULT_MAX_WORKERS_FOR_GET_BLOCK,
		}
	}

	/// Append `api` to the list of every operation in `operations`
	pub fn with_api(mut self, operations: &[Operation], api: Arc<dyn ProviderApi>) -> Self {
		for operation in operations {
			self.apis_mut(*operation).push(api.clone());
		}
		self
	}

	pub fn apis(&self, operation: Operation) -> &[Arc<dyn ProviderApi>] {
		match operation {
			Operation::TxDetails => &self.tx_details_apis,
			Operation::BlockTxs => &self.block_txs_apis,
			Operation::BlockHead => &self.block_head_apis,
			Operation::AddressTxs => &self.address_txs_apis,
			Operation::TokenTxs => &self.token_txs_apis,
			Operation::Balance => &self.balance_apis,
		}
	}

	fn apis_mut(&mut self, operation: Operation) -> &mut Vec<Arc<dyn ProviderApi>> {
		match operation {
			Operation::TxDetails => &mut self.tx_details_apis,
			Operation::BlockTxs => &mut self.block_txs_apis,
			Operation::BlockHead => &mut self.block_head_apis,
			Operation::AddressTxs => &mut self.address_txs_apis,
			Operation::TokenTxs => &mut self.token_txs_apis,
			Operation::Balance => &mut self.balance_apis,
		}
	}
}

impl MaybeEmpty for Balance {}

pub struct NetworkExplorer {
	config: ExplorerConfig,
}

impl NetworkExplorer {
	pub fn new(config: ExplorerConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ExplorerConfig {
		&self.config
	}

	fn find_api(
		&self,
		operation: Operation,
		provider: &str,
	) -> Result<&Arc<dyn ProviderApi>, ExplorerError> {
		self.config
			.apis(operation)
			.iter()
			.find(|api| api.name() == provider)
			.ok_or_else(|| ExplorerError::UnknownProvider {
				network: self.config.network.clone(),
				provider: provider.to_string(),
				operation,
			})
	}

	async fn with_fallback<'a, T, F, Fut>(
		&'a self,
		operation: Operation,
		call: F,
	) -> Result<T, ExplorerError>
	where
		T: MaybeEmpty,
		F: Fn(&'a Arc<dyn ProviderApi>) -> Fut,
		Fut: Future<Output = Result<T, ExplorerError>>,
	{
		let apis = self.config.apis(operation);
		if apis.is_empty() {
			return Err(ExplorerError::ProviderNotFound {
				network: self.config.network.clone(),
				operation,
			});
		}

		let mut empty = None;
		for api in apis {
			match call(api).await {
				Ok(result) if result.is_empty_result() => {
					tracing::debug!(
						network = %self.config.network,
						provider = %api.name(),
						%operation,
						"provider returned no data, trying next"
					);
					empty.get_or_insert(result);
				}
				Ok(result) => return Ok(result),
				Err(e) => {
					tracing::warn!(
						network = %self.config.network,
						provider = %api.name(),
						%operation,
						error = %e,
						"provider failed, trying next"
					);
				}
			}
		}

		empty.ok_or_else(|| ExplorerError::NotFound {
			network: self.config.network.clone(),
			operation,
		})
	}

	async fn block_head_of(api: &dyn ProviderApi) -> Result<u64, ExplorerError> {
		let response = api.get_block_head().await?;
		if !api.parser().validator().validate_block_head_response(&response) {
			return Err(ExplorerError::invalid_response(api.name(), Operation::BlockHead));
		}
		api.parser()
			.parse_block_head_response(&response)
			.ok_or_else(|| ExplorerError::invalid_response(api.name(), Operation::BlockHead))
	}

	async fn confirmation_head(api: &dyn ProviderApi) -> Result<Option<u64>, ExplorerError> {
		if api.need_block_head_for_confirmation() {
			Ok(Some(Self::block_head_of(api).await?))
		} else {
			Ok(None)
		}
	}

	async fn tx_details_of(
		&self,
		api: &dyn ProviderApi,
		tx_hash: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let block_head = Self::confirmation_head(api).await?;
		let response = api.get_tx_details(tx_hash).await?;
		if !api.parser().validator().validate_tx_details_response(&response) {
			return Err(ExplorerError::invalid_response(api.name(), Operation::TxDetails));
		}
		let transfers = api.parser().parse_tx_details_response(&response, block_head);
		Ok(aggregate_transfers(self.config.network_type, transfers))
	}

	async fn block_of(api: &dyn ProviderApi, height: u64) -> Result<Vec<TransferTx>, ExplorerError> {
		let response = api.get_block_txs(height).await?;
		if !api.parser().validator().validate_block_txs_response(&response) {
			return Err(ExplorerError::invalid_response(api.name(), Operation::BlockTxs));
		}
		Ok(api.parser().parse_block_txs_response(&response))
	}

	/// Any failing block fails the whole range for this provider
	async fn blocks_of(
		&self,
		api: &Arc<dyn ProviderApi>,
		min_height: u64,
		max_height: u64,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		if min_height > max_height {
			return Ok(Vec::new());
		}

		let results: Vec<Result<Vec<TransferTx>, ExplorerError>> = stream::iter(min_height..=max_height)
			.map(|height| {
				let api = api.clone();
				async move { Self::block_of(api.as_ref(), height).await }
			})
			.buffered(self.config.max_workers_for_get_block.max(1))
			.collect()
			.await;

		let mut transfers = Vec::new();
		for result in results {
			transfers.extend(result?);
		}
		Ok(transfers)
	}

	async fn address_txs_of(
		api: &dyn ProviderApi,
		address: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let block_head = Self::confirmation_head(api).await?;
		let response = api.get_address_txs(address).await?;
		if !api.parser().validator().validate_address_txs_response(&response) {
			return Err(ExplorerError::invalid_response(api.name(), Operation::AddressTxs));
		}
		Ok(api
			.parser()
			.parse_address_txs_response(address, &response, block_head))
	}

	/// Only transfers of `contract` are kept, whatever else the provider
	/// returns for the address
	async fn token_txs_of(
		api: &dyn ProviderApi,
		address: &str,
		contract: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let block_head = Self::confirmation_head(api).await?;
		let response = api.get_token_txs(address, contract).await?;
		if !api.parser().validator().validate_address_txs_response(&response) {
			return Err(ExplorerError::invalid_response(api.name(), Operation::TokenTxs));
		}
		Ok(api
			.parser()
			.parse_address_txs_response(address, &response, block_head)
			.into_iter()
			.filter(|t| {
				t.token
					.as_deref()
					.is_some_and(|token| token.eq_ignore_ascii_case(contract))
			})
			.collect())
	}

	async fn balance_of(api: &dyn ProviderApi, address: &str) -> Result<Balance, ExplorerError> {
		let response = api.get_balance(address).await?;
		if !api.parser().validator().validate_balance_response(&response) {
			return Err(ExplorerError::invalid_response(api.name(), Operation::Balance));
		}
		api.parser()
			.parse_balance_response(&response)
			.ok_or_else(|| ExplorerError::invalid_response(api.name(), Operation::Balance))
	}
}

#[async_trait]
impl ExplorerAdapter for NetworkExplorer {
	async fn get_tx_details(&self, tx_hash: &str) -> Result<Vec<TransferTx>, ExplorerError> {
		self.with_fallback(Operation::TxDetails, |api| {
			self.tx_details_of(api.as_ref(), tx_hash)
		})
		.await
	}

	async fn get_block_txs(
		&self,
		min_height: u64,
		max_height: u64,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		self.with_fallback(Operation::BlockTxs, |api| {
			self.blocks_of(api, min_height, max_height)
		})
		.await
	}

	async fn get_block_head(&self) -> Result<u64, ExplorerError> {
		self.with_fallback(Operation::BlockHead, |api| Self::block_head_of(api.as_ref()))
			.await
	}

	async fn get_address_txs(&self, address: &str) -> Result<Vec<TransferTx>, ExplorerError> {
		self.with_fallback(Operation::AddressTxs, |api| {
			Self::address_txs_of(api.as_ref(), address)
		})
		.await
	}

	async fn get_token_txs(
		&self,
		address: &str,
		contract: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		self.with_fallback(Operation::TokenTxs, |api| {
			Self::token_txs_of(api.as_ref(), address, contract)
		})
		.await
	}

	async fn get_balance(&self, address: &str) -> Result<Balance, ExplorerError> {
		self.with_fallback(Operation::Balance, |api| Self::balance_of(api.as_ref(), address))
			.await
	}

	async fn get_max_block_head_of_apis(&self) -> Option<u64> {
		let heads = join_all(
			self.config
				.block_head_apis
				.iter()
				.map(|api| Self::block_head_of(api.as_ref())),
		)
		.await;

		heads.into_iter().filter_map(Result::ok).max()
	}

	async fn sample_get_tx_details(
		&self,
		provider: &str,
		tx_hash: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let api = self.find_api(Operation::TxDetails, provider)?;
		self.tx_details_of(api.as_ref(), tx_hash).await
	}

	async fn sample_get_token_tx_details(
		&self,
		provider: &str,
		tx_hash: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let transfers = self.sample_get_tx_details(provider, tx_hash).await?;
		Ok(transfers
			.into_iter()
			.filter(|t| t.token.as_deref().map(|s| !s.is_empty()).unwrap_or(false))
			.collect())
	}

	async fn sample_get_blocks(
		&self,
		provider: &str,
		min_height: u64,
		max_height: u64,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let api = self.find_api(Operation::BlockTxs, provider)?;
		self.blocks_of(api, min_height, max_height).await
	}

	async fn sample_get_address_txs(
		&self,
		provider: &str,
		address: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let api = self.find_api(Operation::AddressTxs, provider)?;
		Self::address_txs_of(api.as_ref(), address).await
	}

	async fn sample_get_token_txs(
		&self,
		provider: &str,
		address: &str,
		contract: &str,
	) -> Result<Vec<TransferTx>, ExplorerError> {
		let api = self.find_api(Operation::TokenTxs, provider)?;
		Self::token_txs_of(api.as_ref(), address, contract).await
	}

	async fn sample_get_block_head(&self, provider: &str) -> Result<u64, ExplorerError> {
		let api = self.find_api(Operation::BlockHead, provider)?;
		Self::block_head_of(api.as_ref()).await
	}
}
