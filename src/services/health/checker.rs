//! Provider health checker.
//!
//! A run for (network, operation) takes a reference sample from the store,
//! asks the default provider for it, then asks every alternative provider
//! for the same sample and compares the answers to the default one. Each
//! alternative's verdict is published as metrics, persisted as a
//! [`ProviderStatus`] and sent as an alert as soon as its check completes.
//! A run that cannot start is alerted as well.

use chrono::Utc;
use futures::{stream, StreamExt};
use rand::seq::SliceRandom;
use std::{
	sync::Arc,
	time::{Duration, Instant},
};
use tracing::instrument;

use crate::{
	models::{
		HealthStatus, Network, Operation, Provider, ProviderStatus, TokenContract, Transfer,
		TransferTx,
	},
	repositories::{NetworkRepositoryTrait, NetworkService, ProviderRepositoryTrait, ProviderService},
	services::{
		explorer::{AdapterRegistry, ExplorerAdapter, ExplorerError},
		health::{
			compare_transfers, database_mismatches, format_alert, format_run_failure,
			DefaultProviderSelector, HealthCheckConfig, HealthCheckError, ResponseSize,
		},
		notification::Notifier,
		store::ExplorerStore,
	},
	utils::{
		metrics::{
			ProviderLabels, TokenLabels, BLOCK_HEAD_DIFFERENCE, HEALTH_CHECK_ACCURACY,
			HEALTH_CHECK_COMPLETENESS, HEALTH_CHECK_DATABASE_MATCH, HEALTH_CHECK_EMPTY_RESPONSE,
			HEALTH_CHECK_LAST_STATUS, HEALTH_CHECK_PROVIDER_ERROR, HEALTH_CHECK_RESPONSE_SIZE,
			HEALTH_CHECK_RESPONSE_TIME, HEALTH_CHECK_RETRIES_FOR_SUCCESS, HEALTH_CHECK_SPEED,
			HEALTH_CHECK_STATUS, TOKEN_TXS_ACCURACY, TOKEN_TXS_COMPLETENESS,
			TOKEN_TXS_EMPTY_RESPONSE, TOKEN_TXS_LAST_STATUS, TOKEN_TXS_RESPONSE_TIME,
			TOKEN_TXS_RETRIES_FOR_SUCCESS,
		},
		MaybeEmpty, RetryOutcome,
	},
};

const STATUS_OK: u16 = 200;
const STATUS_FAILED: u16 = 400;

/// What every provider is asked for during one run
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceSample {
	/// Latest stored transfer, looked up by its hash. For a token transfer
	/// only the token transfers of the transaction are compared.
	TxDetails(Transfer),
	/// Window of recent stored blocks
	BlockTxs { min_block: u64, max_block: u64 },
	AddressTxs(String),
	/// Transfers of one configured token involving the receiver of its
	/// latest stored transfer
	TokenTxs {
		symbol: String,
		contract: String,
		address: String,
	},
	BlockHead,
}

impl ReferenceSample {
	fn blocks(&self) -> Option<u64> {
		match self {
			Self::BlockTxs {
				min_block,
				max_block,
			} => Some(max_block - min_block + 1),
			_ => None,
		}
	}

	pub fn token(&self) -> Option<&str> {
		match self {
			Self::TokenTxs { symbol, .. } => Some(symbol),
			_ => None,
		}
	}

	/// Alert line naming what was sampled
	fn alert_detail(&self) -> Option<String> {
		match self {
			Self::TokenTxs {
				symbol,
				contract,
				address,
			} => Some(format!("sampled token {} ({}) at {}", symbol, contract, address)),
			Self::AddressTxs(address) => Some(format!("sampled address {}", address)),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
	Transfers(Vec<TransferTx>),
	BlockHead(u64),
}

/// A provider answer and how long the call took
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSample {
	pub data: SampleData,
	pub elapsed: Duration,
}

impl MaybeEmpty for TimedSample {
	fn is_empty_result(&self) -> bool {
		matches!(&self.data, SampleData::Transfers(transfers) if transfers.is_empty())
	}
}

/// Verdict on one alternative provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCheckOutcome {
	pub provider: String,
	pub status: HealthStatus,
	pub details: Vec<String>,
	pub attempts: u32,
	pub last_status: u16,
	/// Every attempt failed
	pub alt_provider_error: bool,
	/// Every attempt answered empty
	pub empty_response: bool,
	pub response_size: Option<ResponseSize>,
	pub response_time: Option<Duration>,
	pub accuracy: Option<f64>,
	pub completeness: Option<f64>,
	/// `block_txs` only: blocks served within the network block time
	pub speed: Option<bool>,
	/// `tx_details` only: agreement with the stored reference transfer
	pub database_match: Option<bool>,
	/// `block_head` only: provider head minus default head
	pub block_head_difference: Option<i64>,
}

impl ProviderCheckOutcome {
	fn new(provider: String, attempts: u32) -> Self {
		Self {
			provider,
			status: HealthStatus::Healthy,
			details: Vec::new(),
			attempts,
			last_status: STATUS_FAILED,
			alt_provider_error: false,
			empty_response: false,
			response_size: None,
			response_time: None,
			accuracy: None,
			completeness: None,
			speed: None,
			database_match: None,
			block_head_difference: None,
		}
	}

	fn fail(&mut self, detail: impl Into<String>) {
		self.status = HealthStatus::Unhealthy;
		self.details.push(detail.into());
	}

	fn note(&mut self, detail: impl Into<String>) {
		self.details.push(detail.into());
	}
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheckReport {
	pub network: String,
	pub operation: Operation,
	pub default_provider: String,
	/// One entry per alternative, in completion order
	pub outcomes: Vec<ProviderCheckOutcome>,
}

impl HealthCheckReport {
	pub fn outcome(&self, provider: &str) -> Option<&ProviderCheckOutcome> {
		self.outcomes.iter().find(|o| o.provider == provider)
	}

	pub fn unhealthy(&self) -> impl Iterator<Item = &ProviderCheckOutcome> {
		self.outcomes.iter().filter(|o| !o.status.is_healthy())
	}
}

/// Everything an alternative is judged against
pub struct CheckContext<'a> {
	pub network: &'a Network,
	pub operation: Operation,
	pub default_provider: &'a str,
	pub reference: &'a ReferenceSample,
	pub default_sample: &'a TimedSample,
}

/// Judges an alternative's retried answer against the default provider's
pub fn evaluate_alternative(
	ctx: &CheckContext<'_>,
	config: &HealthCheckConfig,
	provider: &str,
	retry: RetryOutcome<TimedSample, ExplorerError>,
) -> ProviderCheckOutcome {
	let mut outcome = ProviderCheckOutcome::new(provider.to_string(), retry.attempts);

	let sample = match retry.result {
		Err(e) => {
			outcome.alt_provider_error = true;
			outcome.fail(format!(
				"provider error after {} attempts: {}",
				retry.attempts, e
			));
			return outcome;
		}
		Ok(sample) if sample.is_empty_result() => {
			outcome.empty_response = true;
			outcome.response_size = Some(ResponseSize::Empty);
			outcome.fail(format!("empty response after {} attempts", retry.attempts));
			return outcome;
		}
		Ok(sample) => sample,
	};

	outcome.last_status = STATUS_OK;
	outcome.response_time = Some(sample.elapsed);

	match (&ctx.default_sample.data, &sample.data) {
		(SampleData::Transfers(default), SampleData::Transfers(alternative)) => {
			let comparison = compare_transfers(default, alternative);
			outcome.accuracy = Some(comparison.accuracy);
			outcome.completeness = Some(comparison.completeness);
			outcome.response_size = Some(comparison.response_size());

			if !comparison.covers_default() {
				outcome.fail(format!(
					"response smaller than default provider: {} of {} transfers missing",
					comparison.missing,
					comparison.missing + comparison.common
				));
			} else if comparison.extra > 0 {
				let detail = format!(
					"response larger than default provider: {} extra transfers",
					comparison.extra
				);
				if config.superset_is_unhealthy {
					outcome.fail(detail);
				} else {
					outcome.note(detail);
				}
			}

			if let Some(blocks) = ctx.reference.blocks() {
				let per_block_ms = sample.elapsed.as_secs_f64() * 1000.0 / blocks as f64;
				let slow = per_block_ms > ctx.network.block_time_ms as f64;
				outcome.speed = Some(!slow);
				if slow {
					outcome.fail(format!(
						"slow: {:.0}ms per block, block time {}ms",
						per_block_ms, ctx.network.block_time_ms
					));
				}
			}

			if let ReferenceSample::TxDetails(reference) = ctx.reference {
				let mismatches = database_mismatches(reference, alternative);
				outcome.database_match = Some(mismatches.is_empty());
				for field in mismatches {
					outcome.fail(format!("database mismatch: {}", field));
				}
			}
		}
		(SampleData::BlockHead(default), SampleData::BlockHead(alternative)) => {
			let difference = *alternative as i64 - *default as i64;
			outcome.block_head_difference = Some(difference);
			if difference.unsigned_abs() > config.block_head_tolerance {
				outcome.fail(format!(
					"block head {} differs from default {} by {}",
					alternative, default, difference
				));
			}
		}
		_ => outcome.fail("answer does not match the checked operation"),
	}

	outcome
}

pub struct ProviderHealthChecker<N: NetworkRepositoryTrait, P: ProviderRepositoryTrait> {
	networks: Arc<NetworkService<N>>,
	providers: Arc<ProviderService<P>>,
	selector: DefaultProviderSelector<P>,
	adapters: Arc<AdapterRegistry>,
	store: Arc<dyn ExplorerStore>,
	notifier: Arc<dyn Notifier>,
	config: HealthCheckConfig,
}

/// Everything resolved before any provider is called
struct PreparedRun {
	network: Network,
	reference: ReferenceSample,
	default: Provider,
	default_adapter: Arc<dyn ExplorerAdapter>,
}

impl<N: NetworkRepositoryTrait, P: ProviderRepositoryTrait> ProviderHealthChecker<N, P> {
	pub fn new(
		networks: Arc<NetworkService<N>>,
		providers: Arc<ProviderService<P>>,
		adapters: Arc<AdapterRegistry>,
		store: Arc<dyn ExplorerStore>,
		notifier: Arc<dyn Notifier>,
		config: HealthCheckConfig,
	) -> Self {
		Self {
			selector: DefaultProviderSelector::new(store.clone(), providers.clone()),
			networks,
			providers,
			adapters,
			store,
			notifier,
			config,
		}
	}

	pub fn selector(&self) -> &DefaultProviderSelector<P> {
		&self.selector
	}

	/// Checks every alternative provider of `operation` on `network`.
	///
	/// Failures of single alternatives are part of the report. An error means
	/// the run could not start or the default provider failed; both are
	/// alerted before they are returned.
	#[instrument(skip_all, fields(network = %network_name, operation = %operation))]
	pub async fn run(
		&self,
		network_name: &str,
		operation: Operation,
	) -> Result<HealthCheckReport, HealthCheckError> {
		let PreparedRun {
			network,
			reference,
			default,
			default_adapter,
		} = match self.prepare(network_name, operation).await {
			Ok(prepared) => prepared,
			Err(error) => {
				self.alert(&format_run_failure(network_name, operation, &error))
					.await;
				return Err(error);
			}
		};

		let default_sample = self
			.check_default(&network, operation, &default, default_adapter.as_ref(), &reference)
			.await?;

		let alternatives: Vec<(Provider, Arc<dyn ExplorerAdapter>)> = self
			.providers
			.alternatives(network_name, operation, &default.name)
			.into_iter()
			.filter_map(|provider| match self.adapters.for_provider(&provider) {
				Some(adapter) => Some((provider, adapter)),
				None => {
					tracing::warn!(
						provider = %provider.name,
						"no explorer adapter registered, provider skipped"
					);
					None
				}
			})
			.collect();

		let ctx = CheckContext {
			network: &network,
			operation,
			default_provider: &default.name,
			reference: &reference,
			default_sample: &default_sample,
		};

		// Each check records its own outcome before it completes
		let ctx = &ctx;
		let checks: Vec<_> = alternatives
			.into_iter()
			.map(move |(provider, adapter)| async move {
				let outcome = self.check_alternative(ctx, provider, adapter).await;
				self.record(ctx, &outcome).await;
				outcome
			})
			.collect();
		let outcomes: Vec<ProviderCheckOutcome> = stream::iter(checks)
			.buffer_unordered(self.config.max_workers.max(1))
			.collect()
			.await;

		tracing::info!(
			default_provider = %default.name,
			checked = outcomes.len(),
			unhealthy = outcomes.iter().filter(|o| !o.status.is_healthy()).count(),
			"health check finished"
		);

		Ok(HealthCheckReport {
			network: network.name.clone(),
			operation,
			default_provider: default.name.clone(),
			outcomes,
		})
	}

	async fn prepare(
		&self,
		network_name: &str,
		operation: Operation,
	) -> Result<PreparedRun, HealthCheckError> {
		if operation == Operation::Balance {
			return Err(HealthCheckError::unsupported_operation(format!(
				"{} is not health-checked",
				operation
			)));
		}

		let network = self.networks.get(network_name).ok_or_else(|| {
			HealthCheckError::network_not_found(format!("'{}' is not configured", network_name))
		})?;

		if self.providers.providers_for(network_name, operation).is_empty() {
			return Err(HealthCheckError::provider_not_found(format!(
				"no provider supports {} on {}",
				operation, network_name
			)));
		}

		let reference = self.reference_sample(&network, operation).await?;

		let default = self.selector.default_provider(network_name, operation).await?;
		let default_adapter = self.adapters.for_provider(&default).ok_or_else(|| {
			HealthCheckError::provider_not_found(format!(
				"no explorer adapter for default provider '{}'",
				default.name
			))
		})?;

		Ok(PreparedRun {
			network,
			reference,
			default,
			default_adapter,
		})
	}

	async fn reference_sample(
		&self,
		network: &Network,
		operation: Operation,
	) -> Result<ReferenceSample, HealthCheckError> {
		match operation {
			Operation::TxDetails => {
				let transfer = self.latest_transfer(network).await?;
				Ok(ReferenceSample::TxDetails(transfer))
			}
			Operation::AddressTxs => {
				let transfer = self.latest_transfer(network).await?;
				let address = receiving_address(&transfer).ok_or_else(|| {
					HealthCheckError::transaction_not_found(format!(
						"latest transfer of {} has no address",
						network.name
					))
				})?;
				Ok(ReferenceSample::AddressTxs(address))
			}
			Operation::TokenTxs => self.token_reference(network).await,
			Operation::BlockTxs => {
				let max_block = self
					.store
					.max_block_height(&network.name, Operation::BlockTxs)
					.await?
					.ok_or_else(|| {
						HealthCheckError::not_found(format!("no stored blocks for {}", network.name))
					})?;
				let min_available = self
					.store
					.block_stats(&network.name)
					.await?
					.map(|stats| stats.min_available_block)
					.unwrap_or(0);
				let window = network
					.health_check
					.as_ref()
					.and_then(|h| h.block_txs_window)
					.unwrap_or(self.config.block_txs_window)
					.max(1);

				let min_block = max_block.saturating_sub(window - 1).max(min_available);
				if min_block > max_block {
					return Err(HealthCheckError::not_found(format!(
						"stored blocks of {} are below the retention watermark {}",
						network.name, min_available
					)));
				}
				Ok(ReferenceSample::BlockTxs {
					min_block,
					max_block,
				})
			}
			Operation::BlockHead => Ok(ReferenceSample::BlockHead),
			Operation::Balance => Err(HealthCheckError::unsupported_operation(format!(
				"{} is not health-checked",
				operation
			))),
		}
	}

	/// Tries the configured tokens in random order and samples the first one
	/// with a stored transfer
	async fn token_reference(&self, network: &Network) -> Result<ReferenceSample, HealthCheckError> {
		if network.tokens.is_empty() {
			return Err(HealthCheckError::not_found(format!(
				"no tokens configured for {}",
				network.name
			)));
		}

		let mut tokens: Vec<&TokenContract> = network.tokens.iter().collect();
		tokens.shuffle(&mut rand::rng());

		for token in tokens {
			let Some(transfer) = self
				.store
				.latest_transfer_by_symbol(&network.name, &token.symbol)
				.await?
			else {
				tracing::debug!(token = %token.symbol, "no stored transfer, trying next token");
				continue;
			};
			if let Some(address) = receiving_address(&transfer) {
				return Ok(ReferenceSample::TokenTxs {
					symbol: token.symbol.clone(),
					contract: token.contract.clone(),
					address,
				});
			}
		}

		Err(HealthCheckError::transaction_not_found(format!(
			"no stored transfer of any configured token on {}",
			network.name
		)))
	}

	async fn latest_transfer(&self, network: &Network) -> Result<Transfer, HealthCheckError> {
		self.store
			.latest_transfer(&network.name)
			.await?
			.ok_or_else(|| {
				HealthCheckError::transaction_not_found(format!(
					"no stored transfer for {}",
					network.name
				))
			})
	}

	async fn sample(
		adapter: &dyn ExplorerAdapter,
		provider: &str,
		reference: &ReferenceSample,
	) -> Result<TimedSample, ExplorerError> {
		let started = Instant::now();
		let data = match reference {
			ReferenceSample::TxDetails(transfer) if is_token_transfer(transfer) => {
				SampleData::Transfers(
					adapter
						.sample_get_token_tx_details(provider, &transfer.tx_hash)
						.await?,
				)
			}
			ReferenceSample::TxDetails(transfer) => SampleData::Transfers(
				adapter
					.sample_get_tx_details(provider, &transfer.tx_hash)
					.await?,
			),
			ReferenceSample::BlockTxs {
				min_block,
				max_block,
			} => SampleData::Transfers(
				adapter
					.sample_get_blocks(provider, *min_block, *max_block)
					.await?,
			),
			ReferenceSample::AddressTxs(address) => {
				SampleData::Transfers(adapter.sample_get_address_txs(provider, address).await?)
			}
			ReferenceSample::TokenTxs {
				contract, address, ..
			} => SampleData::Transfers(
				adapter
					.sample_get_token_txs(provider, address, contract)
					.await?,
			),
			ReferenceSample::BlockHead => {
				SampleData::BlockHead(adapter.sample_get_block_head(provider).await?)
			}
		};
		Ok(TimedSample {
			data,
			elapsed: started.elapsed(),
		})
	}

	async fn check_default(
		&self,
		network: &Network,
		operation: Operation,
		default: &Provider,
		adapter: &dyn ExplorerAdapter,
		reference: &ReferenceSample,
	) -> Result<TimedSample, HealthCheckError> {
		let retry = self
			.config
			.default_retry
			.run(|| Self::sample(adapter, &default.name, reference))
			.await;

		let mut outcome = ProviderCheckOutcome::new(default.name.clone(), retry.attempts);
		let sample = match retry.result {
			Ok(sample) if !sample.is_empty_result() => {
				outcome.last_status = STATUS_OK;
				outcome.response_time = Some(sample.elapsed);
				Some(sample)
			}
			Ok(_) => {
				outcome.empty_response = true;
				outcome.fail(format!("empty response after {} attempts", retry.attempts));
				None
			}
			Err(e) => {
				outcome.alt_provider_error = true;
				outcome.fail(format!(
					"provider error after {} attempts: {}",
					retry.attempts, e
				));
				None
			}
		};

		publish_metrics(network, operation, reference, &outcome);
		self.persist_status(
			network,
			operation,
			&default.name,
			outcome.status,
			outcome.details.clone(),
		)
		.await;

		if let Some(sample) = sample {
			return Ok(sample);
		}

		self.alert(&format_alert(
			&network.name,
			operation,
			&default.name,
			None,
			HealthStatus::Unhealthy,
			&alert_details(reference, &outcome),
		))
		.await;

		Err(HealthCheckError::default_provider_failed(format!(
			"'{}' for {} on {}: {}",
			default.name,
			operation,
			network.name,
			outcome.details.join("; ")
		)))
	}

	async fn check_alternative(
		&self,
		ctx: &CheckContext<'_>,
		provider: Provider,
		adapter: Arc<dyn ExplorerAdapter>,
	) -> ProviderCheckOutcome {
		let retry = self
			.config
			.alternative_retry
			.run(|| Self::sample(adapter.as_ref(), &provider.name, ctx.reference))
			.await;
		evaluate_alternative(ctx, &self.config, &provider.name, retry)
	}

	async fn record(&self, ctx: &CheckContext<'_>, outcome: &ProviderCheckOutcome) {
		publish_metrics(ctx.network, ctx.operation, ctx.reference, outcome);

		if let Some(difference) = outcome.block_head_difference {
			BLOCK_HEAD_DIFFERENCE
				.with_label_values(&[ctx.network.name.as_str(), outcome.provider.as_str()])
				.set(difference as f64);
		}

		if !outcome.status.is_healthy() {
			tracing::warn!(
				provider = %outcome.provider,
				details = ?outcome.details,
				"provider unhealthy"
			);
		}

		self.persist_status(
			ctx.network,
			ctx.operation,
			&outcome.provider,
			outcome.status,
			outcome.details.clone(),
		)
		.await;
		self.alert(&format_alert(
			&ctx.network.name,
			ctx.operation,
			ctx.default_provider,
			Some(&outcome.provider),
			outcome.status,
			&alert_details(ctx.reference, outcome),
		))
		.await;
	}

	async fn persist_status(
		&self,
		network: &Network,
		operation: Operation,
		provider: &str,
		status: HealthStatus,
		details: Vec<String>,
	) {
		let result = self
			.store
			.upsert_provider_status(ProviderStatus {
				network: network.name.clone(),
				provider: provider.to_string(),
				operation,
				status,
				last_checked: Utc::now(),
				details,
			})
			.await;
		if let Err(e) = result {
			tracing::error!(provider, error = %e, "failed to store provider status");
		}
	}

	async fn alert(&self, message: &str) {
		if let Err(e) = self.notifier.notify(message).await {
			tracing::error!(error = %e, "failed to deliver alert");
		}
	}
}

fn is_token_transfer(transfer: &Transfer) -> bool {
	transfer.token.as_deref().is_some_and(|token| !token.is_empty())
}

/// Receiver of a transfer, or its sender when the receiver is unknown
fn receiving_address(transfer: &Transfer) -> Option<String> {
	[&transfer.to_address, &transfer.from_address]
		.into_iter()
		.find(|address| !address.is_empty())
		.cloned()
}

fn alert_details(reference: &ReferenceSample, outcome: &ProviderCheckOutcome) -> Vec<String> {
	let mut details = outcome.details.clone();
	details.extend(reference.alert_detail());
	details
}

fn publish_metrics(
	network: &Network,
	operation: Operation,
	reference: &ReferenceSample,
	outcome: &ProviderCheckOutcome,
) {
	let labels = ProviderLabels {
		network: &network.name,
		operation: operation.as_str(),
		provider: &outcome.provider,
	};
	let flag = |value: bool| if value { 1.0 } else { 0.0 };

	labels.set(&HEALTH_CHECK_LAST_STATUS, outcome.last_status as f64);
	labels.set(&HEALTH_CHECK_EMPTY_RESPONSE, flag(outcome.empty_response));
	labels.set(&HEALTH_CHECK_PROVIDER_ERROR, flag(outcome.alt_provider_error));
	labels.set(&HEALTH_CHECK_STATUS, flag(outcome.status.is_healthy()));

	if let Some(size) = outcome.response_size {
		labels.set(&HEALTH_CHECK_RESPONSE_SIZE, size.gauge_value());
	}
	if let Some(elapsed) = outcome.response_time {
		labels.set(&HEALTH_CHECK_RESPONSE_TIME, elapsed.as_secs_f64());
		labels.set(&HEALTH_CHECK_RETRIES_FOR_SUCCESS, outcome.attempts as f64);
	}
	if let Some(accuracy) = outcome.accuracy {
		labels.set(&HEALTH_CHECK_ACCURACY, accuracy);
	}
	if let Some(completeness) = outcome.completeness {
		labels.set(&HEALTH_CHECK_COMPLETENESS, completeness);
	}
	if let Some(speed) = outcome.speed {
		labels.set(&HEALTH_CHECK_SPEED, flag(speed));
	}
	if let Some(database_match) = outcome.database_match {
		labels.set(&HEALTH_CHECK_DATABASE_MATCH, flag(database_match));
	}

	let Some(token) = reference.token() else {
		return;
	};
	let token_labels = TokenLabels {
		network: &network.name,
		token,
		provider: &outcome.provider,
	};
	token_labels.set(&TOKEN_TXS_LAST_STATUS, outcome.last_status as f64);
	token_labels.set(&TOKEN_TXS_EMPTY_RESPONSE, flag(outcome.empty_response));
	if let Some(elapsed) = outcome.response_time {
		token_labels.set(&TOKEN_TXS_RESPONSE_TIME, elapsed.as_secs_f64());
		token_labels.set(&TOKEN_TXS_RETRIES_FOR_SUCCESS, outcome.attempts as f64);
	}
	if let Some(accuracy) = outcome.accuracy {
		token_labels.set(&TOKEN_TXS_ACCURACY, accuracy);
	}
	if let Some(completeness) = outcome.completeness {
		token_labels.set(&TOKEN_TXS_COMPLETENESS, completeness);
	}
}
