use chrono::Utc;
use serde_json::json;
use std::{sync::Arc, time::Duration};

use explorer_monitor::{
	models::{HealthStatus, Network, Operation, Provider, Transfer, TransferTx},
	repositories::{NetworkRepository, NetworkService, ProviderRepository, ProviderService},
	services::{
		explorer::{
			AdapterRegistry, ExplorerAdapter, ExplorerConfig, ExplorerError, NetworkExplorer,
		},
		health::{HealthCheckConfig, HealthCheckError, ProviderHealthChecker},
		notification::Notifier,
		store::{ExplorerStore, MemoryStore},
	},
	utils::{
		metrics::{
			ProviderLabels, TokenLabels, HEALTH_CHECK_PROVIDER_ERROR, HEALTH_CHECK_STATUS,
			TOKEN_TXS_COMPLETENESS, TOKEN_TXS_LAST_STATUS,
		},
		tests::{NetworkBuilder, ProviderBuilder, TransferTxBuilder},
	},
};

use crate::integration::mocks::{
	transfer_json, MockExplorerAdapter, MockNotifier, ScriptedProviderApi, SlowNotifier,
};

const DEFAULT: &str = "hc_default";
const ALTERNATIVE: &str = "hc_alternative";

type Checker = ProviderHealthChecker<NetworkRepository, ProviderRepository>;

const CHECKED: [Operation; 3] = [Operation::TxDetails, Operation::BlockTxs, Operation::TokenTxs];

fn providers(network: &str) -> Vec<Provider> {
	vec![
		ProviderBuilder::new()
			.name(DEFAULT)
			.network(network)
			.operations(CHECKED.to_vec())
			.priority(0)
			.default_for(CHECKED.to_vec())
			.build(),
		ProviderBuilder::new()
			.name(ALTERNATIVE)
			.network(network)
			.operations(CHECKED.to_vec())
			.priority(1)
			.build(),
	]
}

fn stored(network: &Network, transfer: TransferTx) -> Transfer {
	Transfer::from_transfer_tx(&network.name, &transfer, Operation::BlockTxs, Utc::now())
}

async fn checker_with(
	network: Network,
	providers: Vec<Provider>,
	adapter: Arc<dyn ExplorerAdapter>,
	notifier: Arc<dyn Notifier>,
	transfers: Vec<Transfer>,
) -> (Arc<MemoryStore>, Checker) {
	let store = Arc::new(MemoryStore::new());
	store.insert_transfers(transfers).await.unwrap();

	let networks = Arc::new(NetworkService::new_with_repository(
		NetworkRepository::new_with_networks(vec![network]),
	));
	let providers = Arc::new(ProviderService::new_with_repository(
		ProviderRepository::new_with_providers(providers),
	));

	let mut registry = AdapterRegistry::new();
	registry.register("etc", adapter);

	let checker = ProviderHealthChecker::new(
		networks,
		providers,
		Arc::new(registry),
		store.clone(),
		notifier,
		HealthCheckConfig::default().without_delays(),
	);
	checker.selector().seed_defaults().await.unwrap();

	(store, checker)
}

async fn setup(
	network: Network,
	adapter: MockExplorerAdapter,
	notifier: MockNotifier,
) -> (Arc<MemoryStore>, Checker) {
	let transfers = vec![stored(&network, TransferTxBuilder::new().build())];
	let provider_list = providers(&network.name);
	checker_with(network, provider_list, Arc::new(adapter), Arc::new(notifier), transfers).await
}

fn answers(adapter: &mut MockExplorerAdapter, provider: &'static str, transfers: Vec<TransferTx>) {
	adapter
		.expect_sample_get_tx_details()
		.withf(move |name, _| name == provider)
		.returning(move |_, _| Ok(transfers.clone()));
}

fn notifier(alerts: usize) -> MockNotifier {
	let mut notifier = MockNotifier::new();
	notifier.expect_notify().times(alerts).returning(|_| Ok(()));
	notifier
}

/// Expects exactly one alert, saying the run did not start
fn run_failure_notifier(reason: &'static str) -> MockNotifier {
	let mut notifier = MockNotifier::new();
	notifier
		.expect_notify()
		.withf(move |message: &str| message.contains("Status: not run") && message.contains(reason))
		.times(1)
		.returning(|_| Ok(()));
	notifier
}

#[tokio::test]
async fn test_agreeing_provider_is_healthy() {
	let network = NetworkBuilder::new().name("hc_agree").build();
	let mut adapter = MockExplorerAdapter::new();
	answers(&mut adapter, DEFAULT, vec![TransferTxBuilder::new().build()]);
	answers(&mut adapter, ALTERNATIVE, vec![TransferTxBuilder::new().build()]);

	let (store, checker) = setup(network, adapter, notifier(1)).await;
	let report = checker.run("hc_agree", Operation::TxDetails).await.unwrap();

	assert_eq!(report.default_provider, DEFAULT);
	let outcome = report.outcome(ALTERNATIVE).unwrap();
	assert_eq!(outcome.status, HealthStatus::Healthy);
	assert_eq!(outcome.accuracy, Some(1.0));
	assert_eq!(outcome.completeness, Some(1.0));
	assert_eq!(outcome.database_match, Some(true));

	let status = store
		.provider_status("hc_agree", ALTERNATIVE, Operation::TxDetails)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(status.status, HealthStatus::Healthy);

	let labels = ProviderLabels {
		network: "hc_agree",
		operation: "tx_details",
		provider: ALTERNATIVE,
	};
	assert_eq!(labels.get(&HEALTH_CHECK_STATUS), 1.0);
}

#[tokio::test]
async fn test_value_mismatch_is_unhealthy() {
	let network = NetworkBuilder::new().name("hc_mismatch").build();
	let mut adapter = MockExplorerAdapter::new();
	answers(&mut adapter, DEFAULT, vec![TransferTxBuilder::new().value("10").build()]);
	answers(
		&mut adapter,
		ALTERNATIVE,
		vec![TransferTxBuilder::new().value("10.000001").build()],
	);

	let (store, checker) = setup(network, adapter, notifier(1)).await;
	let report = checker.run("hc_mismatch", Operation::TxDetails).await.unwrap();

	let outcome = report.outcome(ALTERNATIVE).unwrap();
	assert_eq!(outcome.status, HealthStatus::Unhealthy);
	assert_eq!(outcome.completeness, Some(0.0));
	assert_eq!(outcome.database_match, Some(false));
	assert!(outcome
		.details
		.iter()
		.any(|d| d == "database mismatch: value"));

	let status = store
		.provider_status("hc_mismatch", ALTERNATIVE, Operation::TxDetails)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(status.status, HealthStatus::Unhealthy);
	assert!(!status.details.is_empty());
}

#[tokio::test]
async fn test_failing_alternative_is_unhealthy_without_failing_the_run() {
	let network = NetworkBuilder::new().name("hc_timeout").build();
	let mut adapter = MockExplorerAdapter::new();
	answers(&mut adapter, DEFAULT, vec![TransferTxBuilder::new().build()]);
	adapter
		.expect_sample_get_tx_details()
		.withf(|name, _| name == ALTERNATIVE)
		.times(3)
		.returning(|name, _| Err(ExplorerError::request_failed(name, "operation timed out")));

	let (_store, checker) = setup(network, adapter, notifier(1)).await;
	let report = checker.run("hc_timeout", Operation::TxDetails).await.unwrap();

	let outcome = report.outcome(ALTERNATIVE).unwrap();
	assert_eq!(outcome.status, HealthStatus::Unhealthy);
	assert!(outcome.alt_provider_error);
	assert_eq!(outcome.attempts, 3);

	let labels = ProviderLabels {
		network: "hc_timeout",
		operation: "tx_details",
		provider: ALTERNATIVE,
	};
	assert_eq!(labels.get(&HEALTH_CHECK_PROVIDER_ERROR), 1.0);
	assert_eq!(labels.get(&HEALTH_CHECK_STATUS), 0.0);
}

#[tokio::test]
async fn test_failing_default_aborts_the_run() {
	let network = NetworkBuilder::new().name("hc_default_down").build();
	let mut adapter = MockExplorerAdapter::new();
	adapter
		.expect_sample_get_tx_details()
		.withf(|name, _| name == DEFAULT)
		.times(3)
		.returning(|name, _| Err(ExplorerError::request_failed(name, "connection refused")));
	adapter
		.expect_sample_get_tx_details()
		.withf(|name, _| name == ALTERNATIVE)
		.never();

	let (store, checker) = setup(network, adapter, notifier(1)).await;
	let result = checker.run("hc_default_down", Operation::TxDetails).await;

	assert!(matches!(
		result,
		Err(HealthCheckError::DefaultProviderFailed(_))
	));
	let status = store
		.provider_status("hc_default_down", DEFAULT, Operation::TxDetails)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(status.status, HealthStatus::Unhealthy);
}

#[tokio::test]
async fn test_unknown_network_is_rejected() {
	let network = NetworkBuilder::new().name("hc_known").build();
	let (_store, checker) = setup(
		network,
		MockExplorerAdapter::new(),
		run_failure_notifier("Network not found"),
	)
	.await;

	assert!(matches!(
		checker.run("hc_unknown", Operation::TxDetails).await,
		Err(HealthCheckError::NetworkNotFound(_))
	));
}

#[tokio::test]
async fn test_balance_is_not_health_checked() {
	let network = NetworkBuilder::new().name("hc_balance").build();
	let (_store, checker) = setup(
		network,
		MockExplorerAdapter::new(),
		run_failure_notifier("Unsupported operation"),
	)
	.await;

	assert!(matches!(
		checker.run("hc_balance", Operation::Balance).await,
		Err(HealthCheckError::UnsupportedOperation(_))
	));
}

#[tokio::test]
async fn test_block_txs_samples_the_stored_window() {
	let network = NetworkBuilder::new()
		.name("hc_blocks")
		.health_check("0 */10 * * * *", vec![Operation::BlockTxs])
		.block_txs_window(3)
		.build();
	let blocks = vec![
		TransferTxBuilder::new().tx_hash("a").block_height(Some(99)).build(),
		TransferTxBuilder::new().tx_hash("b").block_height(Some(100)).build(),
	];

	let mut adapter = MockExplorerAdapter::new();
	let default_blocks = blocks.clone();
	adapter
		.expect_sample_get_blocks()
		.withf(|name: &str, min: &u64, max: &u64| name == DEFAULT && *min == 98 && *max == 100)
		.returning(move |_, _, _| Ok(default_blocks.clone()));
	let alternative_blocks = blocks[..1].to_vec();
	adapter
		.expect_sample_get_blocks()
		.withf(|name: &str, min: &u64, max: &u64| name == ALTERNATIVE && *min == 98 && *max == 100)
		.returning(move |_, _, _| Ok(alternative_blocks.clone()));

	let (_store, checker) = setup(network, adapter, notifier(1)).await;
	let report = checker.run("hc_blocks", Operation::BlockTxs).await.unwrap();

	let outcome = report.outcome(ALTERNATIVE).unwrap();
	assert_eq!(outcome.status, HealthStatus::Unhealthy);
	assert_eq!(outcome.completeness, Some(0.5));
	assert_eq!(outcome.speed, Some(true));
	assert!(outcome.database_match.is_none());
}

#[tokio::test]
async fn test_empty_store_is_alerted() {
	let network = NetworkBuilder::new().name("hc_empty_store").build();
	let provider_list = providers(&network.name);
	let (_store, checker) = checker_with(
		network,
		provider_list,
		Arc::new(MockExplorerAdapter::new()),
		Arc::new(run_failure_notifier("no stored transfer for hc_empty_store")),
		vec![],
	)
	.await;

	assert!(matches!(
		checker.run("hc_empty_store", Operation::TxDetails).await,
		Err(HealthCheckError::TransactionNotFound(_))
	));
}

#[tokio::test]
async fn test_missing_default_adapter_is_alerted() {
	let network = NetworkBuilder::new().name("hc_no_adapter").build();
	let mut provider_list = providers(&network.name);
	provider_list[0] = ProviderBuilder::new()
		.name(DEFAULT)
		.network("hc_no_adapter")
		.operations(CHECKED.to_vec())
		.explorer_interface(Some("unregistered"))
		.priority(0)
		.default_for(CHECKED.to_vec())
		.build();
	let transfers = vec![stored(&network, TransferTxBuilder::new().build())];
	let (_store, checker) = checker_with(
		network,
		provider_list,
		Arc::new(MockExplorerAdapter::new()),
		Arc::new(run_failure_notifier("no explorer adapter for default provider")),
		transfers,
	)
	.await;

	assert!(matches!(
		checker.run("hc_no_adapter", Operation::TxDetails).await,
		Err(HealthCheckError::ProviderNotFound(_))
	));
}

#[tokio::test]
async fn test_slow_alerts_do_not_slow_down_pending_checks() {
	let network = NetworkBuilder::new()
		.name("hc_slow_alerts")
		.block_time_ms(100)
		.health_check("0 */10 * * * *", vec![Operation::BlockTxs])
		.block_txs_window(3)
		.build();
	let fast = "hc_fast";
	let slower = "hc_slower";
	let provider_list = vec![
		providers("hc_slow_alerts").remove(0),
		ProviderBuilder::new()
			.name(fast)
			.network("hc_slow_alerts")
			.priority(1)
			.build(),
		ProviderBuilder::new()
			.name(slower)
			.network("hc_slow_alerts")
			.priority(2)
			.build(),
	];

	let block = json!({"transfers": [transfer_json("abc", "10", 100)]});
	let scripted = |name: &str, delay: Duration| {
		let mut api = ScriptedProviderApi::new(name).delay(delay);
		for _ in 98..=100 {
			api = api.respond(block.clone());
		}
		Arc::new(api)
	};
	let mut config = ExplorerConfig::new(&network);
	for api in [
		scripted(DEFAULT, Duration::ZERO),
		scripted(fast, Duration::from_millis(5)),
		scripted(slower, Duration::from_millis(20)),
	] {
		config = config.with_api(&[Operation::BlockTxs], api);
	}

	let notifier = Arc::new(SlowNotifier::new(Duration::from_millis(800)));
	let transfers = vec![stored(&network, TransferTxBuilder::new().block_height(Some(100)).build())];
	let (_store, checker) = checker_with(
		network,
		provider_list,
		Arc::new(NetworkExplorer::new(config)),
		notifier.clone(),
		transfers,
	)
	.await;

	let report = checker.run("hc_slow_alerts", Operation::BlockTxs).await.unwrap();

	for provider in [fast, slower] {
		let outcome = report.outcome(provider).unwrap();
		assert_eq!(outcome.speed, Some(true), "{:?}", outcome);
		assert_eq!(outcome.status, HealthStatus::Healthy, "{:?}", outcome);
		assert!(outcome.response_time.unwrap() < Duration::from_millis(300));
	}
	assert_eq!(notifier.sent(), 2);
}

fn token_network(name: &str) -> Network {
	NetworkBuilder::new()
		.name(name)
		.health_check("0 */10 * * * *", vec![Operation::TokenTxs])
		.token("USDT", "0xdac1")
		.token("USDC", "0xa0b8")
		.build()
}

#[tokio::test]
async fn test_token_txs_samples_a_token_with_stored_transfers() {
	let network = token_network("hc_tokens");
	let usdt = |hash: &str| {
		TransferTxBuilder::new()
			.tx_hash(hash)
			.symbol("USDT")
			.token("0xdac1")
			.to_address("0xholder")
			.build()
	};

	let mut adapter = MockExplorerAdapter::new();
	let default_answer = vec![usdt("a"), usdt("b")];
	adapter
		.expect_sample_get_token_txs()
		.withf(|name: &str, address: &str, contract: &str| {
			name == DEFAULT && address == "0xholder" && contract == "0xdac1"
		})
		.returning(move |_, _, _| Ok(default_answer.clone()));
	let alternative_answer = vec![usdt("a")];
	adapter
		.expect_sample_get_token_txs()
		.withf(|name: &str, address: &str, contract: &str| {
			name == ALTERNATIVE && address == "0xholder" && contract == "0xdac1"
		})
		.returning(move |_, _, _| Ok(alternative_answer.clone()));

	let mut notifier = MockNotifier::new();
	notifier
		.expect_notify()
		.withf(|message: &str| message.contains("sampled token USDT (0xdac1) at 0xholder"))
		.times(1)
		.returning(|_| Ok(()));

	// Only USDT has a stored transfer, whichever token is tried first
	let transfers = vec![
		stored(&network, usdt("a")),
		stored(&network, TransferTxBuilder::new().tx_hash("native").build()),
	];
	let provider_list = providers(&network.name);
	let (store, checker) = checker_with(
		network,
		provider_list,
		Arc::new(adapter),
		Arc::new(notifier),
		transfers,
	)
	.await;

	let report = checker.run("hc_tokens", Operation::TokenTxs).await.unwrap();

	let outcome = report.outcome(ALTERNATIVE).unwrap();
	assert_eq!(outcome.status, HealthStatus::Unhealthy);
	assert_eq!(outcome.completeness, Some(0.5));

	let alternative = TokenLabels {
		network: "hc_tokens",
		token: "USDT",
		provider: ALTERNATIVE,
	};
	assert_eq!(alternative.get(&TOKEN_TXS_COMPLETENESS), 0.5);
	assert_eq!(alternative.get(&TOKEN_TXS_LAST_STATUS), 200.0);
	let default = TokenLabels {
		provider: DEFAULT,
		..alternative
	};
	assert_eq!(default.get(&TOKEN_TXS_LAST_STATUS), 200.0);

	let status = store
		.provider_status("hc_tokens", ALTERNATIVE, Operation::TokenTxs)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(status.status, HealthStatus::Unhealthy);
}

#[tokio::test]
async fn test_token_txs_without_stored_token_transfers_is_alerted() {
	let network = token_network("hc_tokens_unseen");
	let transfers = vec![stored(&network, TransferTxBuilder::new().build())];
	let provider_list = providers(&network.name);
	let (_store, checker) = checker_with(
		network,
		provider_list,
		Arc::new(MockExplorerAdapter::new()),
		Arc::new(run_failure_notifier("no stored transfer of any configured token")),
		transfers,
	)
	.await;

	assert!(matches!(
		checker.run("hc_tokens_unseen", Operation::TokenTxs).await,
		Err(HealthCheckError::TransactionNotFound(_))
	));
}

#[tokio::test]
async fn test_token_transfer_details_compare_token_transfers_only() {
	let network = NetworkBuilder::new().name("hc_token_details").build();
	let token_transfer = TransferTxBuilder::new().symbol("USDT").token("0xdac1").build();

	let mut adapter = MockExplorerAdapter::new();
	let answer = vec![token_transfer.clone()];
	adapter
		.expect_sample_get_token_tx_details()
		.times(2)
		.returning(move |_, _| Ok(answer.clone()));
	adapter.expect_sample_get_tx_details().never();

	let transfers = vec![stored(&network, token_transfer)];
	let provider_list = providers(&network.name);
	let (_store, checker) = checker_with(
		network,
		provider_list,
		Arc::new(adapter),
		Arc::new(notifier(1)),
		transfers,
	)
	.await;

	let report = checker.run("hc_token_details", Operation::TxDetails).await.unwrap();
	let outcome = report.outcome(ALTERNATIVE).unwrap();
	assert_eq!(outcome.status, HealthStatus::Healthy);
	assert_eq!(outcome.database_match, Some(true));
}
