use chrono::Utc;
use std::{fs, path::Path, sync::Arc};
use tempfile::TempDir;

use explorer_monitor::{
	bootstrap::{initialize_services, load_config, open_store, ConfigPaths},
	models::{HealthStatus, Operation},
	services::{
		health::HealthCheckConfig,
		notification::{LogNotifier, TelegramNotifier},
		store::ExplorerStore,
	},
	utils::tests::{create_test_http_client, TransferTxBuilder},
};

use crate::integration::mocks::transfer_json;

fn write_network(dir: &Path, name: &str) {
	let network = serde_json::json!({
		"name": name,
		"network_type": "account_based",
		"block_time_ms": 13000,
		"retention_cron_schedule": "0 */5 * * * *",
		"health_check": {
			"cron_schedule": "0 */10 * * * *",
			"operations": ["tx_details"]
		}
	});
	fs::write(dir.join(format!("{}.json", name)), network.to_string()).unwrap();
}

fn write_provider(dir: &Path, name: &str, network: &str, base_url: &str, default: bool) {
	let priority = if default { 0 } else { 1 };
	let default_for: Vec<&str> = if default { vec!["tx_details"] } else { vec![] };
	let provider = serde_json::json!({
		"name": name,
		"network": network,
		"explorer_interface": network,
		"base_url": base_url,
		"priority": priority,
		"default_for": default_for,
		"supported_operations": ["tx_details"],
		"endpoints": {"tx_details": "/tx/{tx_hash}"}
	});
	fs::write(dir.join(format!("{}.json", name)), provider.to_string()).unwrap();
}

struct Fixture {
	_dir: TempDir,
	paths: ConfigPaths,
}

fn fixture(network: &str, default_url: &str, alternative_url: &str) -> Fixture {
	let dir = TempDir::new().unwrap();
	let networks = dir.path().join("networks");
	let providers = dir.path().join("providers");
	fs::create_dir_all(&networks).unwrap();
	fs::create_dir_all(&providers).unwrap();

	write_network(&networks, network);
	write_provider(&providers, &format!("{}_default", network), network, default_url, true);
	write_provider(
		&providers,
		&format!("{}_alternative", network),
		network,
		alternative_url,
		false,
	);

	Fixture {
		paths: ConfigPaths {
			networks: Some(networks),
			providers: Some(providers),
			retention: Some(dir.path().join("retention.json")),
		},
		_dir: dir,
	}
}

async fn serve_transfer(server: &mut mockito::ServerGuard, value: &str) -> mockito::Mock {
	let body = serde_json::json!({"transfers": [transfer_json("abc", value, 100)]});
	server
		.mock("GET", "/tx/abc")
		.with_status(200)
		.with_body(body.to_string())
		.create_async()
		.await
}

#[tokio::test]
async fn test_health_check_from_configuration_files() {
	let mut default_server = mockito::Server::new_async().await;
	let mut alternative_server = mockito::Server::new_async().await;
	let default_mock = serve_transfer(&mut default_server, "10").await;
	let alternative_mock = serve_transfer(&mut alternative_server, "10").await;

	let fixture = fixture("bootetc", &default_server.url(), &alternative_server.url());
	let config = load_config(&fixture.paths).unwrap();
	let store = open_store(Some(&fixture._dir.path().join("store.json")))
		.await
		.unwrap();
	store
		.insert_transfers(vec![TransferTxBuilder::new()
			.from_address("0xfrom")
			.to_address("0xto")
			.stored("bootetc", Operation::BlockTxs, Utc::now())])
		.await
		.unwrap();

	let services = initialize_services(
		config.networks,
		config.providers,
		config.retention,
		store.clone(),
		create_test_http_client(),
		Arc::new(LogNotifier),
		HealthCheckConfig::default().without_delays(),
	)
	.await
	.unwrap();

	assert_eq!(services.adapters.len(), 1);
	let assignment = store
		.default_provider("bootetc", Operation::TxDetails)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(assignment.provider, "bootetc_default");

	let report = services
		.checker
		.run("bootetc", Operation::TxDetails)
		.await
		.unwrap();
	let outcome = report.outcome("bootetc_alternative").unwrap();
	assert_eq!(outcome.status, HealthStatus::Healthy);
	assert_eq!(outcome.database_match, Some(true));

	default_mock.assert_async().await;
	alternative_mock.assert_async().await;
}

#[tokio::test]
async fn test_alert_delivery_failure_does_not_fail_the_run() {
	let mut default_server = mockito::Server::new_async().await;
	let mut alternative_server = mockito::Server::new_async().await;
	let mut telegram = mockito::Server::new_async().await;
	serve_transfer(&mut default_server, "10").await;
	serve_transfer(&mut alternative_server, "10.000001").await;
	let telegram_mock = telegram
		.mock("GET", mockito::Matcher::Regex(r"^/bottoken/sendMessage".to_string()))
		.match_query(mockito::Matcher::UrlEncoded(
			"chat_id".to_string(),
			"-100".to_string(),
		))
		.with_status(500)
		.expect(1)
		.create_async()
		.await;

	let fixture = fixture("bootalert", &default_server.url(), &alternative_server.url());
	let config = load_config(&fixture.paths).unwrap();
	let store = open_store(Some(&fixture._dir.path().join("store.json")))
		.await
		.unwrap();
	store
		.insert_transfers(vec![TransferTxBuilder::new().stored(
			"bootalert",
			Operation::BlockTxs,
			Utc::now(),
		)])
		.await
		.unwrap();

	let client = create_test_http_client();
	let notifier = TelegramNotifier::new(
		Some(telegram.url()),
		"token".to_string(),
		"-100".to_string(),
		client.clone(),
	)
	.unwrap();

	let services = initialize_services(
		config.networks,
		config.providers,
		config.retention,
		store.clone(),
		client,
		Arc::new(notifier),
		HealthCheckConfig::default().without_delays(),
	)
	.await
	.unwrap();

	let report = services
		.checker
		.run("bootalert", Operation::TxDetails)
		.await
		.unwrap();
	assert_eq!(
		report.outcome("bootalert_alternative").unwrap().status,
		HealthStatus::Unhealthy
	);

	let status = store
		.provider_status("bootalert", "bootalert_alternative", Operation::TxDetails)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(status.status, HealthStatus::Unhealthy);
	telegram_mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_for_unknown_network_fails_loading() {
	let fixture = fixture("bootvalid", "https://a.example", "https://b.example");
	let providers = fixture.paths.providers.clone().unwrap();
	write_provider(&providers, "orphan", "nowhere", "https://c.example", false);

	assert!(load_config(&fixture.paths).is_err());
}

#[tokio::test]
async fn test_store_snapshot_survives_reopen() {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("store.json");

	let store = open_store(Some(&path)).await.unwrap();
	store
		.insert_transfers(vec![TransferTxBuilder::new().stored(
			"bootsnap",
			Operation::BlockTxs,
			Utc::now(),
		)])
		.await
		.unwrap();
	drop(store);

	let reopened = open_store(Some(&path)).await.unwrap();
	assert_eq!(reopened.transfers("bootsnap").await.unwrap().len(), 1);
}
