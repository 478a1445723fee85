use std::{collections::HashMap, sync::Arc};

use explorer_monitor::{
	models::Operation,
	services::explorer::{AdapterRegistry, ExplorerAdapter},
	utils::tests::{create_test_http_client, NetworkBuilder, ProviderBuilder},
};

use crate::integration::mocks::transfer_json;

#[tokio::test]
async fn test_registry_adapter_falls_back_across_http_providers() {
	let mut primary = mockito::Server::new_async().await;
	let mut secondary = mockito::Server::new_async().await;

	let primary_mock = primary
		.mock("GET", "/tx/abc")
		.with_status(503)
		.create_async()
		.await;
	let body = serde_json::json!({"transfers": [transfer_json("abc", "3", 42)]});
	let secondary_mock = secondary
		.mock("GET", "/tx/abc")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(body.to_string())
		.create_async()
		.await;

	let networks = HashMap::from([("etc".to_string(), NetworkBuilder::new().build())]);
	let providers = HashMap::from([
		(
			"etc_primary".to_string(),
			ProviderBuilder::new()
				.name("etc_primary")
				.http(&primary.url())
				.priority(0)
				.build(),
		),
		(
			"etc_secondary".to_string(),
			ProviderBuilder::new()
				.name("etc_secondary")
				.http(&secondary.url())
				.priority(1)
				.build(),
		),
	]);

	let registry =
		AdapterRegistry::from_config(&networks, &providers, create_test_http_client()).unwrap();
	let adapter: Arc<dyn ExplorerAdapter> = registry.get("etc").unwrap();

	let transfers = adapter.get_tx_details("abc").await.unwrap();
	assert_eq!(transfers.len(), 1);
	assert_eq!(transfers[0].block_height, Some(42));

	primary_mock.assert_async().await;
	secondary_mock.assert_async().await;
}

#[tokio::test]
async fn test_confirmations_use_the_provider_block_head() {
	let mut server = mockito::Server::new_async().await;
	let head_mock = server
		.mock("GET", "/head")
		.with_status(200)
		.with_body(r#"{"block_head": 52}"#)
		.create_async()
		.await;
	let body = serde_json::json!({"transfers": [transfer_json("abc", "3", 42)]});
	let tx_mock = server
		.mock("GET", "/tx/abc")
		.with_status(200)
		.with_body(body.to_string())
		.create_async()
		.await;

	let networks = HashMap::from([("etc".to_string(), NetworkBuilder::new().build())]);
	let providers = HashMap::from([(
		"etc_blockbook".to_string(),
		ProviderBuilder::new()
			.http(&server.url())
			.operations(vec![Operation::TxDetails, Operation::BlockHead])
			.need_block_head_for_confirmation(true)
			.build(),
	)]);

	let registry =
		AdapterRegistry::from_config(&networks, &providers, create_test_http_client()).unwrap();
	let adapter = registry.get("etc").unwrap();

	let transfers = adapter
		.sample_get_tx_details("etc_blockbook", "abc")
		.await
		.unwrap();
	assert_eq!(transfers.len(), 1);
	assert_eq!(transfers[0].confirmations, Some(11));

	head_mock.assert_async().await;
	tx_mock.assert_async().await;
}
