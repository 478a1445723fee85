use chrono::{Duration, Utc};
use std::{sync::Arc, time::Duration as StdDuration};
use tokio::sync::watch;

use explorer_monitor::{
	models::{Operation, RetentionConfig},
	services::{
		retention::{DeleteBlockTxsCron, RetentionPolicy, RetentionRunner},
		store::{ExplorerStore, MemoryStore},
	},
	utils::tests::TransferTxBuilder,
};

#[tokio::test]
async fn test_runner_cleans_every_network_until_shutdown() {
	let store = Arc::new(MemoryStore::new());
	for network in ["rr_first", "rr_second"] {
		store
			.insert_transfers(vec![TransferTxBuilder::new()
				.block_height(Some(10))
				.stored(network, Operation::BlockTxs, Utc::now() - Duration::days(10))])
			.await
			.unwrap();
	}

	let cron = Arc::new(DeleteBlockTxsCron::new(
		store.clone(),
		RetentionPolicy::new(RetentionConfig::default()),
	));
	let runner = RetentionRunner::new(cron, vec!["rr_first".into(), "rr_second".into()])
		.with_pauses(StdDuration::from_millis(1), StdDuration::from_millis(1));

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let handle = tokio::spawn(async move { runner.run(shutdown_rx).await });

	tokio::time::sleep(StdDuration::from_millis(100)).await;
	shutdown_tx.send(true).unwrap();
	tokio::time::timeout(StdDuration::from_secs(5), handle)
		.await
		.expect("runner did not stop")
		.unwrap();

	for network in ["rr_first", "rr_second"] {
		assert!(store.transfers(network).await.unwrap().is_empty());
		let stats = store.block_stats(network).await.unwrap().unwrap();
		assert_eq!(stats.min_available_block, 11);
	}
}
