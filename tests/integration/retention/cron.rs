use chrono::{Duration, Utc};
use std::sync::Arc;

use explorer_monitor::{
	models::{Operation, RetentionConfig},
	services::{
		retention::{DeleteBlockTxsCron, RetentionError, RetentionOutcome, RetentionPolicy},
		store::{ExplorerStore, MemoryStore},
	},
	utils::tests::TransferTxBuilder,
};

use crate::integration::mocks::FailingWatermarkStore;

async fn seed(store: &dyn ExplorerStore, network: &str) {
	let now = Utc::now();
	store
		.insert_transfers(vec![
			TransferTxBuilder::new()
				.tx_hash("expired")
				.block_height(Some(100))
				.stored(network, Operation::BlockTxs, now - Duration::days(3)),
			TransferTxBuilder::new()
				.tx_hash("recent")
				.block_height(Some(200))
				.stored(network, Operation::BlockTxs, now - Duration::hours(1)),
		])
		.await
		.unwrap();
}

fn cron(store: Arc<dyn ExplorerStore>) -> DeleteBlockTxsCron {
	DeleteBlockTxsCron::new(store, RetentionPolicy::new(RetentionConfig::default()))
}

#[tokio::test]
async fn test_expired_blocks_are_deleted_and_watermark_advances() {
	let store = Arc::new(MemoryStore::new());
	seed(store.as_ref(), "rt_end_to_end").await;
	let cron = cron(store.clone());

	let outcome = cron.run("rt_end_to_end", Utc::now()).await.unwrap();
	assert_eq!(
		outcome,
		RetentionOutcome::Deleted {
			deleted: 1,
			min_available_block: 101,
		}
	);

	let remaining = store.transfers("rt_end_to_end").await.unwrap();
	assert_eq!(remaining.len(), 1);
	assert_eq!(remaining[0].tx_hash, "recent");

	let again = cron.run("rt_end_to_end", Utc::now()).await.unwrap();
	assert_eq!(again, RetentionOutcome::Noop);
	let stats = store.block_stats("rt_end_to_end").await.unwrap().unwrap();
	assert_eq!(stats.min_available_block, 101);
}

#[tokio::test]
async fn test_failed_watermark_update_rolls_back_the_delete() {
	let store = Arc::new(FailingWatermarkStore::default());
	seed(store.as_ref(), "rt_atomic").await;
	let cron = cron(store.clone());

	let result = cron.run("rt_atomic", Utc::now()).await;
	assert!(matches!(result, Err(RetentionError::StoreError(_))));

	assert_eq!(store.transfers("rt_atomic").await.unwrap().len(), 2);
	assert!(store.block_stats("rt_atomic").await.unwrap().is_none());
}

#[tokio::test]
async fn test_other_networks_and_pipelines_are_untouched() {
	let store = Arc::new(MemoryStore::new());
	seed(store.as_ref(), "rt_target").await;
	seed(store.as_ref(), "rt_bystander").await;
	store
		.insert_transfers(vec![TransferTxBuilder::new()
			.tx_hash("wallet")
			.block_height(Some(50))
			.stored("rt_target", Operation::AddressTxs, Utc::now() - Duration::days(30))])
		.await
		.unwrap();

	cron(store.clone())
		.run("rt_target", Utc::now())
		.await
		.unwrap();

	assert_eq!(store.transfers("rt_bystander").await.unwrap().len(), 2);
	let target: Vec<String> = store
		.transfers("rt_target")
		.await
		.unwrap()
		.into_iter()
		.map(|t| t.tx_hash)
		.collect();
	assert!(target.contains(&"wallet".to_string()));
	assert!(!target.contains(&"expired".to_string()));
}

#[tokio::test]
async fn test_high_transaction_network_uses_shorter_window() {
	let store = Arc::new(MemoryStore::new());
	let now = Utc::now();
	store
		.insert_transfers(vec![TransferTxBuilder::new()
			.block_height(Some(7))
			.stored("rt_busy", Operation::BlockTxs, now - Duration::hours(13))])
		.await
		.unwrap();

	let config = RetentionConfig {
		high_transaction_networks: vec!["rt_busy".to_string()],
		..RetentionConfig::default()
	};
	let cron = DeleteBlockTxsCron::new(store.clone(), RetentionPolicy::new(config));

	let outcome = cron.run("rt_busy", now).await.unwrap();
	assert_eq!(
		outcome,
		RetentionOutcome::Deleted {
			deleted: 1,
			min_available_block: 8,
		}
	);
}
