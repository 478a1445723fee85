use async_trait::async_trait;
use serde_json::Value;

use crate::services::explorer::{ExplorerError, ResponseParser};

/// Client of one third-party provider.
///
/// Calls return the raw response; the explorer validates and parses it with
/// the provider's [`ResponseParser`].
#[async_trait]
pub trait ProviderApi: Send + Sync {
	fn name(&self) -> &str;

	fn parser(&self) -> &dyn ResponseParser;

	/// Whether transfer confirmations must be derived from the block head
	fn need_block_head_for_confirmation(&self) -> bool {
		false
	}

	async fn get_tx_details(&self, tx_hash: &str) -> Result<Value, ExplorerError>;

	async fn get_block_txs(&self, height: u64) -> Result<Value, ExplorerError>;

	async fn get_block_head(&self) -> Result<Value, ExplorerError>;

	async fn get_address_txs(&self, address: &str) -> Result<Value, ExplorerError>;

	/// Transfers of the token at `contract` involving `address`. Parsed like
	/// an address-txs response.
	async fn get_token_txs(&self, address: &str, contract: &str) -> Result<Value, ExplorerError>;

	async fn get_balance(&self, address: &str) -> Result<Value, ExplorerError>;
}
