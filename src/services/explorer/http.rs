//! HTTP provider client driven by endpoint templates from configuration.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::{
	models::{Operation, Provider},
	services::explorer::{ExplorerError, ProviderApi, ResponseParser},
};

/// [`ProviderApi`] over a retrying HTTP client.
///
/// Endpoint paths may contain `{tx_hash}`, `{height}`, `{address}` and
/// `{contract}`, which are URL-encoded and substituted per call.
pub struct HttpProviderApi {
	provider: Provider,
	base_url: Url,
	client: Arc<ClientWithMiddleware>,
	parser: Arc<dyn ResponseParser>,
}

impl HttpProviderApi {
	pub fn new(
		provider: Provider,
		client: Arc<ClientWithMiddleware>,
		parser: Arc<dyn ResponseParser>,
	) -> Result<Self, ExplorerError> {
		let raw_url = provider.base_url.as_deref().ok_or_else(|| {
			ExplorerError::request_failed(&provider.name, "provider has no base_url")
		})?;
		let base_url = Url::parse(raw_url).map_err(|e| {
			ExplorerError::request_failed(&provider.name, format!("invalid base_url: {}", e))
		})?;

		Ok(Self {
			provider,
			base_url,
			client,
			parser,
		})
	}

	fn endpoint_url(
		&self,
		operation: Operation,
		substitutions: &[(&str, &str)],
	) -> Result<Url, ExplorerError> {
		let template = self.provider.endpoints.for_operation(operation).ok_or_else(|| {
			ExplorerError::MissingEndpoint {
				provider: self.provider.name.clone(),
				operation,
			}
		})?;

		let mut path = template.to_string();
		for (placeholder, value) in substitutions {
			path = path.replace(&format!("{{{}}}", placeholder), &urlencoding::encode(value));
		}

		let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
		Url::parse(&url).map_err(|e| {
			ExplorerError::request_failed(&self.provider.name, format!("invalid url {}: {}", url, e))
		})
	}

	async fn fetch(&self, operation: Operation, url: Url) -> Result<Value, ExplorerError> {
		let name = &self.provider.name;
		let mut request = self.client.get(url.clone());
		for (key, value) in &self.provider.headers {
			request = request.header(key.as_str(), value.as_str());
		}

		tracing::debug!(provider = %name, %operation, %url, "calling provider");
		let response = request
			.send()
			.await
			.map_err(|e| ExplorerError::request_failed(name, e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(ExplorerError::request_failed(
				name,
				format!("{} answered with status {}", url, status),
			));
		}

		response
			.json::<Value>()
			.await
			.map_err(|e| ExplorerError::request_failed(name, format!("invalid JSON body: {}", e)))
	}
}

#[async_trait]
impl ProviderApi for HttpProviderApi {
	fn name(&self) -> &str {
		&self.provider.name
	}

	fn parser(&self) -> &dyn ResponseParser {
		self.parser.as_ref()
	}

	fn need_block_head_for_confirmation(&self) -> bool {
		self.provider.need_block_head_for_confirmation
	}

	async fn get_tx_details(&self, tx_hash: &str) -> Result<Value, ExplorerError> {
		let url = self.endpoint_url(Operation::TxDetails, &[("tx_hash", tx_hash)])?;
		self.fetch(Operation::TxDetails, url).await
	}

	async fn get_block_txs(&self, height: u64) -> Result<Value, ExplorerError> {
		let height = height.to_string();
		let url = self.endpoint_url(Operation::BlockTxs, &[("height", &height)])?;
		self.fetch(Operation::BlockTxs, url).await
	}

	async fn get_block_head(&self) -> Result<Value, ExplorerError> {
		let url = self.endpoint_url(Operation::BlockHead, &[])?;
		self.fetch(Operation::BlockHead, url).await
	}

	async fn get_address_txs(&self, address: &str) -> Result<Value, ExplorerError> {
		let url = self.endpoint_url(Operation::AddressTxs, &[("address", address)])?;
		self.fetch(Operation::AddressTxs, url).await
	}

	async fn get_token_txs(&self, address: &str, contract: &str) -> Result<Value, ExplorerError> {
		let url = self.endpoint_url(
			Operation::TokenTxs,
			&[("address", address), ("contract", contract)],
		)?;
		self.fetch(Operation::TokenTxs, url).await
	}

	async fn get_balance(&self, address: &str) -> Result<Value, ExplorerError> {
		let url = self.endpoint_url(Operation::Balance, &[("address", address)])?;
		self.fetch(Operation::Balance, url).await
	}
}
