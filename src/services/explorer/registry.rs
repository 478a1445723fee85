//! Lookup of explorer adapters by `explorer_interface`.

use reqwest_middleware::ClientWithMiddleware;
use std::{collections::HashMap, sync::Arc};

use crate::{
	models::{Network, Provider},
	services::explorer::{
		ExplorerAdapter, ExplorerConfig, ExplorerError, HttpProviderApi, NetworkExplorer,
		NormalizedJsonParser, ResponseParser,
	},
};

/// Static map from adapter key to adapter, built once at startup
#[derive(Clone, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<String, Arc<dyn ExplorerAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, explorer_interface: &str, adapter: Arc<dyn ExplorerAdapter>) {
		self.adapters.insert(explorer_interface.to_string(), adapter);
	}

	pub fn get(&self, explorer_interface: &str) -> Option<Arc<dyn ExplorerAdapter>> {
		self.adapters.get(explorer_interface).cloned()
	}

	/// Adapter serving `provider`, `None` for legacy providers
	pub fn for_provider(&self, provider: &Provider) -> Option<Arc<dyn ExplorerAdapter>> {
		provider
			.explorer_interface
			.as_deref()
			.and_then(|key| self.get(key))
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}

	/// Builds one [`NetworkExplorer`] per `explorer_interface` from HTTP
	/// providers. Providers are added in priority order, so fallback follows
	/// it. Providers without `base_url` are skipped.
	pub fn from_config(
		networks: &HashMap<String, Network>,
		providers: &HashMap<String, Provider>,
		client: Arc<ClientWithMiddleware>,
	) -> Result<Self, ExplorerError> {
		let parser: Arc<dyn ResponseParser> = Arc::new(NormalizedJsonParser::new());

		let mut ordered: Vec<&Provider> = providers
			.values()
			.filter(|p| p.explorer_interface.is_some())
			.collect();
		ordered.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));

		let mut configs: HashMap<String, ExplorerConfig> = HashMap::new();
		for provider in ordered {
			let Some(key) = provider.explorer_interface.as_deref() else {
				continue;
			};
			if provider.base_url.is_none() {
				tracing::warn!(
					provider = %provider.name,
					network = %provider.network,
					"provider has no base_url, not served by an HTTP explorer"
				);
				continue;
			}
			let Some(network) = networks.get(&provider.network) else {
				tracing::warn!(
					provider = %provider.name,
					network = %provider.network,
					"provider references an unknown network"
				);
				continue;
			};

			let api = Arc::new(HttpProviderApi::new(
				provider.clone(),
				client.clone(),
				parser.clone(),
			)?);
			let config = configs
				.remove(key)
				.unwrap_or_else(|| ExplorerConfig::new(network));
			configs.insert(
				key.to_string(),
				config.with_api(&provider.supported_operations, api),
			);
		}

		let mut registry = Self::new();
		for (key, config) in configs {
			tracing::debug!(explorer_interface = %key, network = %config.network, "registered explorer");
			registry.register(&key, Arc::new(NetworkExplorer::new(config)));
		}
		Ok(registry)
	}
}
