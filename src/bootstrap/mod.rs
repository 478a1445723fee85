//! Bootstrap module for wiring configuration, storage and services together.
//!
//! # Services
//! - `AdapterRegistry`: explorer adapters keyed by `explorer_interface`
//! - `ProviderHealthChecker`: compares alternative providers with the default one
//! - `DeleteBlockTxsCron`: expires stored block transfers
//!
//! Loading is split from wiring so tests can inject in-memory catalogues, a
//! store and a notifier through [`initialize_services`].

use reqwest_middleware::ClientWithMiddleware;
use std::{
	error::Error,
	path::{Path, PathBuf},
	sync::Arc,
	time::Duration,
};

use crate::{
	models::{Operation, RetentionConfig},
	repositories::{
		NetworkRepository, NetworkRepositoryTrait, NetworkService, ProviderRepository,
		ProviderRepositoryTrait, ProviderService,
	},
	services::{
		explorer::AdapterRegistry,
		health::{HealthCheckConfig, ProviderHealthChecker},
		notification::Notifier,
		retention::{DeleteBlockTxsCron, RetentionPolicy},
		store::{ExplorerStore, MemoryStore},
	},
	utils::{
		constants::{DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_STORE_PATH},
		http::{create_provider_http_client, HttpRetryConfig},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Configuration locations. `None` selects the default under `config/`.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
	pub networks: Option<PathBuf>,
	pub providers: Option<PathBuf>,
	pub retention: Option<PathBuf>,
}

/// Catalogues and policies read from configuration
pub struct LoadedConfig {
	pub networks: NetworkService<NetworkRepository>,
	pub providers: ProviderService<ProviderRepository>,
	pub retention: RetentionConfig,
}

/// Everything the binary runs
pub struct Services<N: NetworkRepositoryTrait, P: ProviderRepositoryTrait> {
	pub networks: Arc<NetworkService<N>>,
	pub providers: Arc<ProviderService<P>>,
	pub store: Arc<dyn ExplorerStore>,
	pub adapters: Arc<AdapterRegistry>,
	pub checker: Arc<ProviderHealthChecker<N, P>>,
	pub retention: Arc<DeleteBlockTxsCron>,
}

/// Loads networks, providers (validated against the networks) and the
/// retention classes.
pub fn load_config(paths: &ConfigPaths) -> Result<LoadedConfig> {
	let networks = NetworkService::<NetworkRepository>::new(paths.networks.as_deref())?;
	let providers = ProviderService::<ProviderRepository>::new(
		paths.providers.as_deref(),
		&networks.get_all(),
	)?;
	let retention = RetentionConfig::load(paths.retention.as_deref())?;

	tracing::info!(
		networks = networks.get_all().len(),
		providers = providers.get_all().len(),
		"configuration loaded"
	);

	Ok(LoadedConfig {
		networks,
		providers,
		retention,
	})
}

/// Store path from `STORE_PATH`, then `path`, then the default location
pub fn resolve_store_path(path: Option<&Path>) -> PathBuf {
	std::env::var("STORE_PATH")
		.ok()
		.filter(|p| !p.is_empty())
		.map(PathBuf::from)
		.or_else(|| path.map(Path::to_path_buf))
		.unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH))
}

pub async fn open_store(path: Option<&Path>) -> Result<Arc<dyn ExplorerStore>> {
	let path = resolve_store_path(path);
	let store = MemoryStore::open(&path).await?;
	tracing::info!(path = %path.display(), "store opened");
	Ok(Arc::new(store))
}

/// Client shared by every HTTP provider
pub fn create_http_client() -> Result<Arc<ClientWithMiddleware>> {
	let client = create_provider_http_client(
		&HttpRetryConfig::default(),
		Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
	)?;
	Ok(Arc::new(client))
}

/// Wires the services and seeds the configured default providers into the
/// store. Existing assignments are kept.
pub async fn initialize_services<N, P>(
	network_service: NetworkService<N>,
	provider_service: ProviderService<P>,
	retention_config: RetentionConfig,
	store: Arc<dyn ExplorerStore>,
	client: Arc<ClientWithMiddleware>,
	notifier: Arc<dyn Notifier>,
	health_config: HealthCheckConfig,
) -> Result<Services<N, P>>
where
	N: NetworkRepositoryTrait,
	P: ProviderRepositoryTrait,
{
	let networks = Arc::new(network_service);
	let providers = Arc::new(provider_service);

	let adapters = Arc::new(AdapterRegistry::from_config(
		&networks.get_all(),
		&providers.get_all(),
		client,
	)?);

	let checker = Arc::new(ProviderHealthChecker::new(
		networks.clone(),
		providers.clone(),
		adapters.clone(),
		store.clone(),
		notifier,
		health_config,
	));
	let seeded = checker.selector().seed_defaults().await?;

	let retention = Arc::new(DeleteBlockTxsCron::new(
		store.clone(),
		RetentionPolicy::new(retention_config),
	));

	tracing::info!(
		adapters = adapters.len(),
		seeded_defaults = seeded,
		"services initialized"
	);

	Ok(Services {
		networks,
		providers,
		store,
		adapters,
		checker,
		retention,
	})
}

/// Parses a `<network>:<operation>` health check target
pub fn parse_check_target(target: &str) -> Result<(String, Operation)> {
	let (network, operation) = target
		.split_once(':')
		.ok_or_else(|| format!("Expected <network>:<operation>, got '{}'", target))?;

	if network.is_empty() {
		return Err(format!("Missing network in '{}'", target).into());
	}

	let operation: Operation = operation.parse()?;
	Ok((network.to_string(), operation))
}
