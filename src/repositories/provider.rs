//! Provider configuration repository.
//!
//! Loads the provider catalogue and answers which providers support an
//! operation on a network. Every provider must reference a configured network,
//! and at most one provider may be the initial default of a
//! (network, operation) pair.

use std::{
	collections::{BTreeMap, HashMap},
	path::Path,
};

use crate::{
	models::{ConfigLoader, DefaultProviderAssignment, Network, Operation, Provider},
	repositories::error::RepositoryError,
};

/// Repository for storing and retrieving provider configurations
#[derive(Clone)]
pub struct ProviderRepository {
	/// Providers keyed by name
	pub providers: HashMap<String, Provider>,
}

impl ProviderRepository {
	pub fn new(
		path: Option<&Path>,
		networks: &HashMap<String, Network>,
	) -> Result<Self, RepositoryError> {
		let providers = <Self as ProviderRepositoryTrait>::load_all(path, networks)?;
		Ok(ProviderRepository { providers })
	}

	pub fn new_with_providers(providers: Vec<Provider>) -> Self {
		ProviderRepository {
			providers: providers.into_iter().map(|p| (p.name.clone(), p)).collect(),
		}
	}

	/// Returns an error if any provider references a missing network or two
	/// providers claim the same default slot.
	pub fn validate_provider_references(
		providers: &HashMap<String, Provider>,
		networks: &HashMap<String, Network>,
	) -> Result<(), RepositoryError> {
		let mut validation_errors = Vec::new();
		let mut defaults: BTreeMap<(String, Operation), Vec<&str>> = BTreeMap::new();

		for provider in providers.values() {
			if !networks.contains_key(&provider.network) {
				validation_errors.push(format!(
					"Provider '{}' references non-existent network '{}'",
					provider.name, provider.network
				));
			}

			for operation in &provider.default_for {
				defaults
					.entry((provider.network.clone(), *operation))
					.or_default()
					.push(&provider.name);
			}
		}

		for ((network, operation), mut names) in defaults {
			if names.len() > 1 {
				names.sort();
				validation_errors.push(format!(
					"Providers {} are all default for {} on network '{}'",
					names.join(", "),
					operation,
					network
				));
			}
		}

		if !validation_errors.is_empty() {
			validation_errors.sort();
			return Err(RepositoryError::validation_error(format!(
				"Configuration validation failed:\n{}",
				validation_errors.join("\n")
			)));
		}

		Ok(())
	}
}

/// Interface for provider repository implementations
pub trait ProviderRepositoryTrait: Clone + Send + Sync {
	/// Load all provider configurations and validate their references
	fn load_all(
		path: Option<&Path>,
		networks: &HashMap<String, Network>,
	) -> Result<HashMap<String, Provider>, RepositoryError>;

	fn get(&self, name: &str) -> Option<Provider>;

	fn get_all(&self) -> HashMap<String, Provider>;
}

impl ProviderRepositoryTrait for ProviderRepository {
	fn load_all(
		path: Option<&Path>,
		networks: &HashMap<String, Network>,
	) -> Result<HashMap<String, Provider>, RepositoryError> {
		let by_file: HashMap<String, Provider> = Provider::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load providers: {}", e)))?;

		let mut providers = HashMap::new();
		for provider in by_file.into_values() {
			if providers.contains_key(&provider.name) {
				return Err(RepositoryError::validation_error(format!(
					"Provider '{}' is defined more than once",
					provider.name
				)));
			}
			providers.insert(provider.name.clone(), provider);
		}

		Self::validate_provider_references(&providers, networks)?;
		Ok(providers)
	}

	fn get(&self, name: &str) -> Option<Provider> {
		self.providers.get(name).cloned()
	}

	fn get_all(&self) -> HashMap<String, Provider> {
		self.providers.clone()
	}
}

/// Read-side lookups over the provider catalogue
#[derive(Clone)]
pub struct ProviderService<T: ProviderRepositoryTrait> {
	repository: T,
}

impl<T: ProviderRepositoryTrait> ProviderService<T> {
	pub fn new(
		path: Option<&Path>,
		networks: &HashMap<String, Network>,
	) -> Result<ProviderService<ProviderRepository>, RepositoryError> {
		let repository = ProviderRepository::new(path, networks)?;
		Ok(ProviderService { repository })
	}

	pub fn new_with_repository(repository: T) -> Self {
		ProviderService { repository }
	}

	pub fn get(&self, name: &str) -> Option<Provider> {
		self.repository.get(name)
	}

	pub fn get_all(&self) -> HashMap<String, Provider> {
		self.repository.get_all()
	}

	/// Providers of `network` supporting `operation`, by ascending priority.
	/// Ties are broken by name so the order is stable.
	pub fn providers_for(&self, network: &str, operation: Operation) -> Vec<Provider> {
		let mut providers: Vec<Provider> = self
			.repository
			.get_all()
			.into_values()
			.filter(|p| p.network == network && p.supports(operation))
			.collect();
		providers.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
		providers
	}

	/// Providers to compare against `default_provider`. Legacy providers
	/// without an explorer interface are left out.
	pub fn alternatives(
		&self,
		network: &str,
		operation: Operation,
		default_provider: &str,
	) -> Vec<Provider> {
		self.providers_for(network, operation)
			.into_iter()
			.filter(|p| p.name != default_provider && p.explorer_interface.is_some())
			.collect()
	}

	/// Default assignments declared in configuration, used to seed the store
	pub fn initial_defaults(&self) -> Vec<DefaultProviderAssignment> {
		let mut assignments: Vec<DefaultProviderAssignment> = self
			.repository
			.get_all()
			.into_values()
			.flat_map(|p| {
				p.default_for
					.iter()
					.map(|operation| DefaultProviderAssignment {
						network: p.network.clone(),
						operation: *operation,
						provider: p.name.clone(),
					})
					.collect::<Vec<_>>()
			})
			.collect();
		assignments.sort_by(|a, b| {
			(a.network.as_str(), a.operation).cmp(&(b.network.as_str(), b.operation))
		});
		assignments
	}
}
