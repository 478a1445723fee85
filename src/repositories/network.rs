//! Network configuration repository.

use std::{collections::HashMap, path::Path};

use crate::{
	models::{ConfigLoader, Network},
	repositories::error::RepositoryError,
};

/// Networks keyed by name
#[derive(Clone)]
pub struct NetworkRepository {
	pub networks: HashMap<String, Network>,
}

impl NetworkRepository {
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let networks = Self::load_all(path)?;
		Ok(NetworkRepository { networks })
	}

	pub fn new_with_networks(networks: Vec<Network>) -> Self {
		NetworkRepository {
			networks: networks.into_iter().map(|n| (n.name.clone(), n)).collect(),
		}
	}

	/// Files are keyed by stem on load; the repository keys by network name.
	fn load_all(path: Option<&Path>) -> Result<HashMap<String, Network>, RepositoryError> {
		let by_file: HashMap<String, Network> = Network::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load networks: {}", e)))?;

		let mut networks = HashMap::new();
		for network in by_file.into_values() {
			if networks.contains_key(&network.name) {
				return Err(RepositoryError::validation_error(format!(
					"Network '{}' is defined more than once",
					network.name
				)));
			}
			networks.insert(network.name.clone(), network);
		}
		Ok(networks)
	}
}

pub trait NetworkRepositoryTrait: Clone + Send + Sync {
	fn load_all(&self, path: Option<&Path>) -> Result<HashMap<String, Network>, RepositoryError>;
	fn get(&self, name: &str) -> Option<Network>;
	fn get_all(&self) -> HashMap<String, Network>;
}

impl NetworkRepositoryTrait for NetworkRepository {
	fn load_all(&self, path: Option<&Path>) -> Result<HashMap<String, Network>, RepositoryError> {
		NetworkRepository::load_all(path)
	}

	fn get(&self, name: &str) -> Option<Network> {
		self.networks.get(name).cloned()
	}

	fn get_all(&self) -> HashMap<String, Network> {
		self.networks.clone()
	}
}

#[derive(Clone)]
pub struct NetworkService<T: NetworkRepositoryTrait> {
	repository: T,
}

impl<T: NetworkRepositoryTrait> NetworkService<T> {
	pub fn new(path: Option<&Path>) -> Result<NetworkService<NetworkRepository>, RepositoryError> {
		let repository = NetworkRepository::new(path)?;
		Ok(NetworkService { repository })
	}

	pub fn new_with_repository(repository: T) -> Self {
		NetworkService { repository }
	}

	pub fn get(&self, name: &str) -> Option<Network> {
		self.repository.get(name)
	}

	pub fn get_all(&self) -> HashMap<String, Network> {
		self.repository.get_all()
	}

	/// Network names in a stable order
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.repository.get_all().into_keys().collect();
		names.sort();
		names
	}
}
