//! Resolution of the persisted primary provider per (network, operation).

use std::sync::Arc;

use crate::{
	models::{DefaultProviderAssignment, Operation, Provider},
	repositories::{ProviderRepositoryTrait, ProviderService},
	services::{health::HealthCheckError, store::ExplorerStore},
};

pub struct DefaultProviderSelector<P: ProviderRepositoryTrait> {
	store: Arc<dyn ExplorerStore>,
	providers: Arc<ProviderService<P>>,
}

impl<P: ProviderRepositoryTrait> Clone for DefaultProviderSelector<P> {
	fn clone(&self) -> Self {
		Self {
			store: self.store.clone(),
			providers: self.providers.clone(),
		}
	}
}

impl<P: ProviderRepositoryTrait> DefaultProviderSelector<P> {
	pub fn new(store: Arc<dyn ExplorerStore>, providers: Arc<ProviderService<P>>) -> Self {
		Self { store, providers }
	}

	/// The assigned default provider, resolved against the catalogue
	pub async fn default_provider(
		&self,
		network: &str,
		operation: Operation,
	) -> Result<Provider, HealthCheckError> {
		let assignment = self
			.store
			.default_provider(network, operation)
			.await?
			.ok_or_else(|| {
				HealthCheckError::provider_not_found(format!(
					"no default provider assigned for {} on {}",
					operation, network
				))
			})?;

		self.providers
			.get(&assignment.provider)
			.filter(|p| p.network == network && p.supports(operation))
			.ok_or_else(|| {
				HealthCheckError::provider_not_found(format!(
					"default provider '{}' for {} on {} is not configured",
					assignment.provider, operation, network
				))
			})
	}

	/// Operator action; health checks never reassign defaults
	pub async fn assign(
		&self,
		network: &str,
		operation: Operation,
		provider: &str,
	) -> Result<(), HealthCheckError> {
		let known = self
			.providers
			.get(provider)
			.is_some_and(|p| p.network == network && p.supports(operation));
		if !known {
			return Err(HealthCheckError::provider_not_found(format!(
				"'{}' cannot serve {} on {}",
				provider, operation, network
			)));
		}

		self.store
			.set_default_provider(DefaultProviderAssignment {
				network: network.to_string(),
				operation,
				provider: provider.to_string(),
			})
			.await?;
		tracing::info!(network, %operation, provider, "default provider assigned");
		Ok(())
	}

	/// Stores the configured defaults for pairs that have no assignment yet.
	/// Returns how many were written.
	pub async fn seed_defaults(&self) -> Result<usize, HealthCheckError> {
		let mut seeded = 0;
		for assignment in self.providers.initial_defaults() {
			let existing = self
				.store
				.default_provider(&assignment.network, assignment.operation)
				.await?;
			if existing.is_none() {
				self.store.set_default_provider(assignment).await?;
				seeded += 1;
			}
		}
		Ok(seeded)
	}
}
