//! Network configuration loading and validation.

use std::path::Path;

use crate::models::{
	config::{load_dir, validate_cron, validate_slug},
	ConfigError, ConfigLoader, Network, Operation,
};

impl ConfigLoader for Network {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let network_dir = path.unwrap_or(Path::new("config/networks"));
		load_dir::<Self, T>(network_dir, "networks directory not found")
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: Network = serde_json::from_reader(file)?;

		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_slug("Network", &self.name)?;

		if self.block_time_ms < 100 {
			return Err(ConfigError::validation_error(
				"Block time must be at least 100ms",
			));
		}

		validate_cron("retention_cron_schedule", &self.retention_cron_schedule)?;

		if let Some(health_check) = &self.health_check {
			validate_cron("health_check.cron_schedule", &health_check.cron_schedule)?;

			if health_check.operations.is_empty() {
				return Err(ConfigError::validation_error(format!(
					"Network '{}' schedules health checks without operations",
					self.name
				)));
			}

			if health_check.block_txs_window == Some(0) {
				return Err(ConfigError::validation_error(
					"block_txs_window must be greater than 0",
				));
			}

			if health_check.operations.contains(&Operation::TokenTxs) && self.tokens.is_empty() {
				return Err(ConfigError::validation_error(format!(
					"Network '{}' schedules token_txs checks without tokens",
					self.name
				)));
			}
		}

		if let Some(token) = self
			.tokens
			.iter()
			.find(|t| t.symbol.trim().is_empty() || t.contract.trim().is_empty())
		{
			return Err(ConfigError::validation_error(format!(
				"Network '{}' has a token without symbol or contract: {:?}",
				self.name, token
			)));
		}

		Ok(())
	}
}
