//! Retention configuration loading and validation.

use std::path::Path;

use crate::models::{config::validate_slug, ConfigError, RetentionConfig};

impl RetentionConfig {
	/// Load the retention classes, falling back to defaults when the file is
	/// absent.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let path = path.unwrap_or(Path::new("config/retention.json"));
		if !path.exists() {
			tracing::warn!(
				path = %path.display(),
				"retention config not found, every network uses the default window"
			);
			return Ok(Self::default());
		}
		Self::load_from_path(path)
	}

	pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: RetentionConfig = serde_json::from_reader(file)?;

		config.validate()?;

		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.high_transaction_hours == 0
			|| self.wallet_txs_tested_hours == 0
			|| self.default_hours == 0
		{
			return Err(ConfigError::validation_error(
				"Retention windows must be greater than 0 hours",
			));
		}

		for network in self
			.high_transaction_networks
			.iter()
			.chain(self.wallet_txs_tested_networks.iter())
		{
			validate_slug("Network", network)?;
		}

		Ok(())
	}
}
