//! Provider configuration loading and validation.

use std::path::Path;

use crate::models::{
	config::{load_dir, validate_slug},
	ConfigError, ConfigLoader, Provider,
};

impl ConfigLoader for Provider {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let provider_dir = path.unwrap_or(Path::new("config/providers"));
		load_dir::<Self, T>(provider_dir, "providers directory not found")
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: Provider = serde_json::from_reader(file)?;

		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_slug("Provider", &self.name)?;
		validate_slug("Network", &self.network)?;

		if self.supported_operations.is_empty() {
			return Err(ConfigError::validation_error(format!(
				"Provider '{}' supports no operations",
				self.name
			)));
		}

		if let Some(op) = self
			.default_for
			.iter()
			.find(|op| !self.supported_operations.contains(op))
		{
			return Err(ConfigError::validation_error(format!(
				"Provider '{}' is default for '{}' which it does not support",
				self.name, op
			)));
		}

		if let Some(base_url) = &self.base_url {
			if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
				return Err(ConfigError::validation_error(format!(
					"Provider '{}' base_url must start with http:// or https://",
					self.name
				)));
			}

			if let Some(op) = self
				.supported_operations
				.iter()
				.find(|op| self.endpoints.for_operation(**op).is_none())
			{
				return Err(ConfigError::validation_error(format!(
					"Provider '{}' has no endpoint for supported operation '{}'",
					self.name, op
				)));
			}
		}

		if self.explorer_interface.as_deref() == Some("") {
			return Err(ConfigError::validation_error(format!(
				"Provider '{}' has an empty explorer_interface",
				self.name
			)));
		}

		Ok(())
	}
}
