//! Configuration loading and validation.
//!
//! Networks and providers live in one JSON file each under `config/networks`
//! and `config/providers`. The retention policy is a single file,
//! `config/retention.json`.

use std::path::Path;

mod error;
mod network_config;
mod provider_config;
mod retention_config;

pub use error::ConfigError;

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Load every configuration file of a directory, keyed by file stem
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	/// Load and validate one configuration file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	fn validate(&self) -> Result<(), ConfigError>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}

/// Shared directory walk for loaders whose files hold one item each.
///
/// Files that fail to parse or validate are skipped; their errors are logged
/// by the error constructors.
pub(crate) fn load_dir<C, T>(dir: &Path, missing: &str) -> Result<T, ConfigError>
where
	C: ConfigLoader,
	T: FromIterator<(String, C)>,
{
	if !dir.exists() {
		return Err(ConfigError::file_error(missing));
	}

	let mut pairs = Vec::new();
	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		if !C::is_json_file(&path) {
			continue;
		}

		let name = path
			.file_stem()
			.and_then(|s| s.to_str())
			.unwrap_or("unknown")
			.to_string();

		if let Ok(item) = C::load_from_path(&path) {
			pairs.push((name, item));
		}
	}

	Ok(T::from_iter(pairs))
}

/// Names are used as metric labels and store keys
pub(crate) fn validate_slug(kind: &str, value: &str) -> Result<(), ConfigError> {
	if value.is_empty()
		|| !value
			.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
	{
		return Err(ConfigError::validation_error(format!(
			"{} name '{}' must contain only lowercase letters, numbers, and underscores",
			kind, value
		)));
	}
	Ok(())
}

/// Cron expressions use the six-field format with seconds
pub(crate) fn validate_cron(field: &str, expression: &str) -> Result<(), ConfigError> {
	use std::str::FromStr;

	cron::Schedule::from_str(expression)
		.map_err(|e| ConfigError::cron_error(field, expression, e))?;
	Ok(())
}
