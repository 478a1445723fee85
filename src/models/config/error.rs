//! Errors raised while reading network, provider and retention files.
//!
//! Every constructor logs the error once, so loaders that skip a broken file
//! still leave a trace of why it was skipped.

use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// A value is well-formed JSON but not acceptable
	#[error("Invalid configuration: {0}")]
	ValidationError(String),

	/// A cron field does not parse as a six-field schedule
	#[error("Invalid cron expression for {field} '{expression}': {reason}")]
	CronError {
		field: String,
		expression: String,
		reason: String,
	},

	/// The file is not valid JSON for its type
	#[error("Malformed configuration: {0}")]
	ParseError(String),

	#[error("Configuration file unavailable: {0}")]
	FileError(String),
}

impl ConfigError {
	fn logged(self) -> Self {
		error!("{}", self);
		self
	}

	pub fn validation_error(msg: impl Into<String>) -> Self {
		Self::ValidationError(msg.into()).logged()
	}

	pub fn cron_error(field: &str, expression: &str, reason: impl ToString) -> Self {
		Self::CronError {
			field: field.to_string(),
			expression: expression.to_string(),
			reason: reason.to_string(),
		}
		.logged()
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		Self::ParseError(msg.into()).logged()
	}

	pub fn file_error(msg: impl Into<String>) -> Self {
		Self::FileError(msg.into()).logged()
	}
}

impl From<std::io::Error> for ConfigError {
	fn from(err: std::io::Error) -> Self {
		Self::file_error(err.to_string())
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(err.to_string())
	}
}
