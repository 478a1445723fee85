//! Alert delivery errors.

use log::error;
use std::{error::Error, fmt};

#[derive(Debug)]
pub enum NotificationError {
	/// The Bot API could not be reached
	DeliveryError(String),
	/// The Bot API answered with a non-success status
	Rejected { status: u16, description: String },
	/// Token or chat id missing
	ConfigError(String),
}

impl NotificationError {
	fn format_message(&self) -> String {
		match self {
			Self::DeliveryError(msg) => format!("Alert delivery failed: {}", msg),
			Self::Rejected {
				status,
				description,
			} => format!("Alert rejected with status {}: {}", status, description),
			Self::ConfigError(msg) => format!("Alert channel misconfigured: {}", msg),
		}
	}

	pub fn delivery_error(msg: impl Into<String>) -> Self {
		let error = Self::DeliveryError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn rejected(status: u16, description: impl Into<String>) -> Self {
		let error = Self::Rejected {
			status,
			description: description.into(),
		};
		error!("{}", error.format_message());
		error
	}

	/// Not logged, a missing channel only downgrades alerts to the log
	pub fn config_error(msg: impl Into<String>) -> Self {
		Self::ConfigError(msg.into())
	}
}

impl From<reqwest_middleware::Error> for NotificationError {
	fn from(error: reqwest_middleware::Error) -> Self {
		Self::delivery_error(error.to_string())
	}
}

impl fmt::Display for NotificationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for NotificationError {}
