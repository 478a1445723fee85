//! Retention error types.

use log::error;
use std::{error::Error, fmt};

use crate::services::store::StoreError;

#[derive(Debug)]
pub enum RetentionError {
	/// The delete-and-advance transaction failed and was rolled back
	StoreError(String),
	NetworkNotFound(String),
}

impl RetentionError {
	fn format_message(&self) -> String {
		match self {
			Self::StoreError(msg) => format!("Store error: {}", msg),
			Self::NetworkNotFound(msg) => format!("Network not found: {}", msg),
		}
	}

	pub fn store_error(msg: impl Into<String>) -> Self {
		let error = Self::StoreError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn network_not_found(msg: impl Into<String>) -> Self {
		let error = Self::NetworkNotFound(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl From<StoreError> for RetentionError {
	fn from(err: StoreError) -> Self {
		Self::store_error(err.to_string())
	}
}

impl fmt::Display for RetentionError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for RetentionError {}
