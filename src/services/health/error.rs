//! Health check error types.
//!
//! Every failure that aborts a health-check run for a (network, operation)
//! pair. Failures of single alternative providers are not errors; they end up
//! in the run report.

use log::error;
use std::{error::Error, fmt};

use crate::services::store::StoreError;

#[derive(Debug)]
pub enum HealthCheckError {
	/// No usable provider (or adapter) for the operation
	ProviderNotFound(String),
	NetworkNotFound(String),
	/// No stored transfer to sample from
	TransactionNotFound(String),
	/// No stored block range or configured token to sample from
	NotFound(String),
	/// The default provider gave no usable answer after its retries
	DefaultProviderFailed(String),
	UnsupportedOperation(String),
	StoreError(String),
}

impl HealthCheckError {
	fn format_message(&self) -> String {
		match self {
			Self::ProviderNotFound(msg) => format!("Provider not found: {}", msg),
			Self::NetworkNotFound(msg) => format!("Network not found: {}", msg),
			Self::TransactionNotFound(msg) => format!("Transaction not found: {}", msg),
			Self::NotFound(msg) => format!("Not found: {}", msg),
			Self::DefaultProviderFailed(msg) => format!("Default provider failed: {}", msg),
			Self::UnsupportedOperation(msg) => format!("Unsupported operation: {}", msg),
			Self::StoreError(msg) => format!("Store error: {}", msg),
		}
	}

	pub fn provider_not_found(msg: impl Into<String>) -> Self {
		let error = Self::ProviderNotFound(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn network_not_found(msg: impl Into<String>) -> Self {
		let error = Self::NetworkNotFound(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn transaction_not_found(msg: impl Into<String>) -> Self {
		let error = Self::TransactionNotFound(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn not_found(msg: impl Into<String>) -> Self {
		let error = Self::NotFound(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn default_provider_failed(msg: impl Into<String>) -> Self {
		let error = Self::DefaultProviderFailed(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn unsupported_operation(msg: impl Into<String>) -> Self {
		let error = Self::UnsupportedOperation(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn store_error(msg: impl Into<String>) -> Self {
		let error = Self::StoreError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl From<StoreError> for HealthCheckError {
	fn from(err: StoreError) -> Self {
		Self::store_error(err.to_string())
	}
}

impl fmt::Display for HealthCheckError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for HealthCheckError {}
