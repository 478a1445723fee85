use thiserror::Error;

use crate::models::Operation;

/// Failures of provider calls and of the per-network explorers
#[derive(Debug, Error)]
pub enum ExplorerError {
	#[error("No provider is configured for {operation} on network '{network}'")]
	ProviderNotFound {
		network: String,
		operation: Operation,
	},

	#[error("Provider '{provider}' is not configured for {operation} on network '{network}'")]
	UnknownProvider {
		network: String,
		provider: String,
		operation: Operation,
	},

	#[error("No provider returned valid {operation} data on network '{network}'")]
	NotFound {
		network: String,
		operation: Operation,
	},

	#[error("Request to provider '{provider}' failed: {message}")]
	RequestFailed { provider: String, message: String },

	#[error("Provider '{provider}' returned an invalid {operation} response")]
	InvalidResponse {
		provider: String,
		operation: Operation,
	},

	#[error("Provider '{provider}' has no endpoint for {operation}")]
	MissingEndpoint {
		provider: String,
		operation: Operation,
	},
}

impl ExplorerError {
	pub fn request_failed(provider: &str, message: impl Into<String>) -> Self {
		Self::RequestFailed {
			provider: provider.to_string(),
			message: message.into(),
		}
	}

	pub fn invalid_response(provider: &str, operation: Operation) -> Self {
		Self::InvalidResponse {
			provider: provider.to_string(),
			operation,
		}
	}
}
