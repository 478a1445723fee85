use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

impl HealthStatus {
	pub fn is_healthy(&self) -> bool {
		matches!(self, HealthStatus::Healthy)
	}
}

impl fmt::Display for HealthStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HealthStatus::Healthy => write!(f, "healthy"),
			HealthStatus::Unhealthy => write!(f, "unhealthy"),
		}
	}
}

/// Last health verdict of a provider for one operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderStatus {
	pub network: String,
	pub provider: String,
	pub operation: Operation,
	pub status: HealthStatus,
	pub last_checked: DateTime<Utc>,
	#[serde(default)]
	pub details: Vec<String>,
}

/// Lowest block height whose transfers are still retained
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockStats {
	pub network: String,
	pub min_available_block: u64,
}
