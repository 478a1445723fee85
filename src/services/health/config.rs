use std::time::Duration;

use crate::utils::RetryPolicy;

/// Tuning of the provider health checker
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheckConfig {
	/// Retries against the default provider
	pub default_retry: RetryPolicy,
	/// Retries against each alternative provider
	pub alternative_retry: RetryPolicy,
	/// Alternatives checked concurrently
	pub max_workers: usize,
	/// Blocks sampled for `block_txs` when the network sets no window
	pub block_txs_window: u64,
	/// Largest block-head lag (either way) still considered healthy
	pub block_head_tolerance: u64,
	/// Treat an alternative returning more transfers than the default as unhealthy
	pub superset_is_unhealthy: bool,
}

impl Default for HealthCheckConfig {
	fn default() -> Self {
		Self {
			default_retry: RetryPolicy::new(3, Duration::from_secs(5)),
			alternative_retry: RetryPolicy::new(3, Duration::from_secs(10)),
			max_workers: 3,
			block_txs_window: 3,
			block_head_tolerance: 10,
			superset_is_unhealthy: false,
		}
	}
}

impl HealthCheckConfig {
	/// Same limits without waiting between attempts
	pub fn without_delays(self) -> Self {
		Self {
			default_retry: RetryPolicy::new(self.default_retry.max_attempts, Duration::ZERO),
			alternative_retry: RetryPolicy::new(
				self.alternative_retry.max_attempts,
				Duration::ZERO,
			),
			..self
		}
	}
}
