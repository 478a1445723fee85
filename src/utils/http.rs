//! HTTP client shared by explorer providers and the Telegram notifier.
//!
//! Transient failures (connection errors, timeouts, 5xx and 429 answers) are
//! retried with exponential backoff before the caller sees them. Provider
//! fallback then happens one level up, in the explorer adapters.

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpRetryConfig {
	/// Retries after the first attempt
	pub max_retries: u32,
	pub base_for_backoff: u32,
	pub initial_backoff: Duration,
	pub max_backoff: Duration,
	pub jitter: Jitter,
}

impl Default for HttpRetryConfig {
	fn default() -> Self {
		Self {
			max_retries: 2,
			base_for_backoff: 2,
			initial_backoff: Duration::from_millis(200),
			max_backoff: Duration::from_secs(5),
			jitter: Jitter::Bounded,
		}
	}
}

impl HttpRetryConfig {
	fn policy(&self) -> ExponentialBackoff {
		ExponentialBackoff::builder()
			.base(self.base_for_backoff)
			.retry_bounds(self.initial_backoff, self.max_backoff)
			.jitter(self.jitter)
			.build_with_max_retries(self.max_retries)
	}
}

/// Client with a per-request timeout and transient retries
pub fn create_provider_http_client(
	config: &HttpRetryConfig,
	timeout: Duration,
) -> Result<ClientWithMiddleware, reqwest::Error> {
	let base_client = reqwest::Client::builder()
		.timeout(timeout)
		.user_agent(concat!("explorer-monitor/", env!("CARGO_PKG_VERSION")))
		.build()?;

	Ok(ClientBuilder::new(base_client)
		.with(RetryTransientMiddleware::new_with_policy(config.policy()))
		.build())
}
