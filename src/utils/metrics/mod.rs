//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the health-check and retention metrics. Token transfer checks
//!   get their own gauges, labelled by token instead of operation.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{Encoder, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};

const PROVIDER_LABELS: &[&str] = &["network", "operation", "provider"];

const TOKEN_LABELS: &[&str] = &["network", "token", "provider"];

fn provider_gauge(name: &str, help: &str) -> GaugeVec {
	labelled_gauge(name, help, PROVIDER_LABELS)
}

fn token_gauge(name: &str, help: &str) -> GaugeVec {
	labelled_gauge(name, help, TOKEN_LABELS)
}

fn labelled_gauge(name: &str, help: &str, labels: &[&str]) -> GaugeVec {
	let gauge = GaugeVec::new(Opts::new(name, help), labels).unwrap();
	REGISTRY.register(Box::new(gauge.clone())).unwrap();
	gauge
}

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// HTTP-like status of the last check: 200 ok, 400 failed.
	pub static ref HEALTH_CHECK_LAST_STATUS: GaugeVec = provider_gauge(
		"health_check_last_status",
		"Status code of the last provider health check"
	);

	pub static ref HEALTH_CHECK_EMPTY_RESPONSE: GaugeVec = provider_gauge(
		"health_check_empty_response",
		"1 when the provider answered empty on every attempt"
	);

	// 0 equal, 1 larger, -1 smaller or empty.
	pub static ref HEALTH_CHECK_RESPONSE_SIZE: GaugeVec = provider_gauge(
		"health_check_response_size",
		"Response size compared to the default provider"
	);

	pub static ref HEALTH_CHECK_RESPONSE_TIME: GaugeVec = provider_gauge(
		"health_check_response_time_seconds",
		"Duration of the provider call"
	);

	pub static ref HEALTH_CHECK_RETRIES_FOR_SUCCESS: GaugeVec = provider_gauge(
		"health_check_retries_for_success",
		"Attempts needed before the provider answered with data"
	);

	pub static ref HEALTH_CHECK_ACCURACY: GaugeVec = provider_gauge(
		"health_check_accuracy",
		"Transfers returned by the provider relative to the default provider"
	);

	pub static ref HEALTH_CHECK_COMPLETENESS: GaugeVec = provider_gauge(
		"health_check_completeness",
		"Share of the default provider's transfers the provider also returned"
	);

	pub static ref HEALTH_CHECK_SPEED: GaugeVec = provider_gauge(
		"health_check_speed",
		"1 when blocks are served faster than the network block time"
	);

	pub static ref HEALTH_CHECK_DATABASE_MATCH: GaugeVec = provider_gauge(
		"health_check_database_match",
		"1 when the provider agrees with the stored reference transfer"
	);

	pub static ref HEALTH_CHECK_PROVIDER_ERROR: GaugeVec = provider_gauge(
		"health_check_provider_error",
		"1 when every attempt against the provider failed"
	);

	pub static ref HEALTH_CHECK_STATUS: GaugeVec = provider_gauge(
		"health_check_status",
		"1 healthy, 0 unhealthy"
	);

	pub static ref TOKEN_TXS_LAST_STATUS: GaugeVec = token_gauge(
		"token_txs_health_check_last_status",
		"Status code of the last token transfer check"
	);

	pub static ref TOKEN_TXS_EMPTY_RESPONSE: GaugeVec = token_gauge(
		"token_txs_health_check_empty_response",
		"1 when the provider returned no token transfers on every attempt"
	);

	pub static ref TOKEN_TXS_RESPONSE_TIME: GaugeVec = token_gauge(
		"token_txs_health_check_response_time_seconds",
		"Duration of the token transfer call"
	);

	pub static ref TOKEN_TXS_RETRIES_FOR_SUCCESS: GaugeVec = token_gauge(
		"token_txs_health_check_retries_for_success",
		"Attempts needed before the provider returned token transfers"
	);

	pub static ref TOKEN_TXS_ACCURACY: GaugeVec = token_gauge(
		"token_txs_health_check_accuracy",
		"Token transfers returned relative to the default provider"
	);

	pub static ref TOKEN_TXS_COMPLETENESS: GaugeVec = token_gauge(
		"token_txs_health_check_completeness",
		"Share of the default provider's token transfers the provider also returned"
	);

	pub static ref BLOCK_HEAD_DIFFERENCE: GaugeVec = {
		let gauge = GaugeVec::new(
			Opts::new(
				"block_head_health_check_difference_with_default",
				"Block head of the provider minus the block head of the default provider"
			),
			&["network", "provider"]
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	pub static ref MIN_AVAILABLE_BLOCK_HEIGHT: GaugeVec = {
		let gauge = GaugeVec::new(
			Opts::new("min_available_block_height", "Lowest block height still retained"),
			&["network", "provider"]
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	pub static ref RETENTION_DELETED_TRANSFERS: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("retention_deleted_transfers_total", "Transfers deleted by retention"),
			&["network"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Labels of a provider-level health metric
#[derive(Debug, Clone, Copy)]
pub struct ProviderLabels<'a> {
	pub network: &'a str,
	pub operation: &'a str,
	pub provider: &'a str,
}

impl ProviderLabels<'_> {
	fn values(&self) -> [&str; 3] {
		[self.network, self.operation, self.provider]
	}

	pub fn set(&self, gauge: &GaugeVec, value: f64) {
		gauge.with_label_values(&self.values()).set(value);
	}

	pub fn get(&self, gauge: &GaugeVec) -> f64 {
		gauge.with_label_values(&self.values()).get()
	}
}

/// Labels of a token transfer health metric
#[derive(Debug, Clone, Copy)]
pub struct TokenLabels<'a> {
	pub network: &'a str,
	pub token: &'a str,
	pub provider: &'a str,
}

impl TokenLabels<'_> {
	fn values(&self) -> [&str; 3] {
		[self.network, self.token, self.provider]
	}

	pub fn set(&self, gauge: &GaugeVec, value: f64) {
		gauge.with_label_values(&self.values()).set(value);
	}

	pub fn get(&self, gauge: &GaugeVec) -> f64 {
		gauge.with_label_values(&self.values()).get()
	}
}

pub fn set_min_available_block(network: &str, provider: &str, height: u64) {
	MIN_AVAILABLE_BLOCK_HEIGHT
		.with_label_values(&[network, provider])
		.set(height as f64);
}

pub fn record_deleted_transfers(network: &str, count: usize) {
	RETENTION_DELETED_TRANSFERS
		.with_label_values(&[network])
		.inc_by(count as u64);
}
