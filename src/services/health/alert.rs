use crate::{
	models::{HealthStatus, Operation},
	services::health::HealthCheckError,
};

/// Alert text for one checked provider. `alternative` is `None` when the
/// default provider itself failed.
pub fn format_alert(
	network: &str,
	operation: Operation,
	default_provider: &str,
	alternative: Option<&str>,
	status: HealthStatus,
	details: &[String],
) -> String {
	let details = if details.is_empty() {
		"none".to_string()
	} else {
		details.join("; ")
	};

	format!(
		"Health check {} {}\nDefault provider: {}\nAlternative provider: {}\nStatus: {}\nDetails: {}",
		network,
		operation,
		default_provider,
		alternative.unwrap_or("-"),
		status,
		details
	)
}

/// Alert text for a run that stopped before any provider was compared
pub fn format_run_failure(network: &str, operation: Operation, error: &HealthCheckError) -> String {
	format!(
		"Health check {} {}\nStatus: not run\nReason: {}",
		network, operation, error
	)
}
