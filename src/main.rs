//! Explorer monitor entry point.
//!
//! Loads networks and providers from `config/`, opens the store and then
//! either runs one job and exits or keeps running:
//! - `--check <network>:<operation>`: one provider health check
//! - `--retention <network>`: one retention pass
//! - `--retention-loop`: retention over every network until Ctrl+C
//! - otherwise: cron scheduled health checks and retention until Ctrl+C

use explorer_monitor::{
	bootstrap::{
		create_http_client, initialize_services, load_config, open_store, parse_check_target,
		ConfigPaths, Result, Services,
	},
	repositories::{NetworkRepository, ProviderRepository},
	services::{
		health::HealthCheckConfig, notification::create_notifier, retention::RetentionRunner,
		scheduler::MonitorScheduler,
	},
	utils::{
		logging::setup_logging,
		metrics::server::{create_metrics_server, metrics_bind_address},
	},
};

use actix_web::dev::Server;
use chrono::Utc;
use clap::{Arg, ArgMatches, Command};
use dotenvy::dotenv;
use std::env::{set_var, var};
use tokio::sync::watch;
use tracing::{error, info, warn};

type AppServices = Services<NetworkRepository, ProviderRepository>;

fn cli() -> Command {
	Command::new("explorer-monitor")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Checks the health of blockchain explorer providers against the default provider and \
			 expires stored block transfers.",
		)
		.next_help_heading("Logging")
		.args([
			Arg::new("log-file")
				.long("log-file")
				.help("Log to daily rolling files (LOG_MODE=file)")
				.action(clap::ArgAction::SetTrue),
			Arg::new("log-level")
				.long("log-level")
				.help("Log filter, e.g. info or explorer_monitor=debug (LOG_LEVEL)")
				.value_name("FILTER"),
			Arg::new("log-path")
				.long("log-path")
				.help("Directory for log files (LOG_DATA_DIR, default logs/)")
				.value_name("DIR"),
		])
		.next_help_heading("Metrics")
		.args([
			Arg::new("metrics")
				.long("metrics")
				.help("Serve Prometheus metrics (METRICS_ENABLED=true)")
				.action(clap::ArgAction::SetTrue),
			Arg::new("metrics-address")
				.long("metrics-address")
				.help("Metrics listen address, default 127.0.0.1:8081")
				.value_name("HOST:PORT"),
		])
		.next_help_heading("Jobs")
		.arg(
			Arg::new("check")
				.long("check")
				.help("Run one health check and exit")
				.value_name("NETWORK:OPERATION")
				.conflicts_with_all(["retention", "retention-loop"]),
		)
		.arg(
			Arg::new("retention")
				.long("retention")
				.help("Run one retention pass for a network and exit")
				.value_name("NETWORK")
				.conflicts_with("retention-loop"),
		)
		.arg(
			Arg::new("retention-loop")
				.long("retention-loop")
				.help("Run retention over every network in a loop until interrupted")
				.action(clap::ArgAction::SetTrue),
		)
}

/// Exports logging flags as `LOG_*` variables. Variables already set win.
fn apply_logging_args(matches: &ArgMatches) {
	let mut overrides = vec![];
	if matches.get_flag("log-file") {
		overrides.push(("LOG_MODE", "file".to_string()));
	}
	for (arg, variable) in [("log-level", "LOG_LEVEL"), ("log-path", "LOG_DATA_DIR")] {
		if let Some(value) = matches.get_one::<String>(arg) {
			overrides.push((variable, value.clone()));
		}
	}

	for (variable, value) in overrides {
		if var(variable).is_err() {
			set_var(variable, value);
		}
	}
}

async fn run_check(services: &AppServices, target: &str) -> Result<()> {
	let (network, operation) = parse_check_target(target)?;
	let report = services.checker.run(&network, operation).await?;

	info!(
		network = %report.network,
		operation = %report.operation,
		default_provider = %report.default_provider,
		alternatives = report.outcomes.len(),
		"Health check completed"
	);
	for outcome in &report.outcomes {
		info!(
			provider = %outcome.provider,
			status = %outcome.status,
			details = ?outcome.details,
			"Provider verdict"
		);
	}
	Ok(())
}

async fn run_retention(services: &AppServices, network: &str) -> Result<()> {
	if services.networks.get(network).is_none() {
		return Err(format!("Network '{}' is not configured", network).into());
	}
	let outcome = services.retention.run(network, Utc::now()).await?;
	info!(network, ?outcome, "Retention completed");
	Ok(())
}

/// Returns on Ctrl+C, or when the metrics server stops by itself
async fn wait_for_shutdown(metrics_server: Option<Server>) {
	let metrics = async move {
		match metrics_server {
			Some(server) => server.await,
			None => std::future::pending().await,
		}
	};

	tokio::select! {
		result = tokio::signal::ctrl_c() => {
			if let Err(e) = result {
				error!(error = %e, "failed to listen for Ctrl+C");
			}
			info!("shutdown requested");
		}
		result = metrics => {
			if let Err(e) = result {
				error!(error = %e, "metrics server failed");
			}
			info!("metrics server stopped, shutting down");
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let matches = cli().get_matches();

	dotenv().ok();
	apply_logging_args(&matches);

	setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let config = load_config(&ConfigPaths::default())
		.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
	let store = open_store(None).await?;
	let client = create_http_client()?;
	let notifier = create_notifier(client.clone());

	let services = initialize_services(
		config.networks,
		config.providers,
		config.retention,
		store,
		client,
		notifier,
		HealthCheckConfig::default(),
	)
	.await
	.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;

	if let Some(target) = matches.get_one::<String>("check") {
		return run_check(&services, target).await;
	}

	if let Some(network) = matches.get_one::<String>("retention") {
		return run_retention(&services, network).await;
	}

	let metrics_enabled =
		matches.get_flag("metrics") || var("METRICS_ENABLED").is_ok_and(|v| v == "true");

	let metrics_address = metrics_bind_address(
		matches.get_one::<String>("metrics-address").map(String::as_str),
		var("IN_DOCKER").is_ok_and(|v| v == "true"),
		var("METRICS_PORT").ok().as_deref(),
	);

	let metrics_server = if metrics_enabled {
		create_metrics_server(&metrics_address)
			.inspect_err(|e| {
				error!(address = %metrics_address, error = %e, "metrics server unavailable")
			})
			.ok()
	} else {
		info!("metrics disabled, pass --metrics or set METRICS_ENABLED=true");
		None
	};

	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	let mut scheduler = None;
	let runner_handle = if matches.get_flag("retention-loop") {
		let runner = RetentionRunner::new(services.retention.clone(), services.networks.names());
		Some(tokio::spawn(async move { runner.run(shutdown_rx).await }))
	} else {
		let monitor_scheduler = MonitorScheduler::new(
			services.networks.clone(),
			services.checker.clone(),
			services.retention.clone(),
		)
		.await?;
		if monitor_scheduler.start().await? == 0 {
			warn!("No jobs scheduled, check the network configuration");
		}
		scheduler = Some(monitor_scheduler);
		None
	};

	info!("explorer monitor running, Ctrl+C stops it");

	wait_for_shutdown(metrics_server).await;

	let _ = shutdown_tx.send(true);

	if let Some(mut scheduler) = scheduler {
		if let Err(e) = scheduler.shutdown().await {
			error!(error = %e, "scheduler did not stop cleanly");
		}
	}

	if let Some(handle) = runner_handle {
		if let Err(e) = handle.await {
			error!(error = %e, "retention runner ended abnormally");
		}
	}

	info!("shutdown complete");
	Ok(())
}
