//! Long-lived retention loop over every network.

use chrono::Utc;
use rand::seq::SliceRandom;
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

use crate::services::retention::DeleteBlockTxsCron;

const DEFAULT_PAUSE_BETWEEN_NETWORKS: Duration = Duration::from_secs(5);
const DEFAULT_PAUSE_ON_ERROR: Duration = Duration::from_secs(60);

/// Runs the retention job for every network, forever, in a fresh random
/// order on each pass. A failing network is logged and skipped.
pub struct RetentionRunner {
	cron: Arc<DeleteBlockTxsCron>,
	networks: Vec<String>,
	pause_between_networks: Duration,
	pause_on_error: Duration,
}

impl RetentionRunner {
	pub fn new(cron: Arc<DeleteBlockTxsCron>, networks: Vec<String>) -> Self {
		Self {
			cron,
			networks,
			pause_between_networks: DEFAULT_PAUSE_BETWEEN_NETWORKS,
			pause_on_error: DEFAULT_PAUSE_ON_ERROR,
		}
	}

	pub fn with_pauses(mut self, between_networks: Duration, on_error: Duration) -> Self {
		self.pause_between_networks = between_networks;
		self.pause_on_error = on_error;
		self
	}

	/// Returns once `shutdown` turns true or its sender is dropped
	pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
		tracing::info!(networks = self.networks.len(), "retention runner started");

		loop {
			let mut order = self.networks.clone();
			order.shuffle(&mut rand::rng());

			if order.is_empty() && pause(self.pause_between_networks, &mut shutdown).await {
				break;
			}

			for network in &order {
				if *shutdown.borrow() {
					tracing::info!("retention runner stopped");
					return;
				}

				let pause_for = match self.cron.run(network, Utc::now()).await {
					Ok(outcome) => {
						tracing::debug!(network = %network, ?outcome, "retention pass done");
						self.pause_between_networks
					}
					Err(e) => {
						tracing::error!(network = %network, error = %e, "retention failed");
						self.pause_on_error
					}
				};

				if pause(pause_for, &mut shutdown).await {
					tracing::info!("retention runner stopped");
					return;
				}
			}
		}
		tracing::info!("retention runner stopped");
	}
}

/// Sleeps for `duration`; true when shutdown was requested meanwhile
async fn pause(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
	if *shutdown.borrow() {
		return true;
	}
	tokio::select! {
		_ = tokio::time::sleep(duration) => false,
		changed = shutdown.changed() => changed.is_err() || *shutdown.borrow(),
	}
}
