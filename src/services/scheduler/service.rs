use chrono::Utc;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::{
	models::{Network, Operation},
	repositories::{NetworkRepositoryTrait, NetworkService, ProviderRepositoryTrait},
	services::{
		health::ProviderHealthChecker, retention::DeleteBlockTxsCron,
		scheduler::SchedulerError,
	},
};

/// Cron-driven runner of the retention and health-check jobs.
///
/// One retention job per network and one health-check job per
/// (network, operation). Each invocation is independent; failures are logged
/// and never stop the scheduler.
pub struct MonitorScheduler<N, P>
where
	N: NetworkRepositoryTrait + 'static,
	P: ProviderRepositoryTrait + 'static,
{
	networks: Arc<NetworkService<N>>,
	checker: Arc<ProviderHealthChecker<N, P>>,
	retention: Arc<DeleteBlockTxsCron>,
	scheduler: JobScheduler,
}

impl<N, P> MonitorScheduler<N, P>
where
	N: NetworkRepositoryTrait + 'static,
	P: ProviderRepositoryTrait + 'static,
{
	pub async fn new(
		networks: Arc<NetworkService<N>>,
		checker: Arc<ProviderHealthChecker<N, P>>,
		retention: Arc<DeleteBlockTxsCron>,
	) -> Result<Self, SchedulerError> {
		let scheduler = JobScheduler::new().await.map_err(|e| {
			SchedulerError::scheduler_error(format!("Failed to create scheduler: {}", e))
		})?;

		Ok(Self {
			networks,
			checker,
			retention,
			scheduler,
		})
	}

	/// Schedules every job and starts the scheduler. Returns the number of
	/// scheduled jobs.
	pub async fn start(&self) -> Result<usize, SchedulerError> {
		let mut networks: Vec<Network> = self.networks.get_all().into_values().collect();
		networks.sort_by(|a, b| a.name.cmp(&b.name));

		if networks.is_empty() {
			info!("No networks found, scheduler will not start");
			return Ok(0);
		}

		let mut scheduled = 0;
		for network in &networks {
			self.schedule_retention(network).await?;
			scheduled += 1;

			if let Some(health_check) = &network.health_check {
				for operation in &health_check.operations {
					self.schedule_health_check(network, &health_check.cron_schedule, *operation)
						.await?;
					scheduled += 1;
				}
			}
		}

		self.scheduler.start().await.map_err(|e| {
			SchedulerError::scheduler_error(format!("Failed to start scheduler: {}", e))
		})?;

		info!(jobs = scheduled, "Scheduler started successfully");
		Ok(scheduled)
	}

	pub async fn shutdown(&mut self) -> Result<(), SchedulerError> {
		self.scheduler.shutdown().await.map_err(|e| {
			SchedulerError::scheduler_error(format!("Failed to stop scheduler: {}", e))
		})
	}

	async fn schedule_retention(&self, network: &Network) -> Result<(), SchedulerError> {
		let name = network.name.clone();
		let retention = self.retention.clone();

		let job = Job::new_async(network.retention_cron_schedule.as_str(), move |_uuid, _l| {
			let name = name.clone();
			let retention = retention.clone();

			Box::pin(async move {
				if let Err(e) = retention.run(&name, Utc::now()).await {
					error!(network = %name, error = %e, "Retention job failed");
				}
			})
		})
		.map_err(|e| {
			SchedulerError::schedule_error(format!(
				"Invalid retention schedule for {}: {}",
				network.name, e
			))
		})?;

		self.add(job).await?;
		info!(network = %network.name, schedule = %network.retention_cron_schedule, "Scheduled retention");
		Ok(())
	}

	async fn schedule_health_check(
		&self,
		network: &Network,
		schedule: &str,
		operation: Operation,
	) -> Result<(), SchedulerError> {
		let name = network.name.clone();
		let checker = self.checker.clone();

		let job = Job::new_async(schedule, move |_uuid, _l| {
			let name = name.clone();
			let checker = checker.clone();

			Box::pin(async move {
				if let Err(e) = checker.run(&name, operation).await {
					error!(network = %name, %operation, error = %e, "Health check failed");
				}
			})
		})
		.map_err(|e| {
			SchedulerError::schedule_error(format!(
				"Invalid health check schedule for {}: {}",
				network.name, e
			))
		})?;

		self.add(job).await?;
		info!(network = %network.name, %operation, schedule, "Scheduled health check");
		Ok(())
	}

	async fn add(&self, job: Job) -> Result<(), SchedulerError> {
		self.scheduler
			.add(job)
			.await
			.map(|_| ())
			.map_err(|e| SchedulerError::scheduler_error(format!("Failed to add job: {}", e)))
	}
}
