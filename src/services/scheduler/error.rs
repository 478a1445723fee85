use log::error;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SchedulerError {
	/// Creating, filling or starting the job scheduler failed
	SchedulerError(String),
	/// A cron expression was rejected
	ScheduleError(String),
}

impl SchedulerError {
	fn format_message(&self) -> String {
		match self {
			Self::SchedulerError(msg) => format!("Scheduler error: {}", msg),
			Self::ScheduleError(msg) => format!("Schedule error: {}", msg),
		}
	}

	pub fn scheduler_error(msg: impl Into<String>) -> Self {
		let error = Self::SchedulerError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn schedule_error(msg: impl Into<String>) -> Self {
		let error = Self::ScheduleError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for SchedulerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for SchedulerError {}
