//! Tracing subscriber setup.
//!
//! Logs go to stdout unless `LOG_MODE=file`, in which case they go to a
//! daily-rolling file under `LOG_DATA_DIR`. `LOG_LEVEL` takes precedence over
//! `RUST_LOG` for the filter.
use std::{
	env,
	path::{Path, PathBuf},
};
use tracing::Subscriber;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::utils::constants::{DEFAULT_LOG_DIR, LOG_FILE_PREFIX};

type LoggingResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Setup logging for the application from the `LOG_*` environment variables
pub fn setup_logging() -> LoggingResult {
	let filter = create_filter(env::var("LOG_LEVEL").ok().as_deref());

	if env::var("LOG_MODE").is_ok_and(|mode| mode.eq_ignore_ascii_case("file")) {
		let log_dir = log_directory(env::var("LOG_DATA_DIR").ok().as_deref());
		std::fs::create_dir_all(&log_dir)?;
		let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
		init_subscriber(filter, appender, false)
	} else {
		init_subscriber(filter, std::io::stdout, true)
	}
}

/// Filter from an explicit level, else `RUST_LOG`, else `info`
pub fn create_filter(log_level: Option<&str>) -> EnvFilter {
	match log_level.filter(|level| !level.is_empty()) {
		Some(level) => EnvFilter::new(level),
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
	}
}

pub fn log_directory(log_data_dir: Option<&str>) -> PathBuf {
	Path::new(log_data_dir.unwrap_or(DEFAULT_LOG_DIR)).to_path_buf()
}

fn build_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync + 'static
where
	W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let format = fmt::format()
		.compact()
		.with_ansi(ansi)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false);

	tracing_subscriber::registry().with(filter).with(
		fmt::layer()
			.with_writer(writer)
			.event_format(format)
			.fmt_fields(fmt::format::PrettyFields::new()),
	)
}

fn init_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> LoggingResult
where
	W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	build_subscriber(filter, writer, ansi).try_init()?;
	Ok(())
}
