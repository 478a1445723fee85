//! Defaults for paths, addresses and environment variable names.

/// Snapshot file of the in-memory store
pub const DEFAULT_STORE_PATH: &str = "data/store.json";

/// Bind address of the metrics server
pub const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";

pub const DEFAULT_LOG_DIR: &str = "logs/";

pub const LOG_FILE_PREFIX: &str = "explorer-monitor.log";

/// Timeout of a single provider request
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
