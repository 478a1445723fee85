//! Utility modules for common functionality.
//!
//! - constants: Defaults shared by the binary and bootstrap
//! - http: Retryable HTTP client construction
//! - logging: Logging setup
//! - metrics: Prometheus registry and metrics server
//! - retry: Fixed-delay retry for provider checks

pub mod constants;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod retry;
pub mod tests;

pub use constants::*;
pub use retry::{MaybeEmpty, RetryOutcome, RetryPolicy};
