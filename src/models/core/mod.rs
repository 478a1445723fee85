//! Core domain models of the explorer.
//!
//! - Networks and providers: configuration-driven reference data
//! - Transfers: provider records and their stored, normalized form
//! - Status: health verdicts and retention watermarks

mod network;
mod provider;
mod retention;
mod status;
mod transfer;

pub use network::{HealthCheckSchedule, Network, NetworkType, TokenContract};
pub use provider::{DefaultProviderAssignment, Operation, Provider, ProviderEndpoints};
pub use retention::RetentionConfig;
pub use status::{BlockStats, HealthStatus, ProviderStatus};
pub use transfer::{Balance, ComparableTransfer, Transfer, TransferKey, TransferTx};
