//! Normalized access to third-party blockchain data providers.
//!
//! - `api`: Raw provider client interface
//! - `parser`: Response validation and parsing contract
//! - `http`: Template-driven HTTP provider client
//! - `adapter`: Per-network explorer with priority fallback
//! - `aggregation`: Network-type aware transfer aggregation
//! - `registry`: Adapter lookup by `explorer_interface`

mod adapter;
mod aggregation;
mod api;
mod error;
mod http;
mod parser;
mod registry;

pub use adapter::{ExplorerAdapter, ExplorerConfig, NetworkExplorer};
pub use aggregation::aggregate_transfers;
pub use api::ProviderApi;
pub use error::ExplorerError;
pub use http::HttpProviderApi;
pub use parser::{NormalizedJsonParser, NormalizedJsonValidator, ResponseParser, ResponseValidator};
pub use registry::AdapterRegistry;
