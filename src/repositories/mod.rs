//! Configuration-backed catalogues of networks and providers.

mod error;
mod network;
mod provider;

pub use error::RepositoryError;
pub use network::{NetworkRepository, NetworkRepositoryTrait, NetworkService};
pub use provider::{ProviderRepository, ProviderRepositoryTrait, ProviderService};
