//! Provider health monitoring and block-transfer retention for a multi-chain
//! explorer backend.
//!
//! Networks and providers are loaded from JSON configuration. Every provider
//! of a network is reached through a normalized [`services::explorer`]
//! adapter; the [`services::health`] checker compares alternative providers
//! against the default one and the [`services::retention`] cron keeps the
//! stored block transfers within their retention window.

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
