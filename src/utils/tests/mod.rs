//! Test helper utilities
//!
//! - `builders`: Builders for test instances of models
//! - `create_test_http_client`: HTTP client without retries

use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;

pub mod builders {
	pub mod network;
	pub mod provider;
	pub mod transfer;
}

pub use builders::{network::*, provider::*, transfer::*};

/// Plain client wrapped in middleware so it fits every HTTP-backed service
pub fn create_test_http_client() -> Arc<ClientWithMiddleware> {
	Arc::new(reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build())
}
