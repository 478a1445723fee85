//! Prometheus scrape endpoint.

use actix_web::{
	dev::Server,
	middleware::{Compress, NormalizePath},
	web, App, HttpResponse, HttpServer, Responder,
};
use tracing::{error, info};

use crate::utils::{constants::DEFAULT_METRICS_ADDRESS, metrics::gather_metrics};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

async fn metrics_handler() -> impl Responder {
	match gather_metrics() {
		Ok(buffer) => HttpResponse::Ok()
			.content_type(PROMETHEUS_CONTENT_TYPE)
			.body(buffer),
		Err(e) => {
			error!(error = %e, "failed to encode metrics");
			HttpResponse::InternalServerError().finish()
		}
	}
}

/// Address the scrape endpoint listens on.
///
/// In a container (`in_docker`) it binds every interface on `metrics_port`,
/// or on the port of the requested address. Elsewhere the requested address
/// is used as is.
pub fn metrics_bind_address(
	requested: Option<&str>,
	in_docker: bool,
	metrics_port: Option<&str>,
) -> String {
	let requested = requested.unwrap_or(DEFAULT_METRICS_ADDRESS);
	if !in_docker {
		return requested.to_string();
	}

	let port = metrics_port
		.filter(|port| !port.is_empty())
		.or_else(|| requested.rsplit_once(':').map(|(_, port)| port))
		.unwrap_or("8081");
	format!("0.0.0.0:{}", port)
}

pub fn create_metrics_server(bind_address: &str) -> std::io::Result<Server> {
	info!(address = bind_address, "starting metrics server");

	let server = HttpServer::new(|| {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.route("/metrics", web::get().to(metrics_handler))
	})
	.workers(1)
	.bind(bind_address)?
	.shutdown_timeout(5)
	.run();

	Ok(server)
}
