use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;

use crate::drivers::cnp::provider::CnpProvider;
use crate::infrastructure::config::settings::Config;

pub mod adapters {
	pub mod web {
		pub mod errors;
		pub mod notifications_handler;
		pub mod payments_handler;
		pub mod schema;
		pub mod transactions_handler;
	}
}

pub mod domain {
	pub mod cnp_service;
	pub mod errors;
	pub mod pay_service;
	pub mod payment;
	pub mod protocol;
	pub mod transaction;
}

pub mod drivers {
	pub mod cnp {
		pub mod driver;
		pub mod protocol;
		pub mod provider;
		pub mod soap;
	}
}

pub mod infrastructure {
	pub mod config {
		pub mod settings;
	}
}

/// Registers every route of the payment host on an actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(adapters::web::payments_handler::payments)
		.service(adapters::web::notifications_handler::notifications)
		.service(adapters::web::notifications_handler::check)
		.service(adapters::web::transactions_handler::transaction_status)
		.service(adapters::web::transactions_handler::approve_transaction);
}

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let _ = env_logger::try_init();

	let provider = CnpProvider::new(config.cnp.clone())
		.map_err(|e| std::io::Error::other(e.to_string()))?;

	info!(
		"Serving the '{}' payment driver against {}",
		provider.name(),
		config.cnp.url
	);

	info!(
		"Starting Actix-Web server on {}:{}...",
		config.server_host, config.server_port
	);
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(provider.clone()))
			.configure(configure)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind((config.server_host.as_str(), config.server_port))?
	.run()
	.await
}
