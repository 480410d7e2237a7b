use std::sync::Arc;

use cnp_payment::infrastructure::config::settings::Config;
use cnp_payment::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Arc::new(Config::load().map_err(|e| {
		std::io::Error::other(format!("Failed to load configuration: {e}"))
	})?);
	run(config).await
}
