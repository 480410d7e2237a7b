use std::time::Duration;

use reqwest::Client;

use crate::domain::cnp_service::PAYMENT_CNP;
use crate::domain::errors::CnpError;
use crate::drivers::cnp::driver::CnpDriver;
use crate::drivers::cnp::protocol::CnpSoapProtocol;
use crate::infrastructure::config::settings::CnpSettings;

/// Builds CNP drivers from configuration. One driver per request, all of them
/// sharing the same HTTP client.
#[derive(Clone)]
pub struct CnpProvider {
	settings:    CnpSettings,
	http_client: Client,
}

impl CnpProvider {
	pub fn new(settings: CnpSettings) -> Result<Self, CnpError> {
		let http_client = Client::builder()
			.connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
			.build()?;

		Ok(Self {
			settings,
			http_client,
		})
	}

	pub fn name(&self) -> &'static str {
		PAYMENT_CNP
	}

	pub fn settings(&self) -> &CnpSettings {
		&self.settings
	}

	pub fn driver(&self) -> CnpDriver<CnpSoapProtocol> {
		CnpDriver::new(
			self.settings.clone(),
			CnpSoapProtocol::new(self.http_client.clone(), &self.settings),
		)
	}
}
