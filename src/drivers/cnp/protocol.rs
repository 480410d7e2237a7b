use std::sync::RwLock;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::domain::errors::CnpError;
use crate::domain::protocol::{CnpProtocol, PayProtocol};
use crate::domain::transaction::TransactionResponse;
use crate::drivers::cnp::soap::{RETURN_KEY, SoapClient};
use crate::infrastructure::config::settings::CnpSettings;

pub const START_TRANSACTION: &str = "startTransaction";
pub const GET_TRANSACTION_STATUS: &str = "getTransactionStatusCode";
pub const COMPLETE_TRANSACTION: &str = "completeTransaction";

/// SOAP wrapper around the CNP merchant web service.
pub struct CnpSoapProtocol {
	soap:        SoapClient,
	merchant_id: String,
	terminal_id: String,
	payment_id:  RwLock<Option<String>>,
}

impl CnpSoapProtocol {
	pub fn new(http_client: Client, settings: &CnpSettings) -> Self {
		Self {
			soap:        SoapClient::new(
				http_client,
				&settings.url,
				settings.namespace.clone(),
				settings.force_https,
			),
			merchant_id: settings.merchant_id.clone(),
			terminal_id: settings.terminal_id.clone(),
			payment_id:  RwLock::new(None),
		}
	}

	pub fn payment_gate_url(&self) -> &str {
		self.soap.endpoint()
	}

	pub fn merchant_id(&self) -> &str {
		&self.merchant_id
	}

	pub fn terminal_id(&self) -> &str {
		&self.terminal_id
	}

	pub fn prepare_params(
		&self,
		params: Map<String, Value>,
	) -> Result<Map<String, Value>, CnpError> {
		let now = OffsetDateTime::now_local()
			.unwrap_or_else(|_| OffsetDateTime::now_utc());
		self.prepare_params_at(params, now)
	}

	/// Puts the merchant access parameters in front of `params`. Keys present
	/// in both keep their leading position but take the caller's value.
	pub fn prepare_params_at(
		&self,
		params: Map<String, Value>,
		now: OffsetDateTime,
	) -> Result<Map<String, Value>, CnpError> {
		let local_date_time = now
			.format(format_description!(
				"[day].[month].[year] [hour]:[minute]:[second]"
			))
			.map_err(|e| CnpError::encoding(e.to_string()))?;

		let mut prepared = Map::new();
		prepared.insert("merchantId".to_string(), Value::from(self.merchant_id.as_str()));
		prepared.insert(
			"merchantLocalDateTime".to_string(),
			Value::from(local_date_time),
		);
		if !self.terminal_id.is_empty() {
			prepared.insert("terminalId".to_string(), Value::from(self.terminal_id.as_str()));
		}

		prepared.extend(params);

		Ok(prepared)
	}

	fn reference_params(&self, id: &str) -> Map<String, Value> {
		let mut params = Map::new();
		params.insert("merchantId".to_string(), Value::from(self.merchant_id.as_str()));
		params.insert("referenceNr".to_string(), Value::from(id));
		params
	}

	fn remember_payment_id(&self, reference: Option<String>) {
		if let Ok(mut payment_id) = self.payment_id.write() {
			*payment_id = reference;
		}
	}
}

#[async_trait]
impl PayProtocol for CnpSoapProtocol {
	async fn get_payment_url(
		&self,
		params: Map<String, Value>,
	) -> Result<String, CnpError> {
		let params = self.prepare_params(params)?;

		let mut request = Map::new();
		request.insert("transaction".to_string(), Value::Object(params));

		let response = self.soap.call(START_TRANSACTION, &request).await?;

		if response.get("success") == Some("false") {
			warn!(
				"CNP refused to start the transaction: {}",
				response.param("errorDescription", "no description")
			);
			self.remember_payment_id(None);
			return Ok(String::new());
		}

		match (response.get("redirectURL"), response.get("customerReference")) {
			(Some(url), Some(reference)) if !url.is_empty() && !reference.is_empty() => {
				debug!("CNP transaction {reference} started");
				self.remember_payment_id(Some(reference.to_string()));
				Ok(url.to_string())
			}
			_ => {
				warn!("CNP start transaction response lacks a redirect URL or reference");
				self.remember_payment_id(None);
				Ok(String::new())
			}
		}
	}

	fn validate(&self, _params: &Map<String, Value>) -> bool {
		true
	}

	fn get_payment_id(&self) -> String {
		self.payment_id
			.read()
			.ok()
			.and_then(|payment_id| payment_id.clone())
			.unwrap_or_default()
	}

	fn get_notification_response(
		&self,
		_request_data: &TransactionResponse,
		_error_code: Option<i64>,
	) -> String {
		String::new()
	}
}

#[async_trait]
impl CnpProtocol for CnpSoapProtocol {
	async fn get_transaction_status(&self, id: &str) -> Result<String, CnpError> {
		let response = self
			.soap
			.call(GET_TRANSACTION_STATUS, &self.reference_params(id))
			.await?;

		Ok(response.param("transactionStatus", ""))
	}

	async fn approve_transaction(&self, id: &str) -> Result<bool, CnpError> {
		let mut params = self.reference_params(id);
		params.insert("transactionSuccess".to_string(), Value::Bool(true));

		let response = self.soap.call(COMPLETE_TRANSACTION, &params).await?;

		Ok(response.param(RETURN_KEY, "").eq_ignore_ascii_case("true"))
	}
}
