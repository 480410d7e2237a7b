use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::errors::CnpError;
use crate::domain::payment::PaymentRequest;
use crate::domain::transaction::TransactionResponse;

/// Contract every payment driver exposes to host code: create a payment,
/// inspect the notification that comes back, answer the gateway.
#[async_trait]
pub trait PayService: Send + Sync {
	async fn get_payment_link(
		&self,
		request: PaymentRequest,
	) -> Result<String, CnpError>;

	async fn get_payment_form(
		&self,
		request: PaymentRequest,
	) -> Result<String, CnpError>;

	/// Whether the payment has to be started with a form instead of a
	/// redirect link.
	fn need_form(&self) -> bool;

	fn validate(&self, data: &Map<String, Value>) -> bool;

	fn set_response(&mut self, data: TransactionResponse);

	fn get_response_param(&self, name: &str, default: &str) -> String;

	fn get_param(&self, name: &str) -> String {
		self.get_response_param(name, "")
	}

	fn get_order_id(&self) -> String;

	fn get_status(&self) -> String {
		if self.is_success() {
			"success".to_string()
		} else {
			"failed".to_string()
		}
	}

	fn is_success(&self) -> bool {
		self.get_error_code() == 0
	}

	fn get_transaction_id(&self) -> String;

	fn get_amount(&self) -> f64;

	fn get_error_code(&self) -> i64;

	fn get_last_error(&self) -> i64;

	fn get_provider(&self) -> &'static str;

	fn get_name(&self) -> &'static str;

	fn get_pan(&self) -> String;

	fn get_date_time(&self) -> String;

	fn get_payment_id(&self) -> String;

	fn get_notification_response(&self, error_code: Option<i64>) -> String;

	fn get_check_response(&self, error_code: Option<i64>) -> String;
}
