use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::errors::CnpError;
use crate::domain::transaction::TransactionResponse;

#[async_trait]
pub trait PayProtocol: Send + Sync {
	async fn get_payment_url(
		&self,
		params: Map<String, Value>,
	) -> Result<String, CnpError>;

	fn validate(&self, params: &Map<String, Value>) -> bool;

	fn get_payment_id(&self) -> String;

	fn get_notification_response(
		&self,
		request_data: &TransactionResponse,
		error_code: Option<i64>,
	) -> String;

	fn get_check_response(
		&self,
		request_data: &TransactionResponse,
		error_code: Option<i64>,
	) -> String {
		self.get_notification_response(request_data, error_code)
	}
}

#[async_trait]
pub trait CnpProtocol: PayProtocol {
	async fn get_transaction_status(&self, id: &str) -> Result<String, CnpError>;

	async fn approve_transaction(&self, id: &str) -> Result<bool, CnpError>;
}
