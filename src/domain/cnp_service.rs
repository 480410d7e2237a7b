use async_trait::async_trait;

use crate::domain::errors::CnpError;

/// Registration key of the CNP driver.
pub const PAYMENT_CNP: &str = "cnp";

#[async_trait]
pub trait CnpService: Send + Sync {
	/// Completes a transaction at the gateway once it has been paid.
	async fn approve_transaction(&self, id: &str) -> Result<bool, CnpError>;

	async fn get_transaction_status(&self, id: &str) -> Result<String, CnpError>;
}
