use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentLinkResponse {
	pub url:        String,
	#[serde(rename = "paymentId")]
	pub payment_id: String,
	pub provider:   String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransactionStatusResponse {
	#[serde(rename = "transactionId")]
	pub transaction_id: String,
	pub status:         String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApprovalResponse {
	#[serde(rename = "transactionId")]
	pub transaction_id: String,
	pub approved:       bool,
}
