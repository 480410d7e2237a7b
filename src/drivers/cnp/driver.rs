use async_trait::async_trait;
use log::{info, warn};
use serde_json::{Map, Value};

use crate::domain::cnp_service::{CnpService, PAYMENT_CNP};
use crate::domain::errors::CnpError;
use crate::domain::pay_service::PayService;
use crate::domain::payment::{PaymentRequest, Product, to_minor_units};
use crate::domain::protocol::CnpProtocol;
use crate::domain::transaction::{TransactionResponse, is_approvable};
use crate::infrastructure::config::settings::CnpSettings;

/// Payment service backed by the CNP gateway: pay, check, approve.
pub struct CnpDriver<P: CnpProtocol> {
	transport: P,
	config:    CnpSettings,
	response:  TransactionResponse,
}

impl<P: CnpProtocol> CnpDriver<P> {
	pub fn new(config: CnpSettings, transport: P) -> Self {
		Self {
			transport,
			config,
			response: TransactionResponse::new(),
		}
	}

	pub fn get_config(&self) -> &CnpSettings {
		&self.config
	}

	pub fn transport(&self) -> &P {
		&self.transport
	}

	pub fn response(&self) -> &TransactionResponse {
		&self.response
	}
}

/// Maps a payment request onto the fields of a CNP transaction.
pub fn build_payment_params(request: &PaymentRequest) -> Map<String, Value> {
	let extra = &request.extra_params;

	let mut params = Map::new();
	params.insert("orderId".to_string(), Value::from(request.order_id.as_str()));
	params.insert(
		"currencyCode".to_string(),
		Value::from(request.currency.as_str()),
	);
	params.insert(
		"totalAmount".to_string(),
		Value::from(to_minor_units(request.amount)),
	);
	params.insert(
		"Description".to_string(),
		Value::from(request.description.as_str()),
	);
	params.insert(
		"merchantAdditionalInformationList".to_string(),
		Value::Object(extra.additional.clone()),
	);
	params.insert(
		"returnURL".to_string(),
		Value::from(request.success_return_url.as_str()),
	);

	if let Some(locale) = &extra.locale {
		params.insert("languageCode".to_string(), Value::from(locale.as_str()));
	}

	if let Some(products) = &extra.products {
		let goods = products
			.iter()
			.map(|product| goods_item(product, &request.currency))
			.collect();
		params.insert("goodsList".to_string(), Value::Array(goods));
	}

	params
}

fn goods_item(product: &Product, currency: &str) -> Value {
	let mut item = Map::new();
	item.insert("merchantsGoodsID".to_string(), Value::from(product.id.as_str()));
	item.insert("nameOfGoods".to_string(), Value::from(product.name.as_str()));
	item.insert("amount".to_string(), Value::from(to_minor_units(product.price)));
	item.insert("currencyCode".to_string(), Value::from(currency));
	Value::Object(item)
}

#[async_trait]
impl<P: CnpProtocol> PayService for CnpDriver<P> {
	async fn get_payment_link(
		&self,
		request: PaymentRequest,
	) -> Result<String, CnpError> {
		let params = build_payment_params(&request);
		let url = self.transport.get_payment_url(params).await?;

		if url.is_empty() {
			warn!("No payment link issued for order {}", request.order_id);
		} else {
			info!("Payment link issued for order {}", request.order_id);
		}

		Ok(url)
	}

	async fn get_payment_form(
		&self,
		_request: PaymentRequest,
	) -> Result<String, CnpError> {
		Err(CnpError::Unsupported {
			operation: "payment form",
		})
	}

	fn need_form(&self) -> bool {
		false
	}

	fn validate(&self, data: &Map<String, Value>) -> bool {
		self.transport.validate(data)
	}

	fn set_response(&mut self, data: TransactionResponse) {
		self.response = data;
	}

	fn get_response_param(&self, name: &str, default: &str) -> String {
		self.response.param(name, default)
	}

	fn get_order_id(&self) -> String {
		self.get_response_param("OrderID", "")
	}

	fn get_transaction_id(&self) -> String {
		self.get_response_param("Rrn", "")
	}

	fn get_amount(&self) -> f64 {
		self.get_response_param("TotalAmount", "")
			.trim()
			.parse()
			.unwrap_or(0.0)
	}

	fn get_error_code(&self) -> i64 {
		self.get_response_param("TranCode", "0")
			.trim()
			.parse()
			.unwrap_or(0)
	}

	fn get_last_error(&self) -> i64 {
		0
	}

	fn get_provider(&self) -> &'static str {
		PAYMENT_CNP
	}

	fn get_name(&self) -> &'static str {
		PAYMENT_CNP
	}

	fn get_pan(&self) -> String {
		self.get_response_param("ProxyPan", "")
	}

	fn get_date_time(&self) -> String {
		String::new()
	}

	fn get_payment_id(&self) -> String {
		self.get_response_param("SD", "")
	}

	fn get_notification_response(&self, error_code: Option<i64>) -> String {
		self.transport
			.get_notification_response(&self.response, error_code)
	}

	fn get_check_response(&self, error_code: Option<i64>) -> String {
		self.transport.get_check_response(&self.response, error_code)
	}
}

#[async_trait]
impl<P: CnpProtocol> CnpService for CnpDriver<P> {
	async fn approve_transaction(&self, id: &str) -> Result<bool, CnpError> {
		let status = self.transport.get_transaction_status(id).await?;

		if !is_approvable(&status) {
			info!("Transaction {id} not approved, gateway status is '{status}'");
			return Ok(false);
		}

		self.transport.approve_transaction(id).await
	}

	async fn get_transaction_status(&self, id: &str) -> Result<String, CnpError> {
		self.transport.get_transaction_status(id).await
	}
}
