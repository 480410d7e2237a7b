use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

pub const CURRENCY_KZT_ISO: &str = "398";
pub const PAYMENT_TYPE_CARD: &str = "card";

/// Converts a major-unit amount into the integer minor units the gateway
/// expects.
pub fn to_minor_units(amount: f64) -> i64 {
	(amount * 100.0).round() as i64
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
	#[serde(deserialize_with = "string_or_number")]
	pub order_id:           String,
	#[serde(default)]
	pub payment_id:         String,
	pub amount:             f64,
	#[serde(default = "default_currency")]
	pub currency:           String,
	#[serde(default = "default_payment_type")]
	pub payment_type:       String,
	#[serde(default)]
	pub success_return_url: String,
	#[serde(default)]
	pub fail_return_url:    String,
	#[serde(default)]
	pub description:        String,
	#[serde(default)]
	pub extra_params:       ExtraParams,
}

impl PaymentRequest {
	pub fn new(order_id: impl Into<String>, amount: f64) -> Self {
		Self {
			order_id: order_id.into(),
			payment_id: String::new(),
			amount,
			currency: default_currency(),
			payment_type: default_payment_type(),
			success_return_url: String::new(),
			fail_return_url: String::new(),
			description: String::new(),
			extra_params: ExtraParams::default(),
		}
	}
}

/// Optional parameters of a payment. `locale` and `products` have a fixed
/// meaning, everything else is passed through to the gateway untouched.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ExtraParams {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale:     Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub products:   Option<Vec<Product>>,
	#[serde(flatten)]
	pub additional: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Product {
	#[serde(deserialize_with = "string_or_number")]
	pub id:    String,
	pub name:  String,
	pub price: f64,
}

/// Order and product ids arrive either as JSON strings or as integers; both
/// end up as their decimal text.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Id {
		Text(String),
		Number(Number),
	}

	Ok(match Id::deserialize(deserializer)? {
		Id::Text(text) => text,
		Id::Number(number) => number.to_string(),
	})
}

fn default_currency() -> String {
	CURRENCY_KZT_ISO.to_string()
}

fn default_payment_type() -> String {
	PAYMENT_TYPE_CARD.to_string()
}
