use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{info, warn};
use serde_json::{Map, Value};

use crate::adapters::web::errors::ApiError;
use crate::domain::pay_service::PayService;
use crate::domain::protocol::CnpProtocol;
use crate::drivers::cnp::driver::CnpDriver;
use crate::drivers::cnp::provider::CnpProvider;

#[post("/notifications")]
pub async fn notifications(
	form: web::Form<HashMap<String, String>>,
	provider: web::Data<CnpProvider>,
) -> impl Responder {
	let mut driver = provider.driver();

	match accept(&mut driver, form.into_inner()) {
		Ok(()) => HttpResponse::Ok().body(driver.get_notification_response(None)),
		Err(e) => e.error_response(),
	}
}

#[post("/check")]
pub async fn check(
	form: web::Form<HashMap<String, String>>,
	provider: web::Data<CnpProvider>,
) -> impl Responder {
	let mut driver = provider.driver();

	match accept(&mut driver, form.into_inner()) {
		Ok(()) => HttpResponse::Ok().body(driver.get_check_response(None)),
		Err(e) => e.error_response(),
	}
}

fn accept<P: CnpProtocol>(
	driver: &mut CnpDriver<P>,
	fields: HashMap<String, String>,
) -> Result<(), ApiError> {
	let data: Map<String, Value> = fields
		.iter()
		.map(|(name, value)| (name.clone(), Value::from(value.as_str())))
		.collect();

	if !driver.validate(&data) {
		warn!("Rejected gateway notification that failed validation");
		return Err(ApiError::BadClientDataError);
	}

	driver.set_response(fields.into());

	info!(
		"Gateway notification for order '{}': transaction '{}', status {}",
		driver.get_order_id(),
		driver.get_transaction_id(),
		driver.get_status()
	);

	Ok(())
}
