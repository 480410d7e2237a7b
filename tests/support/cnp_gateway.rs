#![allow(dead_code)]

use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use cnp_payment::infrastructure::config::settings::CnpSettings;

pub const MERCHANT_ID: &str = "000000000000001";
pub const TERMINAL_ID: &str = "88888881";

/// A SOAP call received by the fake gateway.
#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub operation:   String,
	pub soap_action: String,
	pub body:        String,
}

struct GatewayState {
	responses: Vec<(&'static str, u16, String)>,
	calls:     Mutex<Vec<RecordedCall>>,
}

/// In-process stand-in for the CNP merchant web service, answering each
/// operation with a canned envelope.
pub struct FakeCnpGateway {
	pub url: String,
	state:   web::Data<GatewayState>,
	handle:  ServerHandle,
}

impl FakeCnpGateway {
	pub fn settings(&self) -> CnpSettings {
		CnpSettings {
			force_https: false,
			..CnpSettings::new(self.url.clone(), MERCHANT_ID, TERMINAL_ID)
		}
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.state.calls.lock().unwrap().clone()
	}

	pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
		self.calls()
			.into_iter()
			.filter(|call| call.operation == operation)
			.collect()
	}

	pub async fn stop(&self) {
		self.handle.stop(false).await;
	}
}

pub async fn start_gateway(
	responses: Vec<(&'static str, u16, String)>,
) -> FakeCnpGateway {
	let state = web::Data::new(GatewayState {
		responses,
		calls: Mutex::new(Vec::new()),
	});

	let app_state = state.clone();
	let server = HttpServer::new(move || {
		App::new()
			.app_data(app_state.clone())
			.default_service(web::to(soap_endpoint))
	})
	.workers(1)
	.bind(("127.0.0.1", 0))
	.unwrap();

	let addr = server.addrs()[0];
	let server = server.run();
	let handle = server.handle();
	actix_web::rt::spawn(server);

	FakeCnpGateway {
		url: format!("http://{addr}/CNPMerchantWebServices/services/CNPMerchantWebService"),
		state,
		handle,
	}
}

async fn soap_endpoint(
	req: HttpRequest,
	body: String,
	state: web::Data<GatewayState>,
) -> HttpResponse {
	let soap_action = req
		.headers()
		.get("SOAPAction")
		.and_then(|value| value.to_str().ok())
		.unwrap_or_default()
		.to_string();

	let matched = state
		.responses
		.iter()
		.find(|(operation, _, _)| body.contains(&format!("<{operation} ")));

	let operation = matched
		.map(|(operation, _, _)| operation.to_string())
		.unwrap_or_default();

	state.calls.lock().unwrap().push(RecordedCall {
		operation,
		soap_action,
		body: body.clone(),
	});

	match matched {
		Some((_, status, envelope)) => HttpResponse::build(
			actix_web::http::StatusCode::from_u16(*status).unwrap(),
		)
		.content_type("text/xml; charset=utf-8")
		.body(envelope.clone()),
		None => HttpResponse::NotFound().finish(),
	}
}

fn envelope(content: &str) -> String {
	format!(
		r#"<?xml version="1.0" encoding="UTF-8"?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body>{content}</soapenv:Body></soapenv:Envelope>"#
	)
}

pub fn start_transaction_ok(redirect_url: &str, reference: &str) -> (&'static str, u16, String) {
	(
		"startTransaction",
		200,
		envelope(&format!(
			r#"<ns:startTransactionResponse xmlns:ns="http://kz.processing.cnp.merchant_ws/xsd"><ns:return><ns:customerReference>{reference}</ns:customerReference><ns:errorDescription/><ns:redirectURL>{redirect_url}</ns:redirectURL><ns:success>true</ns:success></ns:return></ns:startTransactionResponse>"#
		)),
	)
}

pub fn start_transaction_refused(description: &str) -> (&'static str, u16, String) {
	(
		"startTransaction",
		200,
		envelope(&format!(
			r#"<ns:startTransactionResponse xmlns:ns="http://kz.processing.cnp.merchant_ws/xsd"><ns:return><ns:errorDescription>{description}</ns:errorDescription><ns:success>false</ns:success></ns:return></ns:startTransactionResponse>"#
		)),
	)
}

pub fn start_transaction_without_reference(
	redirect_url: &str,
) -> (&'static str, u16, String) {
	(
		"startTransaction",
		200,
		envelope(&format!(
			r#"<ns:startTransactionResponse xmlns:ns="http://kz.processing.cnp.merchant_ws/xsd"><ns:return><ns:errorDescription/><ns:redirectURL>{redirect_url}</ns:redirectURL><ns:success>true</ns:success></ns:return></ns:startTransactionResponse>"#
		)),
	)
}

pub fn transaction_status(status: &str) -> (&'static str, u16, String) {
	(
		"getTransactionStatusCode",
		200,
		envelope(&format!(
			r#"<ns:getTransactionStatusCodeResponse xmlns:ns="http://kz.processing.cnp.merchant_ws/xsd"><ns:return><ns:transactionStatus>{status}</ns:transactionStatus></ns:return></ns:getTransactionStatusCodeResponse>"#
		)),
	)
}

pub fn complete_transaction(result: bool) -> (&'static str, u16, String) {
	(
		"completeTransaction",
		200,
		envelope(&format!(
			r#"<ns:completeTransactionResponse xmlns:ns="http://kz.processing.cnp.merchant_ws/xsd"><ns:return>{result}</ns:return></ns:completeTransactionResponse>"#
		)),
	)
}

pub fn fault(operation: &'static str, message: &str) -> (&'static str, u16, String) {
	(
		operation,
		500,
		envelope(&format!(
			"<soapenv:Fault><faultcode>soapenv:Server</faultcode><faultstring>{message}</faultstring></soapenv:Fault>"
		)),
	)
}
