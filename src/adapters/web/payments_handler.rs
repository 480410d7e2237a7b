use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentLinkResponse;
use crate::domain::pay_service::PayService;
use crate::domain::payment::PaymentRequest;
use crate::domain::protocol::PayProtocol;
use crate::drivers::cnp::provider::CnpProvider;

#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentRequest>,
	provider: web::Data<CnpProvider>,
) -> impl Responder {
	let driver = provider.driver();
	let order_id = payload.order_id.clone();

	match driver.get_payment_link(payload.into_inner()).await {
		Ok(url) if url.is_empty() => {
			warn!("Gateway issued no payment link for order {order_id}");
			ApiError::TransactionError.error_response()
		}
		Ok(url) => {
			info!("Payment link created for order {order_id}");
			HttpResponse::Ok().json(PaymentLinkResponse {
				url,
				payment_id: driver.transport().get_payment_id(),
				provider: driver.get_provider().to_string(),
			})
		}
		Err(e) => {
			warn!("Error creating payment link for order {order_id}: {e}");
			ApiError::from(e).error_response()
		}
	}
}
