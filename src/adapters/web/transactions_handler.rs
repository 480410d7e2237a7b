use actix_web::{HttpResponse, Responder, ResponseError, get, post, web};
use log::{info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{ApprovalResponse, TransactionStatusResponse};
use crate::domain::cnp_service::CnpService;
use crate::drivers::cnp::provider::CnpProvider;

#[get("/transactions/{id}/status")]
pub async fn transaction_status(
	path: web::Path<String>,
	provider: web::Data<CnpProvider>,
) -> impl Responder {
	let transaction_id = path.into_inner();

	match provider.driver().get_transaction_status(&transaction_id).await {
		Ok(status) => HttpResponse::Ok().json(TransactionStatusResponse {
			transaction_id,
			status,
		}),
		Err(e) => {
			warn!("Error reading status of transaction {transaction_id}: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[post("/transactions/{id}/approve")]
pub async fn approve_transaction(
	path: web::Path<String>,
	provider: web::Data<CnpProvider>,
) -> impl Responder {
	let transaction_id = path.into_inner();

	match provider.driver().approve_transaction(&transaction_id).await {
		Ok(approved) => {
			info!("Transaction {transaction_id} approval result: {approved}");
			HttpResponse::Ok().json(ApprovalResponse {
				transaction_id,
				approved,
			})
		}
		Err(e) => {
			warn!("Error approving transaction {transaction_id}: {e}");
			ApiError::from(e).error_response()
		}
	}
}
