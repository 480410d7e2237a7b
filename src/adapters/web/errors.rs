use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::errors::CnpError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Could not connect to the payment gateway.")]
	GatewayUnavailableError,
	#[display("Could not perform this operation.")]
	TransactionError,
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::GatewayUnavailableError => "Bad Gateway".to_string(),
			ApiError::TransactionError => "Unprocessable Entity".to_string(),
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::GatewayUnavailableError => StatusCode::BAD_GATEWAY,
			ApiError::TransactionError => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<CnpError> for ApiError {
	fn from(err: CnpError) -> Self {
		match err {
			CnpError::Transport { .. } | CnpError::MalformedResponse { .. } => {
				ApiError::GatewayUnavailableError
			}
			CnpError::Fault { .. } | CnpError::Unsupported { .. } => {
				ApiError::TransactionError
			}
			CnpError::Encoding { .. } => ApiError::InternalServerError,
		}
	}
}
