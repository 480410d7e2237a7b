use derive_more::derive::{Display, Error};

#[derive(Debug, Display, Error, PartialEq)]
pub enum CnpError {
	#[display("Could not reach the CNP gateway: {message}")]
	Transport { message: String },
	#[display("CNP gateway fault {code}: {message}")]
	Fault { code: String, message: String },
	#[display("CNP gateway sent an unreadable response: {message}")]
	MalformedResponse { message: String },
	#[display("Could not encode the CNP request: {message}")]
	Encoding { message: String },
	#[display("Operation '{operation}' is not supported by the CNP driver.")]
	Unsupported { operation: &'static str },
}

impl CnpError {
	pub fn transport(message: impl Into<String>) -> Self {
		CnpError::Transport {
			message: message.into(),
		}
	}

	pub fn malformed(message: impl Into<String>) -> Self {
		CnpError::MalformedResponse {
			message: message.into(),
		}
	}

	pub fn encoding(message: impl Into<String>) -> Self {
		CnpError::Encoding {
			message: message.into(),
		}
	}
}

impl From<reqwest::Error> for CnpError {
	fn from(err: reqwest::Error) -> Self {
		CnpError::transport(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fault_display() {
		let error = CnpError::Fault {
			code:    "soapenv:Server".to_string(),
			message: "Merchant not found".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"CNP gateway fault soapenv:Server: Merchant not found"
		);
	}

	#[test]
	fn test_unsupported_display() {
		let error = CnpError::Unsupported {
			operation: "payment form",
		};
		assert_eq!(
			error.to_string(),
			"Operation 'payment form' is not supported by the CNP driver."
		);
	}
}
