use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Gateway statuses after which a transaction may be completed.
pub const APPROVABLE_STATUSES: [&str; 2] = ["PAID", "AUTHORISED"];

pub fn is_approvable(status: &str) -> bool {
	APPROVABLE_STATUSES.contains(&status)
}

/// Flat bag of fields returned by the gateway or posted in a notification.
/// Nothing is validated; readers ask for a key and get a default back when it
/// is missing.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct TransactionResponse(HashMap<String, String>);

impl TransactionResponse {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn param(&self, name: &str, default: &str) -> String {
		self.0
			.get(name)
			.cloned()
			.unwrap_or_else(|| default.to_string())
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.insert(name.into(), value.into());
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<HashMap<String, String>> for TransactionResponse {
	fn from(fields: HashMap<String, String>) -> Self {
		Self(fields)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransactionResponse {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}
