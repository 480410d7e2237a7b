use serde::Deserialize;

pub const DEFAULT_CNP_NAMESPACE: &str = "http://kz.processing.cnp.merchant_ws/xsd";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	#[serde(default = "default_server_host")]
	pub server_host:      String,
	#[serde(default = "default_server_port")]
	pub server_port:      u16,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive: u64,
	pub cnp:              CnpSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CnpSettings {
	pub url:                  String,
	pub merchant_id:          String,
	#[serde(default)]
	pub terminal_id:          String,
	#[serde(default = "default_namespace")]
	pub namespace:            String,
	#[serde(default = "default_connect_timeout_secs")]
	pub connect_timeout_secs: u64,
	#[serde(default = "default_force_https")]
	pub force_https:          bool,
}

impl CnpSettings {
	pub fn new(
		url: impl Into<String>,
		merchant_id: impl Into<String>,
		terminal_id: impl Into<String>,
	) -> Self {
		Self {
			url:                  url.into(),
			merchant_id:          merchant_id.into(),
			terminal_id:          terminal_id.into(),
			namespace:            default_namespace(),
			connect_timeout_secs: default_connect_timeout_secs(),
			force_https:          default_force_https(),
		}
	}
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(
				config::Environment::with_prefix("APP")
					.prefix_separator("_")
					.separator("__"),
			)
			.build()?;

		config_builder.try_deserialize()
	}
}

fn default_server_host() -> String {
	"0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
	9999
}

fn default_server_keepalive() -> u64 {
	75
}

fn default_namespace() -> String {
	DEFAULT_CNP_NAMESPACE.to_string()
}

fn default_connect_timeout_secs() -> u64 {
	10
}

fn default_force_https() -> bool {
	true
}
