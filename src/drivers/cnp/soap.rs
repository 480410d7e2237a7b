use std::io::Write;

use log::{debug, error};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};

use crate::domain::errors::CnpError;
use crate::domain::transaction::TransactionResponse;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Key under which a scalar `return` value is stored.
pub const RETURN_KEY: &str = "return";

/// Minimal SOAP 1.1 client for the CNP merchant web service.
#[derive(Clone)]
pub struct SoapClient {
	http_client: Client,
	endpoint:    String,
	namespace:   String,
}

impl SoapClient {
	pub fn new(
		http_client: Client,
		url: &str,
		namespace: impl Into<String>,
		force_https: bool,
	) -> Self {
		let endpoint = match url.strip_prefix("http://") {
			Some(rest) if force_https => format!("https://{rest}"),
			_ => url.to_string(),
		};

		Self {
			http_client,
			endpoint,
			namespace: namespace.into(),
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub async fn call(
		&self,
		operation: &str,
		params: &Map<String, Value>,
	) -> Result<TransactionResponse, CnpError> {
		let envelope = encode_envelope(&self.namespace, operation, params)?;

		debug!("Calling CNP operation '{operation}' at {}", self.endpoint);

		let resp = self
			.http_client
			.post(&self.endpoint)
			.header(CONTENT_TYPE, "text/xml; charset=utf-8")
			.header("SOAPAction", format!("\"urn:{operation}\""))
			.body(envelope)
			.send()
			.await
			.map_err(|e| {
				error!("Failed to reach CNP gateway for '{operation}': {e}");
				CnpError::from(e)
			})?;

		let status = resp.status();
		let body = resp.text().await?;

		match decode_response(&body) {
			Err(fault @ CnpError::Fault { .. }) => {
				error!("CNP operation '{operation}' failed: {fault}");
				Err(fault)
			}
			_ if !status.is_success() => {
				error!("CNP gateway answered {status} to '{operation}'");
				Err(CnpError::transport(format!(
					"gateway answered {status} to '{operation}'"
				)))
			}
			result => result,
		}
	}
}

/// Wraps the operation parameters into a SOAP envelope. Objects become child
/// elements, arrays repeat the element of their key, nulls are left out.
pub fn encode_envelope(
	namespace: &str,
	operation: &str,
	params: &Map<String, Value>,
) -> Result<String, CnpError> {
	let mut writer = Writer::new(Vec::new());

	write(
		&mut writer,
		Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
	)?;

	let mut envelope = BytesStart::new("soapenv:Envelope");
	envelope.push_attribute(("xmlns:soapenv", SOAP_ENVELOPE_NS));
	write(&mut writer, Event::Start(envelope))?;
	write(&mut writer, Event::Start(BytesStart::new("soapenv:Body")))?;

	let mut call = BytesStart::new(operation);
	call.push_attribute(("xmlns", namespace));
	write(&mut writer, Event::Start(call))?;
	write_fields(&mut writer, params)?;
	write(&mut writer, Event::End(BytesEnd::new(operation)))?;

	write(&mut writer, Event::End(BytesEnd::new("soapenv:Body")))?;
	write(&mut writer, Event::End(BytesEnd::new("soapenv:Envelope")))?;

	String::from_utf8(writer.into_inner()).map_err(|e| CnpError::encoding(e.to_string()))
}

fn write<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), CnpError> {
	writer
		.write_event(event)
		.map_err(|e| CnpError::encoding(e.to_string()))
}

fn write_fields<W: Write>(
	writer: &mut Writer<W>,
	fields: &Map<String, Value>,
) -> Result<(), CnpError> {
	for (name, value) in fields {
		write_value(writer, name, value)?;
	}
	Ok(())
}

fn write_value<W: Write>(
	writer: &mut Writer<W>,
	name: &str,
	value: &Value,
) -> Result<(), CnpError> {
	match value {
		Value::Null => Ok(()),
		Value::Array(items) => {
			for item in items {
				write_value(writer, name, item)?;
			}
			Ok(())
		}
		Value::Object(fields) => {
			write(writer, Event::Start(BytesStart::new(name)))?;
			write_fields(writer, fields)?;
			write(writer, Event::End(BytesEnd::new(name)))
		}
		Value::String(text) => write_text(writer, name, text),
		scalar => write_text(writer, name, &scalar.to_string()),
	}
}

fn write_text<W: Write>(
	writer: &mut Writer<W>,
	name: &str,
	text: &str,
) -> Result<(), CnpError> {
	write(writer, Event::Start(BytesStart::new(name)))?;
	write(writer, Event::Text(BytesText::new(text)))?;
	write(writer, Event::End(BytesEnd::new(name)))
}

#[derive(Debug, Default)]
struct Node {
	name:     String,
	text:     String,
	children: Vec<Node>,
}

impl Node {
	fn named(name: &[u8]) -> Self {
		Self {
			name: String::from_utf8_lossy(name).into_owned(),
			..Default::default()
		}
	}

	fn child(&self, name: &str) -> Option<&Node> {
		self.children.iter().find(|node| node.name == name)
	}

	fn child_text(&self, name: &str) -> String {
		self.child(name)
			.map(|node| node.text.clone())
			.unwrap_or_default()
	}
}

/// Parses an XML document into a tree of local names, dropping namespaces
/// and attributes.
fn parse_tree(xml: &str) -> Result<Node, CnpError> {
	let mut reader = Reader::from_str(xml);
	reader.config_mut().trim_text(true);

	let mut stack = vec![Node::default()];

	loop {
		match reader.read_event() {
			Ok(Event::Start(e)) => stack.push(Node::named(e.local_name().as_ref())),
			Ok(Event::Empty(e)) => {
				let node = Node::named(e.local_name().as_ref());
				if let Some(parent) = stack.last_mut() {
					parent.children.push(node);
				}
			}
			Ok(Event::Text(e)) => {
				let text = e
					.unescape()
					.map_err(|e| CnpError::malformed(e.to_string()))?;
				if let Some(node) = stack.last_mut() {
					node.text.push_str(&text);
				}
			}
			Ok(Event::CData(e)) => {
				if let Some(node) = stack.last_mut() {
					node.text.push_str(&String::from_utf8_lossy(&e));
				}
			}
			Ok(Event::End(_)) => {
				let node = stack
					.pop()
					.ok_or_else(|| CnpError::malformed("unbalanced end tag"))?;
				let parent = stack
					.last_mut()
					.ok_or_else(|| CnpError::malformed("unbalanced end tag"))?;
				parent.children.push(node);
			}
			Ok(Event::Eof) => break,
			Ok(_) => {}
			Err(e) => {
				return Err(CnpError::malformed(format!(
					"{e} at position {}",
					reader.error_position()
				)));
			}
		}
	}

	if stack.len() != 1 {
		return Err(CnpError::malformed("unexpected end of document"));
	}

	stack
		.pop()
		.ok_or_else(|| CnpError::malformed("empty document"))
}

/// Flattens the `return` element of a SOAP response into a
/// [`TransactionResponse`]. Faults become [`CnpError::Fault`].
pub fn decode_response(xml: &str) -> Result<TransactionResponse, CnpError> {
	let document = parse_tree(xml)?;

	let envelope = document
		.child("Envelope")
		.ok_or_else(|| CnpError::malformed("missing SOAP envelope"))?;
	let body = envelope
		.child("Body")
		.ok_or_else(|| CnpError::malformed("missing SOAP body"))?;

	let Some(content) = body.children.first() else {
		return Ok(TransactionResponse::new());
	};

	if content.name == "Fault" {
		return Err(CnpError::Fault {
			code:    content.child_text("faultcode"),
			message: content.child_text("faultstring"),
		});
	}

	let Some(result) = content.children.first() else {
		return Ok(TransactionResponse::new());
	};

	if result.children.is_empty() {
		return Ok([(RETURN_KEY, result.text.as_str())].into_iter().collect());
	}

	Ok(result
		.children
		.iter()
		.map(|field| (field.name.as_str(), field.text.as_str()))
		.collect())
}
