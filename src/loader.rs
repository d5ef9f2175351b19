//! One-shot loading of the input document and optional configuration.

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Response};

use crate::components::tree_view::{RawRecord, VisualConfig};
use crate::error::LoadError;

/// Where the document is fetched from unless told otherwise.
pub const DEFAULT_DATA_URL: &str = "./processed_data.json";

/// Element id of the optional JSON config override.
pub const CONFIG_ELEMENT_ID: &str = "tree-config";

/// Status and body of a completed request.
#[derive(Clone, Debug)]
pub struct Reply {
	/// HTTP status code.
	pub status: u16,
	/// Response text.
	pub body: String,
}

/// Reject non-success statuses before anything touches the body.
pub fn check_status(url: &str, status: u16) -> Result<(), LoadError> {
	if (200..300).contains(&status) {
		Ok(())
	} else {
		Err(LoadError::status(url, status))
	}
}

/// Parse the document text.
pub fn parse_document(text: &str) -> Result<RawRecord, LoadError> {
	Ok(serde_json::from_str(text)?)
}

/// Turn a completed request into a document. The body is only parsed for
/// success statuses.
pub fn document_from_reply(url: &str, reply: &Reply) -> Result<RawRecord, LoadError> {
	check_status(url, reply.status)?;
	parse_document(&reply.body)
}

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Perform the request. The body is only downloaded for success statuses.
pub async fn fetch_reply(url: &str) -> Result<Reply, LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::transport(url, "no window"))?;
	let value = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| LoadError::transport(url, js_reason(&e)))?;
	let response: Response = value
		.dyn_into()
		.map_err(|e| LoadError::transport(url, js_reason(&e)))?;
	let status = response.status();
	check_status(url, status)?;

	let text = response
		.text()
		.map_err(|e| LoadError::transport(url, js_reason(&e)))?;
	let body = JsFuture::from(text)
		.await
		.map_err(|e| LoadError::transport(url, js_reason(&e)))?
		.as_string()
		.ok_or_else(|| LoadError::transport(url, "response body is not text"))?;
	Ok(Reply { status, body })
}

/// Fetch and parse the document.
pub async fn load_document(url: &str) -> Result<RawRecord, LoadError> {
	let reply = fetch_reply(url).await?;
	let record = document_from_reply(url, &reply)?;
	info!("collapsible-tree: loaded {} ({} bytes)", url, reply.body.len());
	Ok(record)
}

/// Parse a config override; unparsable text falls back to defaults.
pub fn parse_config(text: &str) -> VisualConfig {
	serde_json::from_str(text).unwrap_or_else(|e| {
		warn!("collapsible-tree: ignoring invalid config: {}", e);
		VisualConfig::default()
	})
}

/// Read the config override from a script element with id="tree-config".
pub fn load_config() -> VisualConfig {
	let text = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|s| s.text().ok());
	match text {
		Some(text) => parse_config(&text),
		None => VisualConfig::default(),
	}
}
