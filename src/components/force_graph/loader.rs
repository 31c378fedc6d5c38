//! Getting graph documents into the page: remote fetch and local file upload.

use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Response};

use super::types::GraphDocument;
use crate::error::GraphError;

fn describe(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// HTTP GET `url` and parse the body as a graph document.
pub async fn fetch_document(url: &str) -> Result<GraphDocument, GraphError> {
	let fetch_err = |reason: String| GraphError::Fetch {
		url: url.to_string(),
		reason,
	};
	let window = web_sys::window().ok_or_else(|| fetch_err("no window".into()))?;

	let promise: Promise = window.fetch_with_str(url);
	let response: Response = JsFuture::from(promise)
		.await
		.map_err(|e| fetch_err(describe(e)))?
		.dyn_into()
		.map_err(|e| fetch_err(describe(e)))?;
	if !response.ok() {
		return Err(GraphError::HttpStatus {
			url: url.to_string(),
			status: response.status(),
		});
	}

	let body = response.text().map_err(|e| fetch_err(describe(e)))?;
	let text = JsFuture::from(body)
		.await
		.map_err(|e| fetch_err(describe(e)))?
		.as_string()
		.ok_or_else(|| fetch_err("response body is not text".into()))?;
	log::debug!("fetched {} bytes from {url}", text.len());
	GraphDocument::from_json(&text)
}

/// Read an uploaded file and parse it as a graph document.
pub async fn read_document(file: File) -> Result<GraphDocument, GraphError> {
	let name = file.name();
	let text = JsFuture::from(file.text())
		.await
		.map_err(|e| GraphError::Read(format!("{name}: {}", describe(e))))?
		.as_string()
		.ok_or_else(|| GraphError::Read(format!("{name}: not a text file")))?;
	log::debug!("read {} bytes from {name}", text.len());
	GraphDocument::from_json(&text)
}
