//! Error type shared by loading and the session.

use thiserror::Error;

/// Failures while loading a graph document or driving a session.
#[derive(Error, Debug)]
pub enum GraphError {
	/// The document text is not valid JSON or does not match the expected shape.
	#[error("invalid graph document: {0}")]
	Parse(#[from] serde_json::Error),

	/// Two nodes share an id.
	#[error("duplicate node id '{0}'")]
	DuplicateNode(String),

	/// An edge endpoint names a node that is not in the document.
	#[error("edge {index} references unknown node '{id}'")]
	DanglingEdge {
		/// Position of the edge in the document.
		index: usize,
		/// The unknown id.
		id: String,
	},

	/// The request never produced a response.
	#[error("fetch of {url} failed: {reason}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Browser error text.
		reason: String,
	},

	/// The server answered with a non-success status.
	#[error("fetch of {url} returned HTTP {status}")]
	HttpStatus {
		/// Requested URL.
		url: String,
		/// Response status code.
		status: u16,
	},

	/// An uploaded file could not be read as text.
	#[error("could not read file: {0}")]
	Read(String),

	/// A tunable was given a non-finite value.
	#[error("{parameter} cannot be set to {value}")]
	InvalidParameter {
		/// Slider id of the tunable.
		parameter: &'static str,
		/// Rejected value.
		value: f64,
	},
}
