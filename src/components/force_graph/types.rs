use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::config::DEFAULT_SETTINGS;
use crate::error::GraphError;

/// Node identifier; JSON strings and numbers are both accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub String);

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Number(serde_json::Number),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Text(s) => NodeId(s),
			Raw::Number(n) => NodeId(n.to_string()),
		})
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One entry of `nodes`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
	/// Unique within the document.
	pub id: NodeId,
	/// Label; the id is shown when absent.
	#[serde(default)]
	pub name: Option<String>,
	/// Pinned at the viewport centre.
	#[serde(default)]
	pub is_static: bool,
}

impl NodeSpec {
	/// Text drawn next to the node.
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.id.0)
	}
}

fn default_weight() -> f64 {
	1.0
}

/// One entry of `edges`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EdgeSpec {
	/// Id of the first endpoint.
	pub source: NodeId,
	/// Id of the second endpoint.
	pub target: NodeId,
	/// Drives stroke width and the label; defaults to 1.
	#[serde(default = "default_weight")]
	pub weight: f64,
}

/// The four runtime tunables of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphSettings {
	/// Strength of the pull toward the centre.
	pub center_force: f64,
	/// Repulsion magnitude between every pair of nodes.
	pub repel_force: f64,
	/// Edge spring strength.
	pub link_force: f64,
	/// Edge rest length.
	pub link_distance: f64,
}

impl Default for GraphSettings {
	fn default() -> Self {
		DEFAULT_SETTINGS
	}
}

/// A parsed `{nodes, edges, graphSettings}` document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
	/// Nodes in draw order.
	#[serde(default)]
	pub nodes: Vec<NodeSpec>,
	/// Edges in draw order.
	#[serde(default)]
	pub edges: Vec<EdgeSpec>,
	/// Initial tunables.
	#[serde(default)]
	pub graph_settings: GraphSettings,
}

impl GraphDocument {
	/// Parse and validate document text.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		let doc: Self = serde_json::from_str(text)?;
		doc.validate()?;
		Ok(doc)
	}

	/// Reject duplicate node ids and edges whose endpoints are not in the node set.
	pub fn validate(&self) -> Result<(), GraphError> {
		let mut ids = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(&node.id) {
				return Err(GraphError::DuplicateNode(node.id.0.clone()));
			}
		}
		for (index, edge) in self.edges.iter().enumerate() {
			for end in [&edge.source, &edge.target] {
				if !ids.contains(end) {
					return Err(GraphError::DanglingEdge {
						index,
						id: end.0.clone(),
					});
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"{
		"nodes": [
			{"id": "a", "name": "Alpha", "isStatic": true},
			{"id": 2, "name": "Beta"},
			{"id": "c"}
		],
		"edges": [
			{"source": "a", "target": 2, "weight": 4},
			{"source": "2", "target": "c"}
		],
		"graphSettings": {"centerForce": 0.5, "repelForce": 120, "linkForce": 0.7, "linkDistance": 80}
	}"#;

	#[test]
	fn parses_wire_names_and_defaults() {
		let doc = GraphDocument::from_json(SAMPLE).unwrap();
		assert_eq!(doc.nodes.len(), 3);
		assert!(doc.nodes[0].is_static);
		assert!(!doc.nodes[1].is_static);
		assert_eq!(doc.nodes[1].id, NodeId("2".into()));
		assert_eq!(doc.nodes[2].display_name(), "c");
		assert_eq!(doc.edges[0].weight, 4.0);
		assert_eq!(doc.edges[1].weight, 1.0);
		assert_eq!(
			doc.graph_settings,
			GraphSettings {
				center_force: 0.5,
				repel_force: 120.0,
				link_force: 0.7,
				link_distance: 80.0,
			}
		);
	}

	#[test]
	fn missing_settings_fall_back_to_defaults() {
		let doc = GraphDocument::from_json(r#"{"nodes": [], "edges": []}"#).unwrap();
		assert_eq!(doc.graph_settings, DEFAULT_SETTINGS);
	}

	#[test]
	fn partial_settings_keep_remaining_defaults() {
		let doc =
			GraphDocument::from_json(r#"{"nodes": [], "graphSettings": {"linkDistance": 42}}"#)
				.unwrap();
		assert_eq!(doc.graph_settings.link_distance, 42.0);
		assert_eq!(doc.graph_settings.repel_force, DEFAULT_SETTINGS.repel_force);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = GraphDocument::from_json("{\"nodes\": [").unwrap_err();
		assert!(matches!(err, GraphError::Parse(_)));
	}

	#[test]
	fn dangling_edge_is_rejected() {
		let err = GraphDocument::from_json(
			r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a", "target": "zzz", "weight": 1}]}"#,
		)
		.unwrap_err();
		match err {
			GraphError::DanglingEdge { index, id } => {
				assert_eq!(index, 0);
				assert_eq!(id, "zzz");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let err =
			GraphDocument::from_json(r#"{"nodes": [{"id": 1}, {"id": "1"}], "edges": []}"#)
				.unwrap_err();
		assert!(matches!(err, GraphError::DuplicateNode(id) if id == "1"));
	}
}
