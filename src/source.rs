//! Graph data source: wire records, HTTP fetching and joining into [`GraphData`].

use log::{error, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::graph::{GraphData, GraphEdge, NodeRecord};

/// Default graph server.
pub const DEFAULT_BASE_URL: &str = "https://graph-server.netlify.app";

/// Errors raised while loading graph data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
	/// The node collection could not be fetched.
	#[error("Failed to fetch nodes: {0}")]
	FetchNodes(String),
	/// The edge collection could not be fetched.
	#[error("Failed to fetch edges: {0}")]
	FetchEdges(String),
	/// A payload did not have the expected shape.
	#[error("Malformed graph data: {0}")]
	Decode(String),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

/// Result type alias for graph loading.
pub type Result<T> = std::result::Result<T, GraphError>;

/// An id that the server may send as a string or a number.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WireId {
	/// String id.
	Text(String),
	/// Numeric id.
	Number(serde_json::Number),
}

impl From<WireId> for String {
	fn from(id: WireId) -> Self {
		match id {
			WireId::Text(s) => s,
			WireId::Number(n) => n.to_string(),
		}
	}
}

/// Node payload attached to a wire node.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WireNodeData {
	/// Display label.
	pub label: String,
}

/// A node as served by the graph server.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WireNode {
	/// Node id.
	pub id: WireId,
	/// Node payload.
	pub data: WireNodeData,
	/// Optional fill color.
	#[serde(default)]
	pub color: Option<String>,
}

/// An edge as served by the graph server.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WireEdge {
	/// Source node id.
	pub source: WireId,
	/// Target node id.
	pub target: WireId,
	/// Animate the edge stroke.
	#[serde(default)]
	pub animated: Option<bool>,
	/// Optional stroke color.
	#[serde(default)]
	pub color: Option<String>,
	/// Marker at the target end; only its presence matters here.
	#[serde(default, rename = "markerEnd")]
	pub marker_end: Option<serde_json::Value>,
}

impl From<WireNode> for NodeRecord {
	fn from(node: WireNode) -> Self {
		Self {
			id: node.id.into(),
			label: node.data.label,
			color: node.color,
		}
	}
}

impl From<WireEdge> for GraphEdge {
	fn from(edge: WireEdge) -> Self {
		let (source_id, target_id): (String, String) = (edge.source.into(), edge.target.into());
		Self {
			id: format!("{source_id}-{target_id}"),
			source_id,
			target_id,
			animated: edge.animated.unwrap_or(false),
			color: edge.color,
			arrow: edge.marker_end.is_some_and(|m| !m.is_null()),
		}
	}
}

/// Decodes a node collection from JSON.
pub fn decode_nodes(json: &str) -> Result<Vec<WireNode>> {
	Ok(serde_json::from_str(json)?)
}

/// Decodes an edge collection from JSON.
pub fn decode_edges(json: &str) -> Result<Vec<WireEdge>> {
	Ok(serde_json::from_str(json)?)
}

/// Joins decoded wire collections into the graph model.
///
/// Edges pointing at unknown nodes are kept and logged.
pub fn join(nodes: Vec<WireNode>, edges: Vec<WireEdge>) -> GraphData {
	let data = GraphData {
		nodes: nodes.into_iter().map(NodeRecord::from).collect(),
		edges: edges.into_iter().map(GraphEdge::from).collect(),
	};
	for edge in data.dangling_edges() {
		warn!("edge {} references a node that is not in the node set", edge.id);
	}
	data
}

/// Provider of the two graph collections.
#[allow(async_fn_in_trait)]
pub trait GraphDataSource {
	/// Fetches the node collection.
	async fn fetch_nodes(&self) -> Result<Vec<WireNode>>;
	/// Fetches the edge collection.
	async fn fetch_edges(&self) -> Result<Vec<WireEdge>>;
}

/// Fetches both collections concurrently and joins them.
///
/// When both fetches fail the node error is reported.
pub async fn load_graph<S: GraphDataSource>(source: &S) -> Result<GraphData> {
	let (nodes, edges) = futures::join!(source.fetch_nodes(), source.fetch_edges());
	let (nodes, edges) = match (nodes, edges) {
		(Ok(nodes), Ok(edges)) => (nodes, edges),
		(Err(err), _) | (_, Err(err)) => {
			error!("{err}");
			return Err(err);
		}
	};
	info!("loaded {} nodes and {} edges", nodes.len(), edges.len());
	Ok(join(nodes, edges))
}

/// Where to fetch graph data from.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
	/// Server base URL without a trailing slash.
	pub base_url: String,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
		}
	}
}

impl SourceConfig {
	/// URL of the node collection.
	pub fn nodes_url(&self) -> String {
		format!("{}/nodes", self.base_url.trim_end_matches('/'))
	}

	/// URL of the edge collection.
	pub fn edges_url(&self) -> String {
		format!("{}/edges", self.base_url.trim_end_matches('/'))
	}
}

/// Graph server reached over HTTP. One attempt per request.
#[derive(Clone, Debug, Default)]
pub struct HttpGraphSource {
	config: SourceConfig,
}

impl HttpGraphSource {
	/// Creates a source for `config`.
	pub fn new(config: SourceConfig) -> Self {
		Self { config }
	}

	async fn get_json<T: for<'de> Deserialize<'de>>(
		url: &str,
	) -> std::result::Result<T, String> {
		use gloo_net::http::Request;

		let response = Request::get(url)
			.send()
			.await
			.map_err(|e| format!("Network error: {e}"))?;
		if !response.ok() {
			return Err(format!("HTTP {} {}", response.status(), response.status_text()));
		}
		response
			.json::<T>()
			.await
			.map_err(|e| format!("Failed to parse response: {e}"))
	}
}

impl GraphDataSource for HttpGraphSource {
	async fn fetch_nodes(&self) -> Result<Vec<WireNode>> {
		Self::get_json(&self.config.nodes_url())
			.await
			.map_err(GraphError::FetchNodes)
	}

	async fn fetch_edges(&self) -> Result<Vec<WireEdge>> {
		Self::get_json(&self.config.edges_url())
			.await
			.map_err(GraphError::FetchEdges)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;

	const NODES: &str = r##"[
		{ "id": 1, "data": { "label": "Alpha" }, "color": "#ff0000" },
		{ "id": "2", "data": { "label": "Beta" } }
	]"##;

	const EDGES: &str = r##"[
		{ "source": 1, "target": "2", "animated": true, "color": "#00ff00" },
		{ "source": "2", "target": 1, "markerEnd": { "type": "arrow" } }
	]"##;

	struct StaticSource {
		nodes: Result<Vec<WireNode>>,
		edges: Result<Vec<WireEdge>>,
	}

	impl GraphDataSource for StaticSource {
		async fn fetch_nodes(&self) -> Result<Vec<WireNode>> {
			self.nodes.clone()
		}

		async fn fetch_edges(&self) -> Result<Vec<WireEdge>> {
			self.edges.clone()
		}
	}

	#[test]
	fn numeric_and_string_ids_become_strings() {
		let nodes = decode_nodes(NODES).unwrap();
		let records: Vec<NodeRecord> = nodes.into_iter().map(NodeRecord::from).collect();
		assert_eq!(records[0].id, "1");
		assert_eq!(records[0].color.as_deref(), Some("#ff0000"));
		assert_eq!(records[1].id, "2");
		assert_eq!(records[1].label, "Beta");
		assert_eq!(records[1].color, None);
	}

	#[test]
	fn edges_get_composite_ids_and_flags() {
		let edges: Vec<GraphEdge> = decode_edges(EDGES)
			.unwrap()
			.into_iter()
			.map(GraphEdge::from)
			.collect();
		assert_eq!(edges[0].id, "1-2");
		assert!(edges[0].animated);
		assert!(!edges[0].arrow);
		assert_eq!(edges[1].id, "2-1");
		assert!(!edges[1].animated);
		assert!(edges[1].arrow);
	}

	#[test]
	fn malformed_payload_is_a_decode_error() {
		let err = decode_nodes(r#"[{ "id": 1 }]"#).unwrap_err();
		assert!(matches!(err, GraphError::Decode(_)));
	}

	#[test]
	fn load_graph_joins_both_collections() {
		let source = StaticSource {
			nodes: decode_nodes(NODES),
			edges: decode_edges(EDGES),
		};
		let data = block_on(load_graph(&source)).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.edges.len(), 2);
		assert_eq!(data.connection_counts()["1"], 2);
	}

	#[test]
	fn node_failure_wins_when_both_fail() {
		let source = StaticSource {
			nodes: Err(GraphError::FetchNodes("offline".into())),
			edges: Err(GraphError::FetchEdges("offline".into())),
		};
		let err = block_on(load_graph(&source)).unwrap_err();
		assert_eq!(err.to_string(), "Failed to fetch nodes: offline");
	}

	#[test]
	fn edge_failure_is_reported_alone() {
		let source = StaticSource {
			nodes: decode_nodes(NODES),
			edges: Err(GraphError::FetchEdges("HTTP 500".into())),
		};
		let err = block_on(load_graph(&source)).unwrap_err();
		assert_eq!(err, GraphError::FetchEdges("HTTP 500".into()));
	}

	#[test]
	fn config_builds_collection_urls() {
		let config = SourceConfig {
			base_url: "http://localhost:8080/".into(),
		};
		assert_eq!(config.nodes_url(), "http://localhost:8080/nodes");
		assert_eq!(config.edges_url(), "http://localhost:8080/edges");
		assert_eq!(
			SourceConfig::default().nodes_url(),
			"https://graph-server.netlify.app/nodes"
		);
	}
}
