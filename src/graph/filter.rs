//! Label filtering. Non-matching nodes stay in the view but fade out.

use std::collections::{HashMap, HashSet};

use super::types::{GraphEdge, GraphNode};

/// Opacity of a node whose label matches the query.
pub const MATCHED_OPACITY: f64 = 1.0;
/// Opacity of a node whose label does not match.
pub const UNMATCHED_NODE_OPACITY: f64 = 0.3;
/// Opacity of an edge with neither endpoint matched.
pub const UNMATCHED_EDGE_OPACITY: f64 = 0.2;

/// Outcome of applying a query to a graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterResult {
	/// Ids of nodes whose label matched.
	pub matched_ids: HashSet<String>,
	/// Opacity per node id.
	pub node_opacities: HashMap<String, f64>,
	/// Opacity per edge id.
	pub edge_opacities: HashMap<String, f64>,
}

impl FilterResult {
	/// Opacity for a node, fully opaque when unknown.
	pub fn node_opacity(&self, id: &str) -> f64 {
		self.node_opacities.get(id).copied().unwrap_or(MATCHED_OPACITY)
	}

	/// Opacity for an edge, fully opaque when unknown.
	pub fn edge_opacity(&self, id: &str) -> f64 {
		self.edge_opacities.get(id).copied().unwrap_or(MATCHED_OPACITY)
	}
}

/// Case-insensitive substring test. An empty query matches everything.
pub fn matches(label: &str, query: &str) -> bool {
	label.to_lowercase().contains(&query.to_lowercase())
}

/// Matches `query` against node labels and derives node and edge opacities.
///
/// An edge stays opaque when either endpoint matched; an endpoint id that is
/// not in `nodes` never matches.
pub fn filter(nodes: &[GraphNode], edges: &[GraphEdge], query: &str) -> FilterResult {
	let query = query.to_lowercase();
	let matched_ids: HashSet<String> = nodes
		.iter()
		.filter(|node| node.label.to_lowercase().contains(&query))
		.map(|node| node.id.clone())
		.collect();

	let node_opacities = nodes
		.iter()
		.map(|node| {
			let opacity = if matched_ids.contains(&node.id) {
				MATCHED_OPACITY
			} else {
				UNMATCHED_NODE_OPACITY
			};
			(node.id.clone(), opacity)
		})
		.collect();

	let edge_opacities = edges
		.iter()
		.map(|edge| {
			let lit =
				matched_ids.contains(&edge.source_id) || matched_ids.contains(&edge.target_id);
			let opacity = if lit { MATCHED_OPACITY } else { UNMATCHED_EDGE_OPACITY };
			(edge.id.clone(), opacity)
		})
		.collect();

	FilterResult {
		matched_ids,
		node_opacities,
		edge_opacities,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes() -> Vec<GraphNode> {
		vec![
			GraphNode::new("a", "Alpha", 0.0, 0.0),
			GraphNode::new("b", "Beta", 1.0, 0.0),
		]
	}

	#[test]
	fn prefix_query_matches_one_node() {
		let out = filter(&nodes(), &[], "alp");
		assert_eq!(out.matched_ids, HashSet::from(["a".to_string()]));
		assert_eq!(out.node_opacities["a"], 1.0);
		assert_eq!(out.node_opacities["b"], 0.3);
	}

	#[test]
	fn edge_is_lit_when_one_endpoint_matches() {
		let edges = vec![GraphEdge::new("e1", "a", "b")];
		let out = filter(&nodes(), &edges, "alp");
		assert_eq!(out.edge_opacities["e1"], 1.0);
	}

	#[test]
	fn edge_fades_when_no_endpoint_matches() {
		let edges = vec![GraphEdge::new("e1", "a", "b")];
		let out = filter(&nodes(), &edges, "zzz");
		assert!(out.matched_ids.is_empty());
		assert_eq!(out.edge_opacities["e1"], 0.2);
	}

	#[test]
	fn empty_query_matches_everything() {
		let out = filter(&nodes(), &[], "");
		assert_eq!(out.matched_ids.len(), 2);
		assert!(out.node_opacities.values().all(|&o| o == 1.0));
	}

	#[test]
	fn matching_ignores_case() {
		let out = filter(&nodes(), &[], "BETA");
		assert_eq!(out.matched_ids, HashSet::from(["b".to_string()]));
		assert!(matches("Alpha", "PH"));
		assert!(!matches("Alpha", "beta"));
	}

	#[test]
	fn dangling_endpoint_does_not_match() {
		let edges = vec![GraphEdge::new("b-ghost", "b", "ghost")];
		let out = filter(&nodes(), &edges, "ghost");
		assert_eq!(out.edge_opacities["b-ghost"], 0.2);
	}

	#[test]
	fn repeated_query_is_idempotent() {
		let edges = vec![GraphEdge::new("e1", "a", "b")];
		let first = filter(&nodes(), &edges, "et");
		let second = filter(&nodes(), &edges, "et");
		assert_eq!(first, second);
	}

	#[test]
	fn unknown_ids_default_to_opaque() {
		let out = FilterResult::default();
		assert_eq!(out.node_opacity("missing"), 1.0);
		assert_eq!(out.edge_opacity("missing"), 1.0);
	}
}
