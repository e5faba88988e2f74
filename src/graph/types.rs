use std::collections::HashMap;

use super::layout::{self, connection_counts};

/// A point in layout space. `y` grows downward, like canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, increasing downward.
	pub y: f64,
}

impl Position {
	/// Creates a position.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(&self, other: &Position) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Size of the drawing surface the layout is fitted to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	/// Creates a viewport.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Narrow viewports get a taller ellipse.
	pub fn is_small(&self) -> bool {
		self.width < layout::SMALL_SCREEN_WIDTH
	}
}

/// A decoded node that has not been laid out yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRecord {
	/// Unique node id.
	pub id: String,
	/// Display label, also the filter target.
	pub label: String,
	/// Fill color supplied by the data source.
	pub color: Option<String>,
}

impl NodeRecord {
	/// Creates a record without a color.
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			color: None,
		}
	}
}

/// A laid-out node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	/// Unique node id.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Fill color supplied by the data source.
	pub color: Option<String>,
	/// Position assigned by the layout, or by dragging.
	pub position: Position,
	/// Number of incident edges.
	pub connection_count: usize,
	/// Visual size multiplier assigned by the layout.
	pub size_scale: f64,
}

impl GraphNode {
	/// Creates a node at `(x, y)` with no connections.
	pub fn new(id: impl Into<String>, label: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			color: None,
			position: Position::new(x, y),
			connection_count: 0,
			size_scale: 1.0,
		}
	}
}

/// An edge between two nodes, referenced by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphEdge {
	/// Edge id, `"{source}-{target}"` for fetched edges.
	pub id: String,
	/// Id of the source node.
	pub source_id: String,
	/// Id of the target node.
	pub target_id: String,
	/// Draw with a moving dash pattern.
	pub animated: bool,
	/// Stroke color supplied by the data source.
	pub color: Option<String>,
	/// Draw an arrow head at the target.
	pub arrow: bool,
}

impl GraphEdge {
	/// Creates a plain edge.
	pub fn new(
		id: impl Into<String>,
		source_id: impl Into<String>,
		target_id: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			source_id: source_id.into(),
			target_id: target_id.into(),
			..Self::default()
		}
	}

	/// True when either endpoint is `node_id`.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source_id == node_id || self.target_id == node_id
	}
}

/// Decoded node and edge collections, ready to be laid out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes in source order; the order drives the layout angle.
	pub nodes: Vec<NodeRecord>,
	/// Edges in source order.
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// Incident edge count per node id.
	pub fn connection_counts(&self) -> HashMap<String, usize> {
		connection_counts(&self.edges)
	}

	/// Lays the nodes out for `viewport`, keeping source order.
	pub fn arrange(&self, viewport: Viewport) -> Vec<GraphNode> {
		let counts = self.connection_counts();
		let placements = layout::layout(&self.nodes, &counts, viewport);

		self.nodes
			.iter()
			.map(|record| {
				let placement = placements.get(&record.id).copied().unwrap_or_default();
				GraphNode {
					id: record.id.clone(),
					label: record.label.clone(),
					color: record.color.clone(),
					position: Position::new(placement.x, placement.y),
					connection_count: counts.get(&record.id).copied().unwrap_or(0),
					size_scale: placement.size_scale,
				}
			})
			.collect()
	}

	/// Edges whose endpoints are not both present in `nodes`.
	pub fn dangling_edges(&self) -> impl Iterator<Item = &GraphEdge> {
		self.edges.iter().filter(|edge| {
			let known = |id: &str| self.nodes.iter().any(|n| n.id == id);
			!known(&edge.source_id) || !known(&edge.target_id)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				NodeRecord::new("a", "Alpha"),
				NodeRecord::new("b", "Beta"),
				NodeRecord::new("c", "Gamma"),
			],
			edges: vec![
				GraphEdge::new("a-b", "a", "b"),
				GraphEdge::new("a-c", "a", "c"),
				GraphEdge::new("a-x", "a", "x"),
			],
		}
	}

	#[test]
	fn arrange_keeps_source_order_and_counts() {
		let nodes = sample().arrange(Viewport::new(1200.0, 800.0));
		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b", "c"]);
		assert_eq!(nodes[0].connection_count, 3);
		assert_eq!(nodes[0].size_scale, 1.2);
		assert_eq!(nodes[1].connection_count, 1);
		assert_eq!(nodes[1].size_scale, 1.0);
	}

	#[test]
	fn dangling_edges_are_reported() {
		let data = sample();
		let dangling: Vec<_> = data.dangling_edges().map(|e| e.id.as_str()).collect();
		assert_eq!(dangling, ["a-x"]);
	}

	#[test]
	fn small_screen_threshold() {
		assert!(Viewport::new(767.9, 1000.0).is_small());
		assert!(!Viewport::new(768.0, 1000.0).is_small());
	}
}
