use log::{debug, info};

use crate::graph::{
	Direction, FilterResult, FocusState, GraphData, GraphEdge, GraphNode, Position, Viewport,
	filter,
};

pub const NODE_RADIUS: f64 = 25.0;
pub const HANDLE_RADIUS: f64 = 9.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What sits under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
	Node(usize),
	EdgeHandle(String),
}

pub struct GraphViewState {
	pub data: GraphData,
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	pub viewport: Viewport,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub focus: FocusState,
	pub filter: FilterResult,
	pub query: String,
	pub flow_time: f64,
}

impl GraphViewState {
	pub fn new(data: &GraphData, viewport: Viewport, query: &str) -> Self {
		let nodes = data.arrange(viewport);
		let edges = data.edges.clone();
		let filter = filter(&nodes, &edges, query);

		Self {
			data: data.clone(),
			nodes,
			edges,
			viewport,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			focus: FocusState::default(),
			filter,
			query: query.to_string(),
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Midpoint of an edge, where its delete handle is drawn.
	pub fn edge_midpoint(&self, edge: &GraphEdge) -> Option<Position> {
		let (src, tgt) = (self.node(&edge.source_id)?, self.node(&edge.target_id)?);
		Some(Position::new(
			(src.position.x + tgt.position.x) / 2.0,
			(src.position.y + tgt.position.y) / 2.0,
		))
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let pointer = Position::new(gx, gy);
		// Last drawn wins, so search back to front.
		self.nodes
			.iter()
			.rposition(|node| node.position.distance(&pointer) < NODE_RADIUS * node.size_scale)
	}

	pub fn hit_test(&self, sx: f64, sy: f64) -> Option<Hit> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let pointer = Position::new(gx, gy);
		// Handles are in screen pixels, so scale the radius back to graph space.
		let handle_radius = HANDLE_RADIUS / self.transform.k;
		let handle = self.edges.iter().rev().find(|edge| {
			self.edge_midpoint(edge)
				.is_some_and(|mid| mid.distance(&pointer) < handle_radius)
		});
		if let Some(edge) = handle {
			return Some(Hit::EdgeHandle(edge.id.clone()));
		}
		self.node_at_position(sx, sy).map(Hit::Node)
	}

	pub fn remove_edge(&mut self, id: &str) -> bool {
		let before = self.edges.len();
		self.edges.retain(|edge| edge.id != id);
		let removed = self.edges.len() != before;
		if removed {
			self.filter.edge_opacities.remove(id);
			info!("removed edge {id}");
		}
		removed
	}

	pub fn move_node(&mut self, idx: usize, position: Position) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.position = position;
		}
	}

	pub fn apply_query(&mut self, query: &str) {
		self.query = query.to_string();
		self.filter = filter(&self.nodes, &self.edges, query);
		debug!(
			"query {:?} matched {} of {} nodes",
			query,
			self.filter.matched_ids.len(),
			self.nodes.len()
		);
	}

	pub fn navigate(&mut self, direction: Direction) -> Option<String> {
		let focused = self
			.focus
			.navigate(&self.nodes, direction)
			.map(|node| node.id.clone());
		debug!("focus {:?} after {:?}", focused, direction);
		focused
	}

	pub fn is_focused(&self, id: &str) -> bool {
		self.focus.is_focused(id)
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	/// Re-runs the layout for the new size. Dragged positions are discarded.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport = Viewport::new(width, height);
		self.nodes = self.data.arrange(self.viewport);
		info!("layout refreshed for {width}x{height}");
	}
}
