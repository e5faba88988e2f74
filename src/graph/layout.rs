//! Radial layout: nodes spread evenly around an ellipse fitted to the viewport.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{GraphEdge, NodeRecord, Viewport};

/// Viewports narrower than this use the small-screen radii.
pub const SMALL_SCREEN_WIDTH: f64 = 768.0;
/// Nodes with more connections than this are drawn larger.
pub const BUSY_NODE_THRESHOLD: usize = 2;
/// Size and vertical stretch applied to busy nodes.
pub const BUSY_NODE_SCALE: f64 = 1.2;

/// Where a node lands and how large it is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
	/// Visual size multiplier.
	pub size_scale: f64,
}

impl Default for Placement {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			size_scale: 1.0,
		}
	}
}

/// Counts incident edges per node id. A self-loop counts twice.
pub fn connection_counts(edges: &[GraphEdge]) -> HashMap<String, usize> {
	let mut counts = HashMap::new();
	for edge in edges {
		*counts.entry(edge.source_id.clone()).or_insert(0) += 1;
		*counts.entry(edge.target_id.clone()).or_insert(0) += 1;
	}
	counts
}

fn radii(viewport: Viewport) -> (f64, f64) {
	let Viewport { width, height } = viewport;
	if viewport.is_small() {
		(width.min(height) / 3.0, height.min(width) / 2.2)
	} else {
		(width / 4.0, height / 4.0)
	}
}

/// Places `nodes` evenly around an ellipse centred in `viewport`.
///
/// Node `i` sits at angle `i * 2π / n`. Nodes absent from `counts` are
/// treated as unconnected. The result is a pure function of the inputs, so
/// re-running it yields identical positions.
pub fn layout(
	nodes: &[NodeRecord],
	counts: &HashMap<String, usize>,
	viewport: Viewport,
) -> HashMap<String, Placement> {
	if nodes.is_empty() {
		return HashMap::new();
	}

	let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
	let (radius_x, radius_y) = radii(viewport);
	let step = 2.0 * PI / nodes.len() as f64;

	nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let angle = i as f64 * step;
			let busy = counts.get(&node.id).copied().unwrap_or(0) > BUSY_NODE_THRESHOLD;
			let scale = if busy { BUSY_NODE_SCALE } else { 1.0 };
			let stretch = if viewport.is_small() { scale } else { 1.0 };

			let placement = Placement {
				x: cx + radius_x * angle.cos(),
				y: cy + radius_y * angle.sin() * stretch,
				size_scale: scale,
			};
			(node.id.clone(), placement)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn records(n: usize) -> Vec<NodeRecord> {
		(0..n)
			.map(|i| NodeRecord::new(i.to_string(), format!("Node {i}")))
			.collect()
	}

	#[test]
	fn empty_input_yields_empty_mapping() {
		let out = layout(&[], &HashMap::new(), Viewport::new(1024.0, 768.0));
		assert!(out.is_empty());
	}

	#[test]
	fn angles_are_evenly_spaced() {
		let viewport = Viewport::new(1200.0, 800.0);
		for n in 1..=12 {
			let nodes = records(n);
			let out = layout(&nodes, &HashMap::new(), viewport);
			assert_eq!(out.len(), n);
			for (i, node) in nodes.iter().enumerate() {
				let p = out[&node.id];
				let (rx, ry) = (300.0, 200.0);
				let angle = ((p.y - 400.0) / ry).atan2((p.x - 600.0) / rx);
				let expected = i as f64 * 2.0 * PI / n as f64;
				let diff = (angle - expected).rem_euclid(2.0 * PI);
				assert!(diff < 1e-9 || 2.0 * PI - diff < 1e-9, "n={n} i={i}");
			}
		}
	}

	#[test]
	fn identical_inputs_produce_identical_output() {
		let nodes = records(7);
		let edges = vec![
			GraphEdge::new("0-1", "0", "1"),
			GraphEdge::new("0-2", "0", "2"),
			GraphEdge::new("0-3", "0", "3"),
		];
		let counts = connection_counts(&edges);
		let viewport = Viewport::new(500.0, 900.0);
		let first = layout(&nodes, &counts, viewport);
		let second = layout(&nodes, &counts, viewport);
		for node in &nodes {
			let (a, b) = (first[&node.id], second[&node.id]);
			assert_eq!(a.x.to_bits(), b.x.to_bits());
			assert_eq!(a.y.to_bits(), b.y.to_bits());
		}
	}

	#[test]
	fn large_screen_uses_quarter_radii() {
		let nodes = records(4);
		let out = layout(&nodes, &HashMap::new(), Viewport::new(1200.0, 800.0));
		let first = out["0"];
		assert!((first.x - 900.0).abs() < 1e-9);
		assert!((first.y - 400.0).abs() < 1e-9);
		let second = out["1"];
		assert!((second.x - 600.0).abs() < 1e-9);
		assert!((second.y - 600.0).abs() < 1e-9);
	}

	#[test]
	fn small_screen_stretches_busy_nodes() {
		let nodes = records(4);
		let viewport = Viewport::new(600.0, 900.0);
		let mut counts = HashMap::new();
		counts.insert("1".to_string(), 3);
		counts.insert("3".to_string(), 2);
		let out = layout(&nodes, &counts, viewport);

		let radius_y = 600.0 / 2.2;
		let busy = out["1"];
		assert!((busy.y - (450.0 + radius_y * 1.2)).abs() < 1e-9);
		assert_eq!(busy.size_scale, BUSY_NODE_SCALE);

		let quiet = out["3"];
		assert!((quiet.y - (450.0 - radius_y)).abs() < 1e-9);
		assert_eq!(quiet.size_scale, 1.0);

		assert!((out["0"].x - (300.0 + 200.0)).abs() < 1e-9);
	}

	#[test]
	fn large_screen_scales_but_does_not_stretch() {
		let nodes = records(4);
		let mut counts = HashMap::new();
		counts.insert("1".to_string(), 5);
		let out = layout(&nodes, &counts, Viewport::new(1200.0, 800.0));
		let busy = out["1"];
		assert!((busy.y - 600.0).abs() < 1e-9);
		assert_eq!(busy.size_scale, BUSY_NODE_SCALE);
	}

	#[test]
	fn counts_include_both_endpoints() {
		let edges = vec![
			GraphEdge::new("a-b", "a", "b"),
			GraphEdge::new("b-c", "b", "c"),
			GraphEdge::new("c-c", "c", "c"),
		];
		let counts = connection_counts(&edges);
		assert_eq!(counts["a"], 1);
		assert_eq!(counts["b"], 2);
		assert_eq!(counts["c"], 3);
	}
}
