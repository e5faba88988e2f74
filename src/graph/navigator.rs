//! Directional keyboard navigation between laid-out nodes.

use super::types::{GraphNode, Position};

/// Arrow-key direction, in a coordinate system where `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Towards smaller `y`.
	Up,
	/// Towards larger `y`.
	Down,
	/// Towards smaller `x`.
	Left,
	/// Towards larger `x`.
	Right,
}

impl Direction {
	/// Maps a DOM `KeyboardEvent.key` value to a direction.
	pub fn from_key(key: &str) -> Option<Self> {
		match key {
			"ArrowUp" => Some(Self::Up),
			"ArrowDown" => Some(Self::Down),
			"ArrowLeft" => Some(Self::Left),
			"ArrowRight" => Some(Self::Right),
			_ => None,
		}
	}

	/// True when `to` lies strictly in this direction from `from`.
	pub fn admits(self, from: Position, to: Position) -> bool {
		match self {
			Self::Up => to.y < from.y,
			Self::Down => to.y > from.y,
			Self::Left => to.x < from.x,
			Self::Right => to.x > from.x,
		}
	}
}

/// Finds the closest node strictly in `direction` from `from`.
///
/// Equal distances resolve to the node that comes first in `nodes`.
pub fn nearest<'a>(
	nodes: &'a [GraphNode],
	from: &GraphNode,
	direction: Direction,
) -> Option<&'a GraphNode> {
	nodes
		.iter()
		.filter(|node| node.id != from.id && direction.admits(from.position, node.position))
		.map(|node| (node, node.position.distance(&from.position)))
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(node, _)| node)
}

/// Which node currently holds keyboard focus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusState {
	current: Option<String>,
}

impl FocusState {
	/// Id of the focused node.
	pub fn current(&self) -> Option<&str> {
		self.current.as_deref()
	}

	/// True when `id` is focused.
	pub fn is_focused(&self, id: &str) -> bool {
		self.current.as_deref() == Some(id)
	}

	/// Handles one direction-key press and returns the node now in focus.
	///
	/// Without a focus (or when the focused id is gone from `nodes`) the first
	/// node is selected. Otherwise focus moves to [`nearest`], or stays put
	/// when nothing lies in that direction.
	pub fn navigate<'a>(
		&mut self,
		nodes: &'a [GraphNode],
		direction: Direction,
	) -> Option<&'a GraphNode> {
		let from = self
			.current
			.as_deref()
			.and_then(|id| nodes.iter().find(|node| node.id == id));

		let next = match from {
			None => nodes.first(),
			Some(from) => nearest(nodes, from, direction).or(Some(from)),
		};
		self.current = next.map(|node| node.id.clone());
		next
	}

	/// Drops the focus; used when the node set is replaced.
	pub fn reset(&mut self) {
		self.current = None;
	}
}
