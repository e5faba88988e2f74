//! Graph model, radial layout, directional navigation and label filtering.
//!
//! Everything here is pure and free of browser APIs.

pub mod filter;
pub mod layout;
pub mod navigator;
mod types;

pub use filter::{FilterResult, filter, matches};
pub use layout::{Placement, connection_counts, layout};
pub use navigator::{Direction, FocusState, nearest};
pub use types::{GraphData, GraphEdge, GraphNode, NodeRecord, Position, Viewport};
