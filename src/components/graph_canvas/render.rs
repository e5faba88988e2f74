use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{GraphViewState, HANDLE_RADIUS, NODE_RADIUS};

const BACKGROUND: &str = "#fafafa";
const DEFAULT_NODE_COLOR: &str = "#1f77b4";
const DEFAULT_EDGE_COLOR: &str = "#b1b1b7";
const FOCUS_COLOR: &str = "blue";
const HANDLE_COLOR: &str = "red";

pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.viewport.width, state.viewport.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_handles(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in &state.edges {
		let (Some(src), Some(tgt)) = (state.node(&edge.source_id), state.node(&edge.target_id))
		else {
			continue;
		};
		let (x1, y1, x2, y2) = (src.position.x, src.position.y, tgt.position.x, tgt.position.y);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (r1, r2) = (NODE_RADIUS * src.size_scale, NODE_RADIUS * tgt.size_scale);
		let color = edge.color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR);

		ctx.set_global_alpha(state.filter.edge_opacity(&edge.id));
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(line_width);
		if edge.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		let tail = if edge.arrow { r2 + arrow_size } else { r2 };
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * tail, y2 - uy * tail);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if edge.arrow {
			ctx.set_fill_style_str(color);
			let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;

	for node in &state.nodes {
		let (x, y) = (node.position.x, node.position.y);
		let radius = NODE_RADIUS * node.size_scale;

		ctx.set_global_alpha(state.filter.node_opacity(&node.id));
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color.as_deref().unwrap_or(DEFAULT_NODE_COLOR));
		ctx.fill();

		if state.is_focused(&node.id) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 1.5 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(FOCUS_COLOR);
			ctx.set_line_width(3.0 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("#333");
		ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
		let _ = ctx.fill_text(&node.label, x + radius + 4.0, y + 4.0);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_handles(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let radius = HANDLE_RADIUS / k;

	ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for edge in &state.edges {
		let Some(mid) = state.edge_midpoint(edge) else {
			continue;
		};
		ctx.set_global_alpha(state.filter.edge_opacity(&edge.id));
		ctx.begin_path();
		let _ = ctx.arc(mid.x, mid.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(HANDLE_COLOR);
		ctx.fill();
		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text("\u{00d7}", mid.x, mid.y);
	}
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
	ctx.set_global_alpha(1.0);
}
