pub mod graph_canvas;
pub mod search_bar;
