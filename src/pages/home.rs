use leptos::prelude::*;
use log::info;

use crate::components::graph_canvas::GraphCanvas;
use crate::components::search_bar::SearchBar;
use crate::graph::{GraphData, matches};
use crate::source::{HttpGraphSource, SourceConfig, load_graph};

fn no_match_hint(data: &GraphData, query: &str) -> AnyView {
	if data.nodes.iter().any(|node| matches(&node.label, query)) {
		().into_any()
	} else {
		view! { <p class="empty">{format!("No nodes found for {query}.")}</p> }.into_any()
	}
}

/// Default Home Page
#[component]
pub fn Home(#[prop(optional)] config: Option<SourceConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();
	info!("graph source: {}", config.base_url);
	let source = HttpGraphSource::new(config);

	let graph = LocalResource::new(move || {
		let source = source.clone();
		async move { load_graph(&source).await }
	});
	let query = RwSignal::new(String::new());
	let data = Signal::derive(move || graph.get().and_then(Result::ok).unwrap_or_default());

	view! {
		<div class="fullscreen-graph" role="main">
			<GraphCanvas data=data query=query fullscreen=true />
			<div class="graph-overlay">
				<SearchBar query=query />
				<ErrorBoundary fallback=|errors| {
					view! {
						<ul class="errors">
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li role="alert">{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
					}
				}>
					{move || match graph.get() {
						None => Ok(view! { <p role="status">"Loading graph data..."</p> }.into_any()),
						Some(Err(err)) => Err(err),
						Some(Ok(data)) => Ok(no_match_hint(&data, &query.get())),
					}}
				</ErrorBoundary>
				<p class="subtitle">"Use keyboard to navigate between nodes"</p>
			</div>
		</div>
	}
}
