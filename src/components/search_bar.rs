use leptos::prelude::*;

/// Text box that writes the label filter query.
#[component]
pub fn SearchBar(query: RwSignal<String>) -> impl IntoView {
	view! {
		<div class="search-bar" role="search">
			<input
				id="nodeSearch"
				type="text"
				placeholder="Type a node label to filter"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
		</div>
	}
}
