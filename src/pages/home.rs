use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::control_panel::ControlPanel;
use crate::components::force_graph::loader::fetch_document;
use crate::components::force_graph::{ForceGraphSvg, GraphDocument, GraphSettings, SessionHandle};
use crate::config::AppConfig;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let document = RwSignal::new(None::<GraphDocument>);
	let settings = RwSignal::new(GraphSettings::default());
	let session = SessionHandle::default();

	// a failed fetch leaves the page empty until a file is uploaded
	spawn_local(async move {
		match fetch_document(&config.data_url).await {
			Ok(doc) => document.set(Some(doc)),
			Err(e) => log::error!("initial graph load failed: {e}"),
		}
	});

	let on_document = Callback::new(move |doc: GraphDocument| document.set(Some(doc)));
	let on_load = Callback::new(move |loaded: GraphSettings| settings.set(loaded));

	view! {
		<div class="fullscreen-graph">
			<ForceGraphSvg data=document session=session.clone() on_load=on_load />
			<div class="graph-overlay">
				<h1>"Force-Directed Graph"</h1>
				<p class="subtitle">"Drag nodes to reposition. Upload a JSON graph to replace it."</p>
			</div>
			<ControlPanel session=session settings=settings on_document=on_document />
		</div>
	}
}
