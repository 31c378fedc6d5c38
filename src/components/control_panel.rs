use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use super::force_graph::loader::read_document;
use super::force_graph::{GraphDocument, GraphSettings, Parameter, SessionHandle};
use crate::config::DEFAULT_SETTINGS;

struct Slider {
	parameter: Parameter,
	label: &'static str,
	min: f64,
	max: f64,
	step: f64,
}

const SLIDERS: [Slider; 4] = [
	Slider {
		parameter: Parameter::CenterForce,
		label: "Center Force",
		min: 0.0,
		max: 1.0,
		step: 0.01,
	},
	Slider {
		parameter: Parameter::RepelForce,
		label: "Repel Force",
		min: 0.0,
		max: 1000.0,
		step: 10.0,
	},
	Slider {
		parameter: Parameter::LinkForce,
		label: "Link Force",
		min: 0.0,
		max: 1.0,
		step: 0.01,
	},
	Slider {
		parameter: Parameter::LinkDistance,
		label: "Link Distance",
		min: 10.0,
		max: 500.0,
		step: 1.0,
	},
];

fn toggle_label(visible: bool) -> &'static str {
	if visible { "Hide Controls" } else { "Show Controls" }
}

/// Show the defaults on the sliders and push them into the session, if one is loaded.
fn apply_reset(session: &SessionHandle, settings: RwSignal<GraphSettings>) {
	session.reset_parameters();
	settings.set(DEFAULT_SETTINGS);
}

/// Sliders for the four tunables plus toggle, reset and upload controls.
///
/// `settings` holds the values shown on the sliders; the panel keeps it in step with
/// what it pushes into the session.
#[component]
pub fn ControlPanel(
	session: SessionHandle,
	settings: RwSignal<GraphSettings>,
	/// Called with every successfully parsed upload.
	#[prop(into)]
	on_document: Callback<GraphDocument>,
) -> impl IntoView {
	let visible = RwSignal::new(true);

	let sliders = SLIDERS
		.iter()
		.map(|slider| {
			let parameter = slider.parameter;
			let session = session.clone();
			let on_input = move |ev: Event| {
				let raw = event_target_value(&ev);
				let Ok(value) = raw.parse::<f64>() else {
					log::warn!("ignoring non-numeric {} value {raw:?}", parameter.id());
					return;
				};
				settings.update(|s| parameter.set(s, value));
				session.set_parameter(parameter, value);
			};
			view! {
				<div class="control">
					<label for=parameter.id()>
						{slider.label} ": "
						<span class="value">{move || parameter.get(&settings.get()).to_string()}</span>
					</label>
					<input
						type="range"
						id=parameter.id()
						min=slider.min.to_string()
						max=slider.max.to_string()
						step=slider.step.to_string()
						prop:value=move || parameter.get(&settings.get()).to_string()
						on:input=on_input
					/>
				</div>
			}
		})
		.collect_view();

	let session_reset = session;
	let on_reset = move |_| apply_reset(&session_reset, settings);

	let on_upload = move |ev: Event| {
		let Some(input) = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
		else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		// lets the same file trigger another change event
		input.set_value("");
		spawn_local(async move {
			match read_document(file).await {
				Ok(doc) => on_document.run(doc),
				Err(e) => log::error!("upload rejected: {e}"),
			}
		});
	};

	view! {
		<div class="control-panel">
			<button id="toggleControls" on:click=move |_| visible.update(|v| *v = !*v)>
				{move || toggle_label(visible.get())}
			</button>
			<div id="controls" style:display=move || if visible.get() { "block" } else { "none" }>
				{sliders}
				<button id="resetSliders" on:click=on_reset>
					"Reset"
				</button>
				<input type="file" id="fileUpload" on:change=on_upload />
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use leptos::reactive::owner::Owner;

	use super::super::force_graph::Viewport;
	use super::*;

	#[test]
	fn toggle_label_reflects_visibility() {
		assert_eq!(toggle_label(true), "Hide Controls");
		assert_eq!(toggle_label(false), "Show Controls");
	}

	const DOC: &str = r#"{
		"nodes": [{"id": "a"}, {"id": "b"}],
		"edges": [{"source": "a", "target": "b"}]
	}"#;

	fn moved() -> GraphSettings {
		GraphSettings {
			center_force: 0.9,
			repel_force: 40.0,
			link_force: 0.2,
			link_distance: 480.0,
		}
	}

	#[test]
	fn reset_shows_defaults_before_any_graph_loads() {
		let owner = Owner::new();
		owner.with(|| {
			let settings = RwSignal::new(moved());
			apply_reset(&SessionHandle::default(), settings);
			assert_eq!(settings.get_untracked(), DEFAULT_SETTINGS);
		});
	}

	#[test]
	fn reset_restores_sliders_and_session() {
		let owner = Owner::new();
		owner.with(|| {
			let session = SessionHandle::default();
			let doc = GraphDocument::from_json(DOC).unwrap();
			session.replace(&doc, Viewport::new(800.0, 600.0)).unwrap();
			for parameter in Parameter::ALL {
				session.set_parameter(parameter, parameter.get(&moved()));
			}
			let settings = RwSignal::new(moved());

			apply_reset(&session, settings);

			assert_eq!(settings.get_untracked(), DEFAULT_SETTINGS);
			assert_eq!(session.with(|s| s.settings()), Some(DEFAULT_SETTINGS));
			assert_eq!(
				session.with(|s| s.simulation().forces().charge.strength()),
				Some(-DEFAULT_SETTINGS.repel_force)
			);
		});
	}

	#[test]
	fn slider_ranges_cover_defaults() {
		let defaults = GraphSettings::default();
		for slider in &SLIDERS {
			let value = slider.parameter.get(&defaults);
			assert!(slider.min <= value && value <= slider.max, "{}", slider.label);
		}
	}
}
