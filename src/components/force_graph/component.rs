use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, Window};

use super::render::{NODE_INDEX_ATTR, SvgScene};
use super::state::{GraphSession, Parameter, Viewport};
use super::types::{GraphDocument, GraphSettings};
use crate::error::GraphError;

/// Shared handle to the active session. Cloning shares the same session.
#[derive(Clone, Default)]
pub struct SessionHandle(Rc<RefCell<Option<GraphSession>>>);

impl SessionHandle {
	/// Run `f` against the active session, if a graph has been loaded.
	pub fn with<R>(&self, f: impl FnOnce(&mut GraphSession) -> R) -> Option<R> {
		self.0.borrow_mut().as_mut().map(f)
	}

	/// Push a slider value; logs rejected values.
	pub fn set_parameter(&self, parameter: Parameter, value: f64) {
		if let Some(Err(e)) = self.with(|s| s.set_parameter(parameter, value)) {
			log::warn!("{e}");
		}
	}

	/// Load `doc`, replacing the current session. On error nothing changes.
	pub fn replace(&self, doc: &GraphDocument, viewport: Viewport) -> Result<(), GraphError> {
		let mut slot = self.0.borrow_mut();
		match slot.as_mut() {
			Some(session) => session.replace(doc)?,
			None => *slot = Some(GraphSession::new(doc, viewport)?),
		}
		Ok(())
	}

	/// Restore the default tunables on the active session; `None` before the first load.
	pub fn reset_parameters(&self) -> Option<GraphSettings> {
		self.with(GraphSession::reset_parameters)
	}
}

fn window_size(window: &Window) -> Viewport {
	let dim = |v: Result<JsValue, JsValue>, fallback| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	Viewport::new(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

fn pointer(svg: &Element, ev: &MouseEvent) -> (f64, f64) {
	let rect = svg.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Fullscreen SVG force layout of the current document.
///
/// Every new `data` value tears down the old scene and builds a fresh session; an
/// invalid document is logged and the previous graph stays on screen.
#[component]
pub fn ForceGraphSvg(
	#[prop(into)] data: Signal<Option<GraphDocument>>,
	session: SessionHandle,
	/// Receives the settings of each successfully loaded document.
	#[prop(optional, into)]
	on_load: Option<Callback<GraphSettings>>,
) -> impl IntoView {
	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let scene: Rc<RefCell<Option<SvgScene>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (session_init, scene_init, animate_init, resize_cb_init) = (
		session.clone(),
		scene.clone(),
		animate.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(svg) = svg_ref.get() else {
			return;
		};
		let Some(doc) = data.get() else {
			return;
		};
		let svg: Element = svg.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let viewport = window_size(&window);

		if let Err(e) = session_init.replace(&doc, viewport) {
			log::error!("graph not replaced: {e}");
			return;
		}
		let settings = session_init.with(|s| {
			if let Err(e) = SvgScene::rebuild(&svg, s, &mut scene_init.borrow_mut()) {
				log::error!("failed to build svg scene: {e:?}");
			}
			s.settings()
		});
		if let (Some(cb), Some(settings)) = (on_load, settings) {
			cb.run(settings);
		}

		if resize_cb_init.borrow().is_none() {
			let (session_resize, svg_resize) = (session_init.clone(), svg.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let viewport = window_size(&win);
				let _ = svg_resize.set_attribute("width", &viewport.width.to_string());
				let _ = svg_resize.set_attribute("height", &viewport.height.to_string());
				session_resize.with(|s| s.resize(viewport));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		let _ = svg.set_attribute("width", &viewport.width.to_string());
		let _ = svg.set_attribute("height", &viewport.height.to_string());

		if animate_init.borrow().is_some() {
			return;
		}
		let (session_anim, scene_anim, animate_inner) =
			(session_init.clone(), scene_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let ticked = session_anim.with(|s| s.step()).unwrap_or(false);
			if ticked {
				if let (Some(s), Some(scene)) =
					(session_anim.0.borrow().as_ref(), scene_anim.borrow().as_ref())
				{
					scene.update(s);
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let svg_element = move || svg_ref.get().map(Element::from);

	let (session_md, scene_md) = (session.clone(), scene.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(index) = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.get_attribute(NODE_INDEX_ATTR))
			.and_then(|v| v.parse::<usize>().ok())
		else {
			return;
		};
		ev.prevent_default();
		session_md.with(|s| {
			s.drag_start(index);
			if let Some(scene) = scene_md.borrow().as_ref() {
				scene.update(s);
			}
		});
	};

	let (session_mm, scene_mm) = (session.clone(), scene.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(svg) = svg_element() else {
			return;
		};
		let (x, y) = pointer(&svg, &ev);
		session_mm.with(|s| {
			if s.dragging().is_some() {
				s.drag_move(x, y);
				if let Some(scene) = scene_mm.borrow().as_ref() {
					scene.update(s);
				}
			}
		});
	};

	let session_mu = session.clone();
	let on_mouseup = move |_: MouseEvent| {
		session_mu.with(GraphSession::drag_end);
	};

	let session_ml = session;
	let on_mouseleave = move |_: MouseEvent| {
		session_ml.with(GraphSession::drag_end);
	};

	view! {
		<svg
			node_ref=svg_ref
			class="force-graph-svg"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
