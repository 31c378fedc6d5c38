//! Browser tests for the SVG scene. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use elasticity_sim::{GraphDocument, GraphSession, SvgScene, Viewport};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

const DOC: &str = r#"{
	"nodes": [
		{"id": "s", "name": "Static", "isStatic": true},
		{"id": "m", "name": "Moving"},
		{"id": "n", "name": "Other"}
	],
	"edges": [
		{"source": "s", "target": "m", "weight": 9},
		{"source": "m", "target": "n", "weight": 1}
	],
	"graphSettings": {"centerForce": 0.1, "repelForce": 300, "linkForce": 1, "linkDistance": 100}
}"#;

fn svg_root() -> Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let svg = document
		.create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
		.unwrap();
	document.body().unwrap().append_child(&svg).unwrap();
	svg
}

fn count(svg: &Element, selector: &str) -> u32 {
	svg.query_selector_all(selector).unwrap().length()
}

fn session() -> GraphSession {
	let doc = GraphDocument::from_json(DOC).unwrap();
	GraphSession::new(&doc, Viewport::new(600.0, 400.0)).unwrap()
}

#[wasm_bindgen_test]
fn one_element_per_node_and_edge() {
	let svg = svg_root();
	let scene = SvgScene::build(&svg, &session()).unwrap();
	assert_eq!(scene.element_counts(), [2, 3, 3, 2]);
	assert_eq!(count(&svg, "line"), 2);
	assert_eq!(count(&svg, "circle"), 3);
	assert_eq!(count(&svg, "text"), 5);
	let line = svg.query_selector("line").unwrap().unwrap();
	assert_eq!(line.get_attribute("stroke-width").as_deref(), Some("3"));
}

#[wasm_bindgen_test]
fn static_circle_stays_at_center() {
	let svg = svg_root();
	let mut s = session();
	let scene = SvgScene::build(&svg, &s).unwrap();
	for _ in 0..60 {
		s.step();
		scene.update(&s);
	}
	let circle = svg.query_selector("circle").unwrap().unwrap();
	assert_eq!(circle.get_attribute("cx").as_deref(), Some("300"));
	assert_eq!(circle.get_attribute("cy").as_deref(), Some("200"));
	assert_eq!(circle.get_attribute("data-index").as_deref(), Some("0"));
}

#[wasm_bindgen_test]
fn clear_then_rebuild_has_no_leftovers() {
	let svg = svg_root();
	let s = session();
	SvgScene::build(&svg, &s).unwrap();
	SvgScene::clear(&svg);
	assert_eq!(svg.child_element_count(), 0);
	SvgScene::build(&svg, &s).unwrap();
	assert_eq!(count(&svg, "circle"), 3);
	assert_eq!(count(&svg, "g"), 4);
	let first = svg.first_element_child().unwrap();
	assert_eq!(first.get_attribute("class").as_deref(), Some("links"));
}

#[wasm_bindgen_test]
fn rebuild_swaps_in_the_new_document() {
	let svg = svg_root();
	let mut slot = None;
	SvgScene::rebuild(&svg, &session(), &mut slot).unwrap();
	assert_eq!(slot.as_ref().map(SvgScene::element_counts), Some([2, 3, 3, 2]));

	let doc = GraphDocument::from_json(r#"{"nodes": [{"id": "x"}], "edges": []}"#).unwrap();
	let single = GraphSession::new(&doc, Viewport::new(600.0, 400.0)).unwrap();
	SvgScene::rebuild(&svg, &single, &mut slot).unwrap();
	assert_eq!(slot.as_ref().map(SvgScene::element_counts), Some([0, 1, 1, 0]));
	assert_eq!(count(&svg, "circle"), 1);
	assert_eq!(count(&svg, "g"), 4);
}
