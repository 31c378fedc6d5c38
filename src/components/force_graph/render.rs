use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::state::GraphSession;
use crate::config::{NAME_FONT_SIZE, NODE_RADIUS, WEIGHT_FONT_SIZE};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Attribute naming the node index on each circle, read back for hit testing.
pub const NODE_INDEX_ATTR: &str = "data-index";

/// SVG elements mirroring one [`GraphSession`], one element per node or edge in each layer.
pub struct SvgScene {
	links: Vec<Element>,
	circles: Vec<Element>,
	names: Vec<Element>,
	weights: Vec<Element>,
}

fn create(document: &Document, tag: &str) -> Result<Element, JsValue> {
	document.create_element_ns(Some(SVG_NS), tag)
}

fn set_attrs(el: &Element, attrs: &[(&str, &str)]) -> Result<(), JsValue> {
	for (name, value) in attrs {
		el.set_attribute(name, value)?;
	}
	Ok(())
}

fn set_num(el: &Element, name: &str, value: f64) {
	let _ = el.set_attribute(name, &value.to_string());
}

impl SvgScene {
	/// Append the four layers (lines, circles, names, weights) under `svg`.
	pub fn build(svg: &Element, session: &GraphSession) -> Result<Self, JsValue> {
		let document = svg
			.owner_document()
			.ok_or_else(|| JsValue::from_str("svg root is detached"))?;
		let layer = |class: &str| -> Result<Element, JsValue> {
			let g = create(&document, "g")?;
			g.set_attribute("class", class)?;
			svg.append_child(&g)?;
			Ok(g)
		};
		let (link_layer, node_layer, name_layer, weight_layer) =
			(layer("links")?, layer("nodes")?, layer("names")?, layer("weights")?);

		let mut links = Vec::with_capacity(session.edge_count());
		let mut weights = Vec::with_capacity(session.edge_count());
		for edge in session.edges() {
			let line = create(&document, "line")?;
			set_attrs(
				&line,
				&[
					("stroke", "#ffffff"),
					("stroke-opacity", "0.6"),
					("stroke-width", &edge.stroke_width().to_string()),
				],
			)?;
			link_layer.append_child(&line)?;
			links.push(line);

			let text = create(&document, "text")?;
			set_attrs(
				&text,
				&[
					("font-size", &WEIGHT_FONT_SIZE.to_string()),
					("fill", "#ffffff"),
					("text-anchor", "middle"),
				],
			)?;
			text.set_text_content(Some(&edge.label()));
			weight_layer.append_child(&text)?;
			weights.push(text);
		}

		let mut circles = Vec::with_capacity(session.node_count());
		let mut names = Vec::with_capacity(session.node_count());
		for (i, node) in session.nodes().iter().enumerate() {
			let circle = create(&document, "circle")?;
			set_attrs(
				&circle,
				&[
					("r", &NODE_RADIUS.to_string()),
					("fill", node.color),
					("class", "neon"),
					(NODE_INDEX_ATTR, &i.to_string()),
				],
			)?;
			node_layer.append_child(&circle)?;
			circles.push(circle);

			let text = create(&document, "text")?;
			set_attrs(
				&text,
				&[
					("font-size", &NAME_FONT_SIZE.to_string()),
					("dx", "8"),
					("dy", "3"),
					("fill", "#ffffff"),
				],
			)?;
			text.set_text_content(Some(&node.name));
			name_layer.append_child(&text)?;
			names.push(text);
		}

		let scene = Self {
			links,
			circles,
			names,
			weights,
		};
		scene.update(session);
		Ok(scene)
	}

	/// Write the current positions into every element.
	pub fn update(&self, session: &GraphSession) {
		for (i, (line, weight)) in self.links.iter().zip(&self.weights).enumerate() {
			let Some(seg) = session.edge_segment(i) else {
				continue;
			};
			set_num(line, "x1", seg.x1);
			set_num(line, "y1", seg.y1);
			set_num(line, "x2", seg.x2);
			set_num(line, "y2", seg.y2);
			let (mx, my) = seg.midpoint();
			set_num(weight, "x", mx);
			set_num(weight, "y", my);
		}

		for (i, (circle, name)) in self.circles.iter().zip(&self.names).enumerate() {
			let Some((x, y)) = session.node_position(i) else {
				continue;
			};
			set_num(circle, "cx", x);
			set_num(circle, "cy", y);
			set_num(name, "x", x);
			set_num(name, "y", y);
		}
	}

	/// Tear down whatever `svg` holds and build a scene for `session` into `slot`.
	/// The slot is emptied first, so a failed build never leaves the previous scene in it.
	pub fn rebuild(
		svg: &Element,
		session: &GraphSession,
		slot: &mut Option<SvgScene>,
	) -> Result<(), JsValue> {
		*slot = None;
		Self::clear(svg);
		*slot = Some(Self::build(svg, session)?);
		Ok(())
	}

	/// Element count per layer: lines, circles, names, weights.
	pub fn element_counts(&self) -> [usize; 4] {
		[
			self.links.len(),
			self.circles.len(),
			self.names.len(),
			self.weights.len(),
		]
	}

	/// Remove every child of `svg`.
	pub fn clear(svg: &Element) {
		while let Some(child) = svg.first_child() {
			let _ = svg.remove_child(&child);
		}
	}
}
