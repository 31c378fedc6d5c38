use std::collections::HashMap;

use log::{debug, info};

use super::drag::{DragGesture, PinRelease};
use super::forces::{CenterForce, Link, LinkForce, ManyBodyForce};
use super::simulation::{Forces, SimNode, Simulation};
use super::types::{GraphDocument, GraphSettings, NodeId};
use crate::config::{DEFAULT_SETTINGS, DRAG_ALPHA_TARGET, MOVING_NODE_COLOR, STATIC_NODE_COLOR};
use crate::error::GraphError;

/// Size of the drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Surface width.
	pub width: f64,
	/// Surface height.
	pub height: f64,
}

impl Viewport {
	/// Viewport of `width` by `height`.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Point where nodes start and the centre force pulls.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// The four slider-bound tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
	/// Pull toward the viewport centre.
	CenterForce,
	/// Pairwise repulsion, entered as a positive magnitude.
	RepelForce,
	/// Spring stiffness of every edge.
	LinkForce,
	/// Rest length of every edge.
	LinkDistance,
}

impl Parameter {
	/// Slider order.
	pub const ALL: [Parameter; 4] = [
		Parameter::CenterForce,
		Parameter::RepelForce,
		Parameter::LinkForce,
		Parameter::LinkDistance,
	];

	/// Element id of the bound slider.
	pub fn id(self) -> &'static str {
		match self {
			Parameter::CenterForce => "centerForce",
			Parameter::RepelForce => "repelForce",
			Parameter::LinkForce => "linkForce",
			Parameter::LinkDistance => "linkDistance",
		}
	}

	/// Read this tunable out of `settings`.
	pub fn get(self, settings: &GraphSettings) -> f64 {
		match self {
			Parameter::CenterForce => settings.center_force,
			Parameter::RepelForce => settings.repel_force,
			Parameter::LinkForce => settings.link_force,
			Parameter::LinkDistance => settings.link_distance,
		}
	}

	/// Write this tunable into `settings`.
	pub fn set(self, settings: &mut GraphSettings, value: f64) {
		match self {
			Parameter::CenterForce => settings.center_force = value,
			Parameter::RepelForce => settings.repel_force = value,
			Parameter::LinkForce => settings.link_force = value,
			Parameter::LinkDistance => settings.link_distance = value,
		}
	}
}

/// Render data for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
	pub name: String,
	pub is_static: bool,
	pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeInfo {
	pub weight: f64,
}

impl EdgeInfo {
	pub fn stroke_width(&self) -> f64 {
		self.weight.sqrt()
	}

	/// Weight with two decimals.
	pub fn label(&self) -> String {
		format!("{:.2}", self.weight)
	}
}

/// Straight segment between two drawn points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

impl Segment {
	pub fn midpoint(&self) -> (f64, f64) {
		((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
	}
}

/// One loaded graph and the simulation driving it.
pub struct GraphSession {
	nodes: Vec<NodeInfo>,
	edges: Vec<EdgeInfo>,
	simulation: Simulation,
	drag: DragGesture,
	viewport: Viewport,
}

impl GraphSession {
	/// Validate `doc` and lay every node out at the viewport centre. Static nodes are
	/// pinned there; an empty document starts with the clock stopped.
	pub fn new(doc: &GraphDocument, viewport: Viewport) -> Result<Self, GraphError> {
		doc.validate()?;
		let (cx, cy) = viewport.center();

		let mut id_to_idx = HashMap::with_capacity(doc.nodes.len());
		let mut nodes = Vec::with_capacity(doc.nodes.len());
		let mut sim_nodes = Vec::with_capacity(doc.nodes.len());
		for (i, node) in doc.nodes.iter().enumerate() {
			id_to_idx.insert(&node.id, i);
			let mut sim_node = SimNode::at(cx, cy);
			if node.is_static {
				sim_node.pin(cx, cy);
			}
			sim_nodes.push(sim_node);
			nodes.push(NodeInfo {
				name: node.display_name().to_string(),
				is_static: node.is_static,
				color: if node.is_static {
					STATIC_NODE_COLOR
				} else {
					MOVING_NODE_COLOR
				},
			});
		}

		let mut links = Vec::with_capacity(doc.edges.len());
		let mut edges = Vec::with_capacity(doc.edges.len());
		for (index, edge) in doc.edges.iter().enumerate() {
			let resolve = |id: &NodeId| {
				id_to_idx
					.get(id)
					.copied()
					.ok_or_else(|| GraphError::DanglingEdge {
						index,
						id: id.to_string(),
					})
			};
			links.push(Link {
				source: resolve(&edge.source)?,
				target: resolve(&edge.target)?,
			});
			edges.push(EdgeInfo {
				weight: edge.weight,
			});
		}

		let settings = doc.graph_settings;
		let forces = Forces {
			link: LinkForce::new(
				links,
				sim_nodes.len(),
				settings.link_distance,
				settings.link_force,
			),
			charge: ManyBodyForce::new(-settings.repel_force),
			center: CenterForce::new(cx, cy, settings.center_force),
		};

		info!(
			"graph initialized: {} nodes, {} edges",
			nodes.len(),
			edges.len()
		);
		let mut simulation = Simulation::new(sim_nodes, forces);
		if nodes.is_empty() {
			simulation.stop();
		}
		Ok(Self {
			nodes,
			edges,
			simulation,
			drag: DragGesture::Idle,
			viewport,
		})
	}

	/// Swap in a freshly built session for `doc`. The current session is untouched on error.
	pub fn replace(&mut self, doc: &GraphDocument) -> Result<(), GraphError> {
		*self = Self::new(doc, self.viewport)?;
		Ok(())
	}

	/// Current drawing surface.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Re-target the centre force at the new viewport centre.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		let (cx, cy) = viewport.center();
		self.simulation.forces_mut().center.set_target(cx, cy);
		self.simulation.set_alpha(1.0).restart();
	}

	/// The engine, read-only.
	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Render data per node, in document order.
	pub fn nodes(&self) -> &[NodeInfo] {
		&self.nodes
	}

	/// Render data per edge, in document order.
	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	/// One clocked simulation step; `false` once the layout has cooled.
	pub fn step(&mut self) -> bool {
		self.simulation.step()
	}

	// Parameters

	/// Push a slider value into the matching force and re-equilibrate at full energy.
	pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> Result<(), GraphError> {
		if !value.is_finite() {
			return Err(GraphError::InvalidParameter {
				parameter: parameter.id(),
				value,
			});
		}
		let forces = self.simulation.forces_mut();
		match parameter {
			Parameter::CenterForce => forces.center.set_strength(value),
			Parameter::RepelForce => forces.charge.set_strength(-value),
			Parameter::LinkForce => forces.link.set_strength(value),
			Parameter::LinkDistance => forces.link.set_distance(value),
		}
		debug!("{} = {value}", parameter.id());
		self.simulation.set_alpha(1.0).restart();
		Ok(())
	}

	/// Value currently applied by the engine, in slider units.
	pub fn parameter(&self, parameter: Parameter) -> f64 {
		let forces = self.simulation.forces();
		match parameter {
			Parameter::CenterForce => forces.center.strength(),
			Parameter::RepelForce => -forces.charge.strength(),
			Parameter::LinkForce => forces.link.strength(),
			Parameter::LinkDistance => forces.link.distance(),
		}
	}

	/// All four tunables as the engine currently applies them.
	pub fn settings(&self) -> GraphSettings {
		let mut settings = GraphSettings::default();
		for parameter in Parameter::ALL {
			parameter.set(&mut settings, self.parameter(parameter));
		}
		settings
	}

	/// Restore every tunable to its default and restart at full energy.
	pub fn reset_parameters(&mut self) -> GraphSettings {
		let forces = self.simulation.forces_mut();
		forces.center.set_strength(DEFAULT_SETTINGS.center_force);
		forces.charge.set_strength(-DEFAULT_SETTINGS.repel_force);
		forces.link.set_strength(DEFAULT_SETTINGS.link_force);
		forces.link.set_distance(DEFAULT_SETTINGS.link_distance);
		self.simulation.set_alpha(1.0).restart();
		debug!("parameters reset");
		DEFAULT_SETTINGS
	}

	// Drag

	/// Index of the node under an active drag.
	pub fn dragging(&self) -> Option<usize> {
		self.drag.node()
	}

	/// Pin `index` at its current position and warm the layout up.
	pub fn drag_start(&mut self, index: usize) {
		let Some(info) = self.nodes.get(index) else {
			return;
		};
		let is_static = info.is_static;
		if self.drag.is_active() {
			self.finish_gesture();
		}
		if self.drag.start(index, is_static) {
			self.simulation.set_alpha_target(DRAG_ALPHA_TARGET).restart();
		}
		if let Some(node) = self.simulation.node_mut(index) {
			let (x, y) = (node.x, node.y);
			node.pin(x, y);
		}
	}

	/// Move the pin of the dragged node to the pointer.
	pub fn drag_move(&mut self, x: f64, y: f64) {
		let Some(index) = self.drag.node() else {
			return;
		};
		if let Some(node) = self.simulation.node_mut(index) {
			node.pin(x, y);
		}
	}

	/// Cool the layout and release the node unless it is static.
	pub fn drag_end(&mut self) {
		if self.finish_gesture() {
			self.simulation.set_alpha_target(0.0);
		}
	}

	fn finish_gesture(&mut self) -> bool {
		let Some((index, release)) = self.drag.end() else {
			return false;
		};
		if release == PinRelease::Release {
			if let Some(node) = self.simulation.node_mut(index) {
				node.unpin();
			}
		}
		true
	}

	// Geometry

	/// Drawn position: the fixed position for static nodes, the free one otherwise.
	pub fn node_position(&self, index: usize) -> Option<(f64, f64)> {
		let node = self.simulation.node(index)?;
		let info = self.nodes.get(index)?;
		Some(match (info.is_static, node.fx, node.fy) {
			(true, Some(fx), Some(fy)) => (fx, fy),
			_ => (node.x, node.y),
		})
	}

	/// Endpoints of edge `index` at their current positions.
	pub fn edge_segment(&self, index: usize) -> Option<Segment> {
		let link = self.simulation.links().get(index)?;
		let (s, t) = (
			self.simulation.node(link.source)?,
			self.simulation.node(link.target)?,
		);
		Some(Segment {
			x1: s.x,
			y1: s.y,
			x2: t.x,
			y2: t.y,
		})
	}

	/// Where the weight label of edge `index` is drawn.
	pub fn weight_label_position(&self, index: usize) -> Option<(f64, f64)> {
		self.edge_segment(index).map(|s| s.midpoint())
	}
}
