//! Velocity-decay layout engine with alpha cooling.
//!
//! Every [`Simulation::tick`] decays `alpha` toward `alpha_target`, applies the
//! named forces in order (link, charge, center) and integrates node velocities.
//! Nodes with a fixed coordinate snap to it and keep zero velocity on that axis.

use super::forces::{CenterForce, Force, Jiggle, Link, LinkForce, ManyBodyForce};

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_DECAY: f64 = 0.4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

impl SimNode {
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			..Default::default()
		}
	}

	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	pub fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}
}

/// The three forces, addressable by name.
#[derive(Clone, Debug)]
pub struct Forces {
	pub link: LinkForce,
	pub charge: ManyBodyForce,
	pub center: CenterForce,
}

pub struct Simulation {
	nodes: Vec<SimNode>,
	forces: Forces,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	running: bool,
	jiggle: Jiggle,
}

impl Simulation {
	/// A running simulation at full energy.
	pub fn new(nodes: Vec<SimNode>, forces: Forces) -> Self {
		Self {
			nodes,
			forces,
			alpha: 1.0,
			alpha_min: ALPHA_MIN,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			alpha_target: 0.0,
			velocity_decay: 1.0 - VELOCITY_DECAY,
			running: true,
			jiggle: Jiggle::default(),
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn node(&self, index: usize) -> Option<&SimNode> {
		self.nodes.get(index)
	}

	pub fn node_mut(&mut self, index: usize) -> Option<&mut SimNode> {
		self.nodes.get_mut(index)
	}

	pub fn links(&self) -> &[Link] {
		self.forces.link.links()
	}

	pub fn forces(&self) -> &Forces {
		&self.forces
	}

	pub fn forces_mut(&mut self) -> &mut Forces {
		&mut self.forces
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) -> &mut Self {
		self.alpha = alpha;
		self
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) -> &mut Self {
		self.alpha_target = target;
		self
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn restart(&mut self) -> &mut Self {
		self.running = true;
		self
	}

	/// Halt the clock; `step` is a no-op until [`Simulation::restart`].
	pub fn stop(&mut self) -> &mut Self {
		self.running = false;
		self
	}

	/// Advance one integration step regardless of the clock state.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		let Forces {
			link,
			charge,
			center,
		} = &mut self.forces;
		link.apply(&mut self.nodes, self.alpha, &mut self.jiggle);
		charge.apply(&mut self.nodes, self.alpha, &mut self.jiggle);
		center.apply(&mut self.nodes, self.alpha, &mut self.jiggle);

		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= self.velocity_decay;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= self.velocity_decay;
					node.y += node.vy;
				}
			}
		}
	}

	/// One clocked step. Returns whether a tick happened; the clock stops itself once
	/// the layout has cooled below `alpha_min`.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		true
	}
}
