//! Forces applied by [`Simulation`](super::simulation::Simulation) on every tick.
//!
//! Each force adjusts node velocities (or, for centring, positions) in place; the
//! simulation integrates afterwards.

use super::simulation::SimNode;

/// Deterministic linear congruential generator used to separate coincident nodes.
#[derive(Clone, Debug)]
pub struct Jiggle {
	state: u64,
}

impl Default for Jiggle {
	fn default() -> Self {
		Self { state: 1 }
	}
}

impl Jiggle {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	fn next_unit(&mut self) -> f64 {
		self.state = (Self::A * self.state + Self::C) % Self::M;
		self.state as f64 / Self::M as f64
	}

	/// A tiny non-zero offset.
	pub fn offset(&mut self) -> f64 {
		(self.next_unit() - 0.5) * 1e-6
	}

	fn or_offset(&mut self, v: f64) -> f64 {
		if v == 0.0 { self.offset() } else { v }
	}
}

pub trait Force {
	fn apply(&mut self, nodes: &mut [SimNode], alpha: f64, jiggle: &mut Jiggle);
}

/// Resolved edge between two node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
}

/// Spring along each link toward a rest distance.
#[derive(Clone, Debug)]
pub struct LinkForce {
	links: Vec<Link>,
	bias: Vec<f64>,
	distance: f64,
	strength: f64,
}

impl LinkForce {
	pub fn new(links: Vec<Link>, node_count: usize, distance: f64, strength: f64) -> Self {
		let mut degree = vec![0usize; node_count];
		for link in &links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		let bias = links
			.iter()
			.map(|l| {
				let (s, t) = (degree[l.source] as f64, degree[l.target] as f64);
				s / (s + t)
			})
			.collect();
		Self {
			links,
			bias,
			distance,
			strength,
		}
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn distance(&self) -> f64 {
		self.distance
	}

	pub fn set_distance(&mut self, distance: f64) {
		self.distance = distance;
	}

	pub fn strength(&self) -> f64 {
		self.strength
	}

	pub fn set_strength(&mut self, strength: f64) {
		self.strength = strength;
	}
}

impl Force for LinkForce {
	fn apply(&mut self, nodes: &mut [SimNode], alpha: f64, jiggle: &mut Jiggle) {
		for (link, &bias) in self.links.iter().zip(&self.bias) {
			let (s, t) = (nodes[link.source], nodes[link.target]);
			let x = jiggle.or_offset(t.x + t.vx - s.x - s.vx);
			let y = jiggle.or_offset(t.y + t.vy - s.y - s.vy);
			let len = (x * x + y * y).sqrt();
			let k = (len - self.distance) / len * alpha * self.strength;
			let (x, y) = (x * k, y * k);

			let target = &mut nodes[link.target];
			target.vx -= x * bias;
			target.vy -= y * bias;
			let source = &mut nodes[link.source];
			source.vx += x * (1.0 - bias);
			source.vy += y * (1.0 - bias);
		}
	}
}

/// Pairwise charge between every pair of nodes. Negative strength repels.
#[derive(Clone, Debug)]
pub struct ManyBodyForce {
	strength: f64,
	distance_min2: f64,
}

impl ManyBodyForce {
	pub fn new(strength: f64) -> Self {
		Self {
			strength,
			distance_min2: 1.0,
		}
	}

	pub fn strength(&self) -> f64 {
		self.strength
	}

	pub fn set_strength(&mut self, strength: f64) {
		self.strength = strength;
	}
}

impl Force for ManyBodyForce {
	fn apply(&mut self, nodes: &mut [SimNode], alpha: f64, jiggle: &mut Jiggle) {
		let w = self.strength * alpha;
		for i in 0..nodes.len() {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..nodes.len() {
				if i == j {
					continue;
				}
				let x = jiggle.or_offset(nodes[j].x - nodes[i].x);
				let y = jiggle.or_offset(nodes[j].y - nodes[i].y);
				let mut l = x * x + y * y;
				if l < self.distance_min2 {
					l = (self.distance_min2 * l).sqrt();
				}
				dvx += x * w / l;
				dvy += y * w / l;
			}
			nodes[i].vx += dvx;
			nodes[i].vy += dvy;
		}
	}
}

/// Moves the centroid of all nodes toward a fixed point.
#[derive(Clone, Debug)]
pub struct CenterForce {
	x: f64,
	y: f64,
	strength: f64,
}

impl CenterForce {
	pub fn new(x: f64, y: f64, strength: f64) -> Self {
		Self { x, y, strength }
	}

	pub fn target(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	pub fn set_target(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
	}

	pub fn strength(&self) -> f64 {
		self.strength
	}

	pub fn set_strength(&mut self, strength: f64) {
		self.strength = strength;
	}
}

impl Force for CenterForce {
	fn apply(&mut self, nodes: &mut [SimNode], _alpha: f64, _jiggle: &mut Jiggle) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let (sx, sy) = nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let dx = (sx / n - self.x) * self.strength;
		let dy = (sy / n - self.y) * self.strength;
		for node in nodes.iter_mut() {
			node.x -= dx;
			node.y -= dy;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(x: f64, y: f64) -> SimNode {
		SimNode::at(x, y)
	}

	#[test]
	fn jiggle_is_small_nonzero_and_repeatable() {
		let (mut a, mut b) = (Jiggle::default(), Jiggle::default());
		for _ in 0..100 {
			let v = a.offset();
			assert!(v != 0.0 && v.abs() <= 0.5e-6);
			assert_eq!(v, b.offset());
		}
	}

	#[test]
	fn link_pulls_stretched_pair_together() {
		let mut nodes = vec![node(0.0, 0.0), node(200.0, 0.0)];
		let mut force = LinkForce::new(vec![Link { source: 0, target: 1 }], 2, 100.0, 1.0);
		force.apply(&mut nodes, 1.0, &mut Jiggle::default());
		assert!(nodes[0].vx > 0.0);
		assert!(nodes[1].vx < 0.0);
		// equal degrees split the correction evenly
		assert!((nodes[0].vx + nodes[1].vx).abs() < 1e-12);
		assert!((nodes[0].vx - 50.0).abs() < 1e-9);
	}

	#[test]
	fn link_pushes_compressed_pair_apart() {
		let mut nodes = vec![node(0.0, 0.0), node(10.0, 0.0)];
		let mut force = LinkForce::new(vec![Link { source: 0, target: 1 }], 2, 100.0, 1.0);
		force.apply(&mut nodes, 1.0, &mut Jiggle::default());
		assert!(nodes[0].vx < 0.0);
		assert!(nodes[1].vx > 0.0);
	}

	#[test]
	fn negative_charge_separates_coincident_nodes() {
		let mut nodes = vec![node(50.0, 50.0); 3];
		ManyBodyForce::new(-300.0).apply(&mut nodes, 1.0, &mut Jiggle::default());
		for pair in nodes.windows(2) {
			assert!(pair[0].vx != pair[1].vx || pair[0].vy != pair[1].vy);
		}
	}

	#[test]
	fn negative_charge_repels() {
		let mut nodes = vec![node(0.0, 0.0), node(10.0, 0.0)];
		ManyBodyForce::new(-30.0).apply(&mut nodes, 1.0, &mut Jiggle::default());
		assert!(nodes[0].vx < 0.0);
		assert!(nodes[1].vx > 0.0);
	}

	#[test]
	fn center_moves_centroid_by_strength_fraction() {
		let mut nodes = vec![node(100.0, 0.0), node(300.0, 0.0)];
		CenterForce::new(0.0, 0.0, 0.5).apply(&mut nodes, 1.0, &mut Jiggle::default());
		assert_eq!(nodes[0].x, 0.0);
		assert_eq!(nodes[1].x, 200.0);
	}
}
