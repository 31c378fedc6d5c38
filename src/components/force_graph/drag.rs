//! Pointer drag gesture over a single node.
//!
//! ```text
//! Idle --start--> Dragging --end--> Idle
//! ```
//!
//! Static nodes stay pinned wherever the gesture leaves them.

/// What happens to a node's fixed position when its gesture ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRelease {
	/// Clear the pin so the node moves freely again.
	Release,
	/// Leave the pin in place; the node is permanently static.
	Keep,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragGesture {
	#[default]
	Idle,
	Dragging {
		node: usize,
		on_release: PinRelease,
	},
}

impl DragGesture {
	pub fn is_active(&self) -> bool {
		matches!(self, Self::Dragging { .. })
	}

	/// Node following the pointer, if a gesture is in progress.
	pub fn node(&self) -> Option<usize> {
		match self {
			Self::Idle => None,
			Self::Dragging { node, .. } => Some(*node),
		}
	}

	/// Begin dragging `node`. Returns `true` when this started a new gesture, in which
	/// case the simulation should be warmed up.
	pub fn start(&mut self, node: usize, is_static: bool) -> bool {
		let was_idle = !self.is_active();
		let on_release = if is_static {
			PinRelease::Keep
		} else {
			PinRelease::Release
		};
		*self = Self::Dragging { node, on_release };
		was_idle
	}

	/// Finish the gesture, yielding the node and what to do with its pin.
	pub fn end(&mut self) -> Option<(usize, PinRelease)> {
		match std::mem::take(self) {
			Self::Idle => None,
			Self::Dragging { node, on_release } => Some((node, on_release)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn movable_node_is_released() {
		let mut drag = DragGesture::default();
		assert!(drag.start(3, false));
		assert_eq!(drag.node(), Some(3));
		assert_eq!(drag.end(), Some((3, PinRelease::Release)));
		assert_eq!(drag, DragGesture::Idle);
	}

	#[test]
	fn static_node_keeps_its_pin() {
		let mut drag = DragGesture::default();
		drag.start(0, true);
		assert_eq!(drag.end(), Some((0, PinRelease::Keep)));
	}

	#[test]
	fn stray_events_while_idle_are_ignored() {
		let mut drag = DragGesture::default();
		assert_eq!(drag.node(), None);
		assert_eq!(drag.end(), None);
	}

	#[test]
	fn restart_while_dragging_does_not_reheat() {
		let mut drag = DragGesture::default();
		assert!(drag.start(1, false));
		assert!(!drag.start(2, false));
		assert_eq!(drag.node(), Some(2));
	}
}
