//! Keyed enter/update/exit transitions between render cycles.
//!
//! The scene holds one sprite per node and per link that is on screen,
//! including sprites still fading out. Each render cycle joins the newly
//! visible nodes against the sprites by node id:
//!
//! - **Entering** sprites start at the interaction origin's previous position
//!   with zero opacity.
//! - **Updating** sprites start wherever they are drawn right now, which may
//!   be mid-flight if the previous transition has not finished.
//! - **Exiting** sprites travel to the origin's new position, fade out and
//!   are dropped once the transition completes.
//!
//! All sprites share one timing window per cycle; a new cycle supersedes the
//! old one by re-targeting every sprite from its current sample.

use std::collections::BTreeMap;

use super::classify::Classifier;
use super::hierarchy::{Hierarchy, NodeId, Position};
use super::theme::Color;

/// Values that can be interpolated.
pub trait Lerp: Copy {
	/// Value `t` of the way from `self` to `to`.
	fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
	fn lerp(self, to: Self, t: f64) -> Self {
		self + (to - self) * t
	}
}

impl Lerp for Position {
	fn lerp(self, to: Self, t: f64) -> Self {
		Position::new(self.depth.lerp(to.depth, t), self.sibling.lerp(to.sibling, t))
	}
}

impl Lerp for Color {
	fn lerp(self, to: Self, t: f64) -> Self {
		Color::lerp(self, to, t)
	}
}

/// Cubic in-out easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0) * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// Start and end value of one animated property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
	/// Value at the start of the cycle.
	pub from: T,
	/// Value at the end of the cycle.
	pub to: T,
}

impl<T: Lerp> Tween<T> {
	/// Tween that stays at `value`.
	pub fn settled(value: T) -> Self {
		Self {
			from: value,
			to: value,
		}
	}

	/// Value at eased progress `t`. Exact at both ends.
	pub fn sample(&self, t: f64) -> T {
		if t <= 0.0 {
			self.from
		} else if t >= 1.0 {
			self.to
		} else {
			self.from.lerp(self.to, t)
		}
	}
}

/// Timing window of the current render cycle, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
	/// Clock time the cycle began.
	pub start: f64,
	/// Length of the cycle.
	pub duration: f64,
}

impl Timing {
	/// Linear progress in [0, 1].
	pub fn progress(&self, now: f64) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		((now - self.start) / self.duration).clamp(0.0, 1.0)
	}

	/// Eased progress in [0, 1].
	pub fn eased(&self, now: f64) -> f64 {
		ease_cubic_in_out(self.progress(now))
	}

	/// True once progress has reached 1.
	pub fn is_finished(&self, now: f64) -> bool {
		self.progress(now) >= 1.0
	}
}

/// Role of a sprite in the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// New this cycle.
	Entering,
	/// Visible before and after.
	Updating,
	/// Fading out, dropped when the cycle ends.
	Exiting,
}

/// Animated look of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLook {
	/// Circle center.
	pub position: Position,
	/// 0 when invisible, 1 when fully shown.
	pub opacity: f64,
	/// Circle and label box fill.
	pub color: Color,
}

impl Lerp for NodeLook {
	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			position: self.position.lerp(to.position, t),
			opacity: self.opacity.lerp(to.opacity, t),
			color: self.color.lerp(to.color, t),
		}
	}
}

/// Animated look of a link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkLook {
	/// Parent end.
	pub source: Position,
	/// Child end.
	pub target: Position,
	/// Multiplied into the theme's link opacity.
	pub opacity: f64,
	/// Stroke color, from the parent's category.
	pub color: Color,
}

impl Lerp for LinkLook {
	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			source: self.source.lerp(to.source, t),
			target: self.target.lerp(to.target, t),
			opacity: self.opacity.lerp(to.opacity, t),
			color: self.color.lerp(to.color, t),
		}
	}
}

/// Visible window on the sibling axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Sibling-axis coordinate drawn at the top edge of the canvas.
	pub top: f64,
	/// Canvas height.
	pub height: f64,
}

impl Lerp for Viewport {
	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			top: self.top.lerp(to.top, t),
			height: self.height.lerp(to.height, t),
		}
	}
}

/// On-screen representation of a node.
#[derive(Clone, Debug)]
pub struct NodeSprite {
	/// Node this sprite draws.
	pub id: NodeId,
	/// Label text.
	pub label: String,
	/// Has children, shown or hidden.
	pub branch: bool,
	/// Role in the current cycle.
	pub phase: Phase,
	/// Start and end look for the current cycle.
	pub look: Tween<NodeLook>,
}

/// On-screen representation of the link into `target` from its parent.
#[derive(Clone, Debug)]
pub struct LinkSprite {
	/// Child end of the link.
	pub target: NodeId,
	/// Role in the current cycle.
	pub phase: Phase,
	/// Start and end look for the current cycle.
	pub look: Tween<LinkLook>,
}

/// Sprite counts of one render cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
	/// Sprites created this cycle.
	pub entering: usize,
	/// Sprites re-targeted this cycle.
	pub updating: usize,
	/// Sprites fading out this cycle.
	pub exiting: usize,
}

impl CycleStats {
	fn count(&mut self, phase: Phase) {
		match phase {
			Phase::Entering => self.entering += 1,
			Phase::Updating => self.updating += 1,
			Phase::Exiting => self.exiting += 1,
		}
	}
}

/// Inputs of one render cycle besides the tree.
#[derive(Clone, Copy, Debug)]
pub struct Cycle {
	/// Node the interaction happened on.
	pub origin: NodeId,
	/// Clock time the cycle begins.
	pub now: f64,
	/// Length of the transition.
	pub duration: f64,
	/// Viewport the canvas should end up at.
	pub viewport: Viewport,
}

/// Node as drawn in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeFrame<'a> {
	/// Node drawn.
	pub id: NodeId,
	/// Label text.
	pub label: &'a str,
	/// Has children, shown or hidden.
	pub branch: bool,
	/// Sampled look.
	pub look: NodeLook,
}

/// Link as drawn in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkFrame {
	/// Child end of the link.
	pub target: NodeId,
	/// Sampled look.
	pub look: LinkLook,
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
	/// Canvas window.
	pub viewport: Viewport,
	/// Links, drawn first.
	pub links: Vec<LinkFrame>,
	/// Nodes, drawn over the links.
	pub nodes: Vec<NodeFrame<'a>>,
}

/// Render tree with in-flight transitions.
#[derive(Clone, Debug)]
pub struct Scene {
	nodes: BTreeMap<NodeId, NodeSprite>,
	links: BTreeMap<NodeId, LinkSprite>,
	viewport: Tween<Viewport>,
	timing: Timing,
}

impl Scene {
	/// Empty scene showing `viewport`.
	pub fn new(viewport: Viewport) -> Self {
		Self {
			nodes: BTreeMap::new(),
			links: BTreeMap::new(),
			viewport: Tween::settled(viewport),
			timing: Timing {
				start: 0.0,
				duration: 0.0,
			},
		}
	}

	/// Sprite of a node, including one that is fading out.
	pub fn node(&self, id: NodeId) -> Option<&NodeSprite> {
		self.nodes.get(&id)
	}

	/// Sprite of the link into `target`.
	pub fn link(&self, target: NodeId) -> Option<&LinkSprite> {
		self.links.get(&target)
	}

	/// All node sprites in id order.
	pub fn nodes(&self) -> impl Iterator<Item = &NodeSprite> {
		self.nodes.values()
	}

	/// All link sprites in target order.
	pub fn links(&self) -> impl Iterator<Item = &LinkSprite> {
		self.links.values()
	}

	/// Timing window of the latest cycle.
	pub fn timing(&self) -> Timing {
		self.timing
	}

	/// Join the visible tree against the scene and schedule a transition.
	///
	/// Reads positions computed by the last layout, then snapshots them into
	/// `previous` for the next cycle. Tree topology is not modified.
	pub fn render(
		&mut self,
		hierarchy: &mut Hierarchy,
		classifier: &Classifier,
		cycle: Cycle,
	) -> CycleStats {
		let t = self.timing.eased(cycle.now);
		let origin = hierarchy.node(cycle.origin);
		let (origin_from, origin_to) = (origin.previous, origin.position);
		let visible = hierarchy.visible();
		let mut stats = CycleStats::default();

		let mut seen_nodes = BTreeMap::new();
		for &id in &visible {
			let node = hierarchy.node(id);
			let target = NodeLook {
				position: node.position,
				opacity: 1.0,
				color: classifier.color_of(hierarchy, id),
			};
			let sprite = match self.nodes.remove(&id) {
				Some(mut sprite) => {
					sprite.look = Tween {
						from: sprite.look.sample(t),
						to: target,
					};
					sprite.phase = Phase::Updating;
					sprite
				}
				None => NodeSprite {
					id,
					label: node.name.clone(),
					branch: !node.is_leaf(),
					phase: Phase::Entering,
					look: Tween {
						from: NodeLook {
							position: origin_from,
							opacity: 0.0,
							..target
						},
						to: target,
					},
				},
			};
			stats.count(sprite.phase);
			seen_nodes.insert(id, sprite);
		}
		for (id, mut sprite) in std::mem::take(&mut self.nodes) {
			let current = sprite.look.sample(t);
			sprite.look = Tween {
				from: current,
				to: NodeLook {
					position: origin_to,
					opacity: 0.0,
					..current
				},
			};
			sprite.phase = Phase::Exiting;
			stats.count(Phase::Exiting);
			seen_nodes.insert(id, sprite);
		}
		self.nodes = seen_nodes;

		let mut seen_links = BTreeMap::new();
		for (parent, child) in hierarchy.visible_links() {
			let target = LinkLook {
				source: hierarchy.node(parent).position,
				target: hierarchy.node(child).position,
				opacity: 1.0,
				color: classifier.color_of(hierarchy, parent),
			};
			let sprite = match self.links.remove(&child) {
				Some(mut sprite) => {
					sprite.look = Tween {
						from: sprite.look.sample(t),
						to: target,
					};
					sprite.phase = Phase::Updating;
					sprite
				}
				None => LinkSprite {
					target: child,
					phase: Phase::Entering,
					look: Tween {
						from: LinkLook {
							source: origin_from,
							target: origin_from,
							opacity: 0.0,
							..target
						},
						to: target,
					},
				},
			};
			seen_links.insert(child, sprite);
		}
		for (child, mut sprite) in std::mem::take(&mut self.links) {
			let current = sprite.look.sample(t);
			sprite.look = Tween {
				from: current,
				to: LinkLook {
					source: origin_to,
					target: origin_to,
					opacity: 0.0,
					..current
				},
			};
			sprite.phase = Phase::Exiting;
			seen_links.insert(child, sprite);
		}
		self.links = seen_links;

		self.viewport = Tween {
			from: self.viewport.sample(t),
			to: cycle.viewport,
		};
		self.timing = Timing {
			start: cycle.now,
			duration: cycle.duration,
		};

		hierarchy.snapshot_positions();
		stats
	}

	/// Drop sprites whose exit transition has completed. Returns true while a
	/// transition is still running.
	pub fn advance(&mut self, now: f64) -> bool {
		if !self.timing.is_finished(now) {
			return true;
		}
		self.nodes.retain(|_, sprite| sprite.phase != Phase::Exiting);
		self.links.retain(|_, sprite| sprite.phase != Phase::Exiting);
		false
	}

	/// Sample every sprite at `now`.
	pub fn sample(&self, now: f64) -> Frame<'_> {
		let t = self.timing.eased(now);
		Frame {
			viewport: self.viewport.sample(t),
			links: self
				.links
				.values()
				.map(|sprite| LinkFrame {
					target: sprite.target,
					look: sprite.look.sample(t),
				})
				.collect(),
			nodes: self
				.nodes
				.values()
				.map(|sprite| NodeFrame {
					id: sprite.id,
					label: &sprite.label,
					branch: sprite.branch,
					look: sprite.look.sample(t),
				})
				.collect(),
		}
	}
}
