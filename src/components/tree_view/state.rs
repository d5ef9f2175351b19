//! Tree view session state and click handling.
//!
//! A [`TreeView`] owns everything one visualization needs: the hierarchy,
//! the scene with its in-flight transitions, the layout and the classifier.
//! It is created once when the component mounts and mutated only from the UI
//! thread, one event at a time.

use log::debug;

use super::classify::Classifier;
use super::config::VisualConfig;
use super::hierarchy::{Hierarchy, NodeId, Position, Toggle};
use super::layout::{Extent, TidyTree};
use super::scene::{Cycle, CycleStats, Frame, Phase, Scene, Viewport};

/// One interactive tree visualization.
pub struct TreeView {
	hierarchy: Hierarchy,
	scene: Scene,
	layout: TidyTree,
	classifier: Classifier,
	config: VisualConfig,
	/// The settled frame of the last transition has been handed out.
	painted_settled: bool,
}

impl TreeView {
	/// Seed the initial expansion and park the root's previous position where
	/// the first cycle's entering nodes emanate from. Nothing is rendered
	/// until [`TreeView::start`].
	pub fn new(mut hierarchy: Hierarchy, config: VisualConfig, classifier: Classifier) -> Self {
		hierarchy.seed(&config.initial_expansion);
		let root = hierarchy.root();
		hierarchy.node_mut(root).previous = Position::new(0.0, config.dy / 2.0);

		let initial = Viewport {
			top: -config.margins.top,
			height: config.dx,
		};
		Self {
			layout: TidyTree::new(config.dx, config.dy),
			scene: Scene::new(initial),
			hierarchy,
			classifier,
			config,
			painted_settled: false,
		}
	}

	/// The tree with its expansion state.
	pub fn hierarchy(&self) -> &Hierarchy {
		&self.hierarchy
	}

	/// Sprites and in-flight transitions.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Visual settings of this view.
	pub fn config(&self) -> &VisualConfig {
		&self.config
	}

	/// First render cycle, rooted at the root.
	pub fn start(&mut self, now: f64) -> CycleStats {
		let root = self.hierarchy.root();
		self.update(root, now, false)
	}

	/// Lay out the visible tree and schedule a transition from `origin`.
	pub fn update(&mut self, origin: NodeId, now: f64, slow_motion: bool) -> CycleStats {
		let extent = self.layout.layout(&mut self.hierarchy);
		let cycle = Cycle {
			origin,
			now,
			duration: self.config.duration(slow_motion),
			viewport: self.viewport_for(extent),
		};
		let stats = self.scene.render(&mut self.hierarchy, &self.classifier, cycle);
		self.painted_settled = false;
		debug!(
			"collapsible-tree: cycle from {} ({} entering, {} updating, {} exiting)",
			self.hierarchy.node(origin).name,
			stats.entering,
			stats.updating,
			stats.exiting
		);
		stats
	}

	/// Toggle the clicked node and re-render from it. Clicking a leaf does
	/// nothing and returns `None`.
	pub fn on_node_click(&mut self, id: NodeId, now: f64, slow_motion: bool) -> Option<CycleStats> {
		match self.hierarchy.toggle(id) {
			Toggle::Leaf => {
				debug!(
					"collapsible-tree: ignoring click on leaf {}",
					self.hierarchy.node(id).name
				);
				None
			}
			toggle => {
				debug!(
					"collapsible-tree: {:?} {}",
					toggle,
					self.hierarchy.node(id).name
				);
				Some(self.update(id, now, slow_motion))
			}
		}
	}

	/// Advance transitions; returns true while one is running.
	pub fn tick(&mut self, now: f64) -> bool {
		self.scene.advance(now)
	}

	/// Advance transitions and report whether the canvas needs repainting:
	/// every tick while a transition runs, then once more for its final frame.
	pub fn poll(&mut self, now: f64) -> bool {
		if self.tick(now) {
			return true;
		}
		!std::mem::replace(&mut self.painted_settled, true)
	}

	/// Sample the scene at `now`.
	pub fn frame(&self, now: f64) -> Frame<'_> {
		self.scene.sample(now)
	}

	/// Canvas window that fits `extent` plus margins.
	pub fn viewport_for(&self, extent: Extent) -> Viewport {
		let margins = &self.config.margins;
		Viewport {
			top: extent.min - margins.top,
			height: extent.span() + margins.top + margins.bottom,
		}
	}

	/// Map canvas pixels to layout space under the current viewport.
	pub fn canvas_to_layout(&self, x: f64, y: f64, now: f64) -> Position {
		let viewport = self.scene.sample(now).viewport;
		Position::new(x - self.config.margins.left, y + viewport.top)
	}

	/// Node under the canvas point, hitting either the circle or the label
	/// box. Fading-out nodes are not clickable.
	pub fn node_at(&self, x: f64, y: f64, now: f64) -> Option<NodeId> {
		let point = self.canvas_to_layout(x, y, now);
		let frame = self.scene.sample(now);
		let config = &self.config;
		let hit_radius = config.circle_radius + config.stroke_width + 2.0;

		frame
			.nodes
			.iter()
			.rev()
			.filter(|node| {
				self.scene
					.node(node.id)
					.is_some_and(|s| s.phase != Phase::Exiting)
			})
			.find(|node| {
				let d = node.look.position.depth - point.depth;
				let s = node.look.position.sibling - point.sibling;
				if (d * d + s * s).sqrt() <= hit_radius {
					return true;
				}
				let width = config.label_box_width(node.label);
				let half_height = config.label_box_height() / 2.0;
				let left = if node.branch { -width } else { 5.0 };
				d <= -left && d >= -(left + width) && s.abs() <= half_height
			})
			.map(|node| node.id)
	}
}
