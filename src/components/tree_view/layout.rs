//! Tidy tree layout over the visible part of the hierarchy.
//!
//! Implements the Reingold–Tilford algorithm in Buchheim's linear-time form
//! with fixed node extents: siblings sit one unit apart, cousins two, and
//! subtrees are pushed apart just enough not to overlap. Units are scaled by
//! `dx` on the sibling axis; depth is `depth * dy`. The root lands at sibling
//! coordinate 0.

use super::hierarchy::{Hierarchy, NodeId, Position};

/// Min/max sibling-axis coordinate across visible nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
	/// Smallest sibling-axis coordinate.
	pub min: f64,
	/// Largest sibling-axis coordinate.
	pub max: f64,
}

impl Extent {
	/// Distance between the outermost nodes.
	pub fn span(&self) -> f64 {
		self.max - self.min
	}
}

/// Layout with fixed per-node spacing.
#[derive(Clone, Copy, Debug)]
pub struct TidyTree {
	/// Sibling-axis spacing.
	pub dx: f64,
	/// Depth-axis spacing.
	pub dy: f64,
}

/// Per-node scratch state of the walk.
#[derive(Clone, Debug)]
struct Walker {
	node: Option<NodeId>,
	parent: Option<usize>,
	children: Vec<usize>,
	/// Index among siblings.
	number: usize,
	prelim: f64,
	modifier: f64,
	change: f64,
	shift: f64,
	thread: Option<usize>,
	ancestor: usize,
	default_ancestor: Option<usize>,
}

impl Walker {
	fn new(index: usize, node: Option<NodeId>, parent: Option<usize>, number: usize) -> Self {
		Self {
			node,
			parent,
			children: Vec::new(),
			number,
			prelim: 0.0,
			modifier: 0.0,
			change: 0.0,
			shift: 0.0,
			thread: None,
			ancestor: index,
			default_ancestor: None,
		}
	}
}

/// Walker index of the placeholder parent above the root.
const SENTINEL: usize = 0;
/// Walker index of the root.
const ROOT: usize = 1;

impl TidyTree {
	/// Layout with `dx` between siblings and `dy` between depths.
	pub fn new(dx: f64, dy: f64) -> Self {
		Self { dx, dy }
	}

	/// Assign `position` to every visible node and return the sibling-axis
	/// extent. Collapsed subtrees are left untouched.
	pub fn layout(&self, hierarchy: &mut Hierarchy) -> Extent {
		let mut walkers = build_walkers(hierarchy);
		let post_order = post_order(&walkers);

		for &v in &post_order {
			first_walk(&mut walkers, v);
		}
		walkers[SENTINEL].modifier = -walkers[ROOT].prelim;
		for v in pre_order(&walkers) {
			second_walk(&mut walkers, v);
		}

		let mut extent: Option<Extent> = None;
		for walker in &walkers[ROOT..] {
			let Some(id) = walker.node else { continue };
			let node = hierarchy.node_mut(id);
			let sibling = walker.prelim * self.dx;
			node.position = Position::new(node.depth as f64 * self.dy, sibling);
			extent = Some(match extent {
				Some(e) => Extent {
					min: e.min.min(sibling),
					max: e.max.max(sibling),
				},
				None => Extent {
					min: sibling,
					max: sibling,
				},
			});
		}
		extent.unwrap_or_default()
	}
}

/// Mirror the visible tree into a walker arena below a sentinel parent.
fn build_walkers(hierarchy: &Hierarchy) -> Vec<Walker> {
	let mut walkers = vec![
		Walker::new(SENTINEL, None, None, 0),
		Walker::new(ROOT, Some(hierarchy.root()), Some(SENTINEL), 0),
	];
	walkers[SENTINEL].children.push(ROOT);

	let mut stack = vec![ROOT];
	while let Some(index) = stack.pop() {
		let Some(id) = walkers[index].node else { continue };
		for (number, &child) in hierarchy.node(id).children().iter().enumerate() {
			let child_index = walkers.len();
			walkers.push(Walker::new(child_index, Some(child), Some(index), number));
			walkers[index].children.push(child_index);
			stack.push(child_index);
		}
	}
	walkers
}

fn pre_order(walkers: &[Walker]) -> Vec<usize> {
	let mut out = Vec::with_capacity(walkers.len());
	let mut stack = vec![ROOT];
	while let Some(v) = stack.pop() {
		out.push(v);
		stack.extend(walkers[v].children.iter().rev());
	}
	out
}

/// Children before parents, siblings left to right.
fn post_order(walkers: &[Walker]) -> Vec<usize> {
	let mut out = Vec::with_capacity(walkers.len());
	let mut stack = vec![ROOT];
	while let Some(v) = stack.pop() {
		out.push(v);
		stack.extend(walkers[v].children.iter());
	}
	out.reverse();
	out
}

fn separation(walkers: &[Walker], a: usize, b: usize) -> f64 {
	if walkers[a].parent == walkers[b].parent {
		1.0
	} else {
		2.0
	}
}

fn next_left(walkers: &[Walker], v: usize) -> Option<usize> {
	walkers[v].children.first().copied().or(walkers[v].thread)
}

fn next_right(walkers: &[Walker], v: usize) -> Option<usize> {
	walkers[v].children.last().copied().or(walkers[v].thread)
}

fn move_subtree(walkers: &mut [Walker], wm: usize, wp: usize, shift: f64) {
	let change = shift / (walkers[wp].number - walkers[wm].number) as f64;
	walkers[wp].change -= change;
	walkers[wp].shift += shift;
	walkers[wm].change += change;
	walkers[wp].prelim += shift;
	walkers[wp].modifier += shift;
}

fn execute_shifts(walkers: &mut [Walker], v: usize) {
	let (mut shift, mut change) = (0.0, 0.0);
	for i in (0..walkers[v].children.len()).rev() {
		let w = walkers[v].children[i];
		walkers[w].prelim += shift;
		walkers[w].modifier += shift;
		change += walkers[w].change;
		shift += walkers[w].shift + change;
	}
}

fn next_ancestor(walkers: &[Walker], vim: usize, v: usize, ancestor: usize) -> usize {
	let candidate = walkers[vim].ancestor;
	if walkers[candidate].parent == walkers[v].parent {
		candidate
	} else {
		ancestor
	}
}

fn first_walk(walkers: &mut [Walker], v: usize) {
	let Some(parent) = walkers[v].parent else { return };
	let number = walkers[v].number;
	let left = (number > 0).then(|| walkers[parent].children[number - 1]);

	if let (Some(&first), Some(&last)) = (walkers[v].children.first(), walkers[v].children.last()) {
		execute_shifts(walkers, v);
		let midpoint = (walkers[first].prelim + walkers[last].prelim) / 2.0;
		match left {
			Some(w) => {
				walkers[v].prelim = walkers[w].prelim + separation(walkers, v, w);
				walkers[v].modifier = walkers[v].prelim - midpoint;
			}
			None => walkers[v].prelim = midpoint,
		}
	} else if let Some(w) = left {
		walkers[v].prelim = walkers[w].prelim + separation(walkers, v, w);
	}

	let default = walkers[parent]
		.default_ancestor
		.unwrap_or(walkers[parent].children[0]);
	walkers[parent].default_ancestor = Some(apportion(walkers, v, left, default));
}

fn second_walk(walkers: &mut [Walker], v: usize) {
	let Some(parent) = walkers[v].parent else { return };
	let parent_modifier = walkers[parent].modifier;
	walkers[v].prelim += parent_modifier;
	walkers[v].modifier += parent_modifier;
}

/// Push the subtree at `v` clear of its left siblings' subtrees.
fn apportion(walkers: &mut [Walker], v: usize, left: Option<usize>, mut ancestor: usize) -> usize {
	let Some(w) = left else { return ancestor };
	let Some(parent) = walkers[v].parent else { return ancestor };

	// inner/outer contour of the right (p) and left (m) forests
	let (mut vip, mut vop, mut vim, mut vom) = (v, v, w, walkers[parent].children[0]);
	let (mut sip, mut sop, mut sim, mut som) = (
		walkers[vip].modifier,
		walkers[vop].modifier,
		walkers[vim].modifier,
		walkers[vom].modifier,
	);

	let mut next_im = next_right(walkers, vim);
	let mut next_ip = next_left(walkers, vip);
	while let (Some(im), Some(ip)) = (next_im, next_ip) {
		vim = im;
		vip = ip;
		if let Some(n) = next_left(walkers, vom) {
			vom = n;
		}
		if let Some(n) = next_right(walkers, vop) {
			vop = n;
		}
		walkers[vop].ancestor = v;

		let shift =
			walkers[vim].prelim + sim - walkers[vip].prelim - sip + separation(walkers, vim, vip);
		if shift > 0.0 {
			let from = next_ancestor(walkers, vim, v, ancestor);
			move_subtree(walkers, from, v, shift);
			sip += shift;
			sop += shift;
		}

		sim += walkers[vim].modifier;
		sip += walkers[vip].modifier;
		som += walkers[vom].modifier;
		sop += walkers[vop].modifier;

		next_im = next_right(walkers, vim);
		next_ip = next_left(walkers, vip);
	}

	if let Some(im) = next_im {
		if next_right(walkers, vop).is_none() {
			walkers[vop].thread = Some(im);
			walkers[vop].modifier += sim - sop;
		}
	}
	if let Some(ip) = next_ip {
		if next_left(walkers, vom).is_none() {
			walkers[vom].thread = Some(ip);
			walkers[vom].modifier += sip - som;
			ancestor = v;
		}
	}
	ancestor
}
