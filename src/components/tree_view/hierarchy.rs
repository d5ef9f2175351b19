//! Rooted tree built from the input document.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]. Ids are assigned once in
//! pre-order starting at 0 (the root), so the arena index doubles as the
//! stable identity used to join successive render cycles. Parents own their
//! children through the id lists in [`Expansion`]; the `parent` field is a
//! plain back-reference used for ancestry lookups only.

use crate::error::LoadError;

use super::config::InitialExpansion;
use super::types::RawRecord;

/// Stable node identity, equal to the node's pre-order index.
pub type NodeId = usize;

/// A point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Distance from the root along the depth axis.
	pub depth: f64,
	/// Offset along the sibling axis.
	pub sibling: f64,
}

impl Position {
	/// Point at `depth` and `sibling`.
	pub const fn new(depth: f64, sibling: f64) -> Self {
		Self { depth, sibling }
	}
}

/// Which child list of a node is populated.
///
/// A branch node is either showing its children or hiding them, never both,
/// so the two states carry the same list and toggling just moves it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
	/// No children at all.
	Leaf,
	/// Children are visible.
	Expanded(Vec<NodeId>),
	/// Children are hidden and restored on the next expand.
	Collapsed(Vec<NodeId>),
}

/// Outcome of toggling a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
	/// Children were hidden and are now shown.
	Expanded,
	/// Children were shown and are now hidden.
	Collapsed,
	/// The node is a true leaf; nothing changed.
	Leaf,
}

/// One entry of the hierarchy.
#[derive(Clone, Debug)]
pub struct TreeNode {
	/// Pre-order index, stable for the session.
	pub id: NodeId,
	/// Display label.
	pub name: String,
	/// `None` only for the root.
	pub parent: Option<NodeId>,
	/// Number of edges from the root.
	pub depth: usize,
	expansion: Expansion,
	/// Position computed by the most recent layout.
	pub position: Position,
	/// Position snapshot taken at the end of the previous render cycle.
	pub previous: Position,
}

impl TreeNode {
	/// Current expansion state.
	pub fn expansion(&self) -> &Expansion {
		&self.expansion
	}

	/// Children currently shown.
	pub fn children(&self) -> &[NodeId] {
		match &self.expansion {
			Expansion::Expanded(children) => children,
			_ => &[],
		}
	}

	/// Children currently hidden.
	pub fn hidden_children(&self) -> &[NodeId] {
		match &self.expansion {
			Expansion::Collapsed(children) => children,
			_ => &[],
		}
	}

	/// True when the node has no children, shown or hidden.
	pub fn is_leaf(&self) -> bool {
		matches!(self.expansion, Expansion::Leaf)
	}

	/// True while the node hides at least one child.
	pub fn is_collapsed(&self) -> bool {
		matches!(self.expansion, Expansion::Collapsed(_))
	}
}

/// The full tree, including collapsed subtrees.
#[derive(Clone, Debug)]
pub struct Hierarchy {
	nodes: Vec<TreeNode>,
}

impl Hierarchy {
	/// Build a tree from a nested record.
	///
	/// Every branch node starts collapsed, the root included; use
	/// [`Hierarchy::seed`] or [`Hierarchy::expand`] to open nodes afterwards.
	/// Fails with [`LoadError::MalformedInput`] on the first record without a
	/// `name`.
	pub fn build(root: &RawRecord) -> Result<Self, LoadError> {
		let mut nodes: Vec<TreeNode> = Vec::new();
		// (record, parent, path) in pre-order; children pushed in reverse.
		let mut stack: Vec<(&RawRecord, Option<NodeId>, String)> =
			vec![(root, None, "$".to_string())];

		while let Some((record, parent, path)) = stack.pop() {
			let name = record
				.name
				.clone()
				.ok_or_else(|| LoadError::MalformedInput(format!("record at {path} has no name")))?;
			let id = nodes.len();
			let depth = parent.map_or(0, |p| nodes[p].depth + 1);

			if let Some(parent) = parent {
				match &mut nodes[parent].expansion {
					Expansion::Collapsed(children) => children.push(id),
					expansion => *expansion = Expansion::Collapsed(vec![id]),
				}
			}

			nodes.push(TreeNode {
				id,
				name,
				parent,
				depth,
				expansion: Expansion::Leaf,
				position: Position::default(),
				previous: Position::default(),
			});

			for (i, child) in record.children().iter().enumerate().rev() {
				stack.push((child, Some(id), format!("{path}.children[{i}]")));
			}
		}

		Ok(Self { nodes })
	}

	/// Id of the root node.
	pub const fn root(&self) -> NodeId {
		0
	}

	/// Number of nodes, hidden ones included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always false for a built hierarchy.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node by id. Panics on ids not from this hierarchy.
	pub fn node(&self, id: NodeId) -> &TreeNode {
		&self.nodes[id]
	}

	/// Node by id, if it exists.
	pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
		self.nodes.get(id)
	}

	pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
		&mut self.nodes[id]
	}

	/// All nodes in id order, hidden ones included.
	pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
		self.nodes.iter()
	}

	/// First node (in pre-order) with the given name.
	pub fn find(&self, name: &str) -> Option<NodeId> {
		self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
	}

	/// The node itself followed by each ancestor up to the root.
	pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
		Ancestors {
			hierarchy: self,
			next: Some(id),
		}
	}

	/// Visible nodes in pre-order, i.e. everything reachable from the root
	/// through expanded children.
	pub fn visible(&self) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![self.root()];
		while let Some(id) = stack.pop() {
			out.push(id);
			stack.extend(self.nodes[id].children().iter().rev());
		}
		out
	}

	/// `(parent, child)` for every visible non-root node, in pre-order of the
	/// child.
	pub fn visible_links(&self) -> Vec<(NodeId, NodeId)> {
		self.visible()
			.into_iter()
			.filter_map(|id| self.nodes[id].parent.map(|p| (p, id)))
			.collect()
	}

	/// Show a node's hidden children. Returns false if it was not collapsed.
	pub fn expand(&mut self, id: NodeId) -> bool {
		let node = &mut self.nodes[id];
		match std::mem::replace(&mut node.expansion, Expansion::Leaf) {
			Expansion::Collapsed(children) => {
				node.expansion = Expansion::Expanded(children);
				true
			}
			other => {
				node.expansion = other;
				false
			}
		}
	}

	/// Hide a node's children. Returns false if it was not expanded.
	pub fn collapse(&mut self, id: NodeId) -> bool {
		let node = &mut self.nodes[id];
		match std::mem::replace(&mut node.expansion, Expansion::Leaf) {
			Expansion::Expanded(children) => {
				node.expansion = Expansion::Collapsed(children);
				true
			}
			other => {
				node.expansion = other;
				false
			}
		}
	}

	/// Flip a node between expanded and collapsed. Touches no other node.
	pub fn toggle(&mut self, id: NodeId) -> Toggle {
		match self.nodes[id].expansion {
			Expansion::Leaf => Toggle::Leaf,
			Expansion::Expanded(_) => {
				self.collapse(id);
				Toggle::Collapsed
			}
			Expansion::Collapsed(_) => {
				self.expand(id);
				Toggle::Expanded
			}
		}
	}

	/// Re-expand the nodes selected by `rule`.
	pub fn seed(&mut self, rule: &InitialExpansion) {
		let root = self.root();
		for id in 0..self.nodes.len() {
			let open = match rule {
				InitialExpansion::Root => id == root,
				InitialExpansion::All => true,
				InitialExpansion::NameLength(len) => {
					id == root || self.nodes[id].name.chars().count() == *len
				}
			};
			if open {
				self.expand(id);
			}
		}
	}

	/// Copy `position` into `previous` for every visible node.
	pub fn snapshot_positions(&mut self) {
		for id in self.visible() {
			let node = &mut self.nodes[id];
			node.previous = node.position;
		}
	}
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a> {
	hierarchy: &'a Hierarchy,
	next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = &'a TreeNode;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.hierarchy.get(self.next?)?;
		self.next = node.parent;
		Some(node)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sample() -> RawRecord {
		RawRecord::branch(
			"Root",
			vec![
				RawRecord::leaf("A"),
				RawRecord::branch("B", vec![RawRecord::leaf("C")]),
			],
		)
	}

	#[test]
	fn ids_follow_preorder() {
		let tree = Hierarchy::build(&sample()).unwrap();
		let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
		assert_eq!(names, vec!["Root", "A", "B", "C"]);
		assert_eq!(tree.node(3).parent, Some(2));
		assert_eq!(tree.node(3).depth, 2);
	}

	#[test]
	fn builds_fully_collapsed() {
		let tree = Hierarchy::build(&sample()).unwrap();
		assert_eq!(tree.node(0).expansion(), &Expansion::Collapsed(vec![1, 2]));
		assert_eq!(tree.node(1).expansion(), &Expansion::Leaf);
		assert_eq!(tree.node(2).expansion(), &Expansion::Collapsed(vec![3]));
		assert_eq!(tree.visible(), vec![0]);
	}

	#[test]
	fn missing_name_reports_path() {
		let doc = RawRecord::branch(
			"Root",
			vec![RawRecord::leaf("A"), RawRecord::default()],
		);
		let err = Hierarchy::build(&doc).unwrap_err();
		assert_eq!(
			err,
			LoadError::MalformedInput("record at $.children[1] has no name".into())
		);
	}

	#[test]
	fn toggle_moves_child_list() {
		let mut tree = Hierarchy::build(&sample()).unwrap();
		assert_eq!(tree.toggle(0), Toggle::Expanded);
		assert_eq!(tree.node(0).children(), &[1, 2]);
		assert!(tree.node(0).hidden_children().is_empty());
		assert_eq!(tree.toggle(0), Toggle::Collapsed);
		assert_eq!(tree.node(0).hidden_children(), &[1, 2]);
		assert_eq!(tree.toggle(1), Toggle::Leaf);
	}

	#[test]
	fn seed_by_name_length() {
		let doc = RawRecord::branch(
			"Root",
			vec![
				RawRecord::branch("seven77", vec![RawRecord::leaf("x")]),
				RawRecord::branch("six666", vec![RawRecord::leaf("y")]),
			],
		);
		let mut tree = Hierarchy::build(&doc).unwrap();
		tree.seed(&InitialExpansion::NameLength(7));
		let names: Vec<_> = tree
			.visible()
			.into_iter()
			.map(|id| tree.node(id).name.clone())
			.collect();
		assert_eq!(names, vec!["Root", "seven77", "x", "six666"]);
	}

	#[test]
	fn ancestors_walk_to_root() {
		let tree = Hierarchy::build(&sample()).unwrap();
		let chain: Vec<_> = tree.ancestors(3).map(|n| n.id).collect();
		assert_eq!(chain, vec![3, 2, 0]);
	}

	#[test]
	fn visible_links_follow_expansion() {
		let mut tree = Hierarchy::build(&sample()).unwrap();
		tree.seed(&InitialExpansion::All);
		assert_eq!(tree.visible_links(), vec![(0, 1), (0, 2), (2, 3)]);
	}
}
