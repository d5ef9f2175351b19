//! Property-based invariants of the tree model, layout and classifier.
//!
//! Verifies:
//! 1. Ids are unique, pre-order and stable across render cycles
//! 2. Expanded/collapsed exclusivity holds after build and any toggles
//! 3. Toggling twice restores the same child list
//! 4. Layout is idempotent for a fixed visible set
//! 5. Same-depth visible nodes never share a sibling-axis slot
//! 6. The classifier is pure

use collapsible_tree::components::tree_view::{
	Classifier, Expansion, Hierarchy, RawRecord, TidyTree, TreeView, VisualConfig,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_record() -> impl Strategy<Value = RawRecord> {
	let leaf = "[A-Za-z ]{1,8}".prop_map(RawRecord::leaf);
	leaf.prop_recursive(5, 64, 5, |inner| {
		("[A-Za-z ]{1,8}", prop::collection::vec(inner, 0..5))
			.prop_map(|(name, children)| RawRecord::branch(name, children))
	})
}

fn arb_tree_and_toggles() -> impl Strategy<Value = (RawRecord, Vec<prop::sample::Index>)> {
	(arb_record(), prop::collection::vec(any::<prop::sample::Index>(), 0..24))
}

fn record_count(record: &RawRecord) -> usize {
	1 + record
		.children
		.iter()
		.flatten()
		.map(record_count)
		.sum::<usize>()
}

/// Apply toggles to visible nodes only, like clicks would.
fn click_all(tree: &mut Hierarchy, toggles: &[prop::sample::Index]) {
	for index in toggles {
		let visible = tree.visible();
		let id = visible[index.index(visible.len())];
		tree.toggle(id);
	}
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
	#[test]
	fn ids_are_unique_preorder_indices(record in arb_record()) {
		let tree = Hierarchy::build(&record).unwrap();
		prop_assert_eq!(tree.len(), record_count(&record));
		for (index, node) in tree.iter().enumerate() {
			prop_assert_eq!(node.id, index);
			if let Some(parent) = node.parent {
				prop_assert!(parent < node.id);
			}
		}
	}

	#[test]
	fn ids_survive_render_cycles((record, toggles) in arb_tree_and_toggles()) {
		let tree = Hierarchy::build(&record).unwrap();
		let names: Vec<String> = tree.iter().map(|n| n.name.clone()).collect();
		let mut view = TreeView::new(tree, VisualConfig::default(), Classifier::default());
		view.start(0.0);
		for (i, index) in toggles.iter().enumerate() {
			let visible = view.hierarchy().visible();
			let id = visible[index.index(visible.len())];
			view.on_node_click(id, 100.0 * (i + 1) as f64, false);
		}
		let after: Vec<String> = view.hierarchy().iter().map(|n| n.name.clone()).collect();
		prop_assert_eq!(names, after);
		for sprite in view.scene().nodes() {
			prop_assert_eq!(&sprite.label, &view.hierarchy().node(sprite.id).name);
		}
	}

	#[test]
	fn expansion_is_exclusive((record, toggles) in arb_tree_and_toggles()) {
		let mut tree = Hierarchy::build(&record).unwrap();
		click_all(&mut tree, &toggles);
		for node in tree.iter() {
			let raw_children = node.children().len() + node.hidden_children().len();
			let has_raw_children = !matches!(node.expansion(), Expansion::Leaf);
			prop_assert_eq!(has_raw_children, raw_children > 0);
			prop_assert!(node.children().is_empty() || node.hidden_children().is_empty());
		}
	}

	#[test]
	fn double_toggle_round_trips((record, toggles) in arb_tree_and_toggles()) {
		let mut tree = Hierarchy::build(&record).unwrap();
		click_all(&mut tree, &toggles);
		for id in 0..tree.len() {
			let before = tree.node(id).expansion().clone();
			tree.toggle(id);
			tree.toggle(id);
			prop_assert_eq!(tree.node(id).expansion(), &before);
		}
	}

	#[test]
	fn layout_is_idempotent((record, toggles) in arb_tree_and_toggles()) {
		let mut tree = Hierarchy::build(&record).unwrap();
		click_all(&mut tree, &toggles);
		let layout = TidyTree::new(15.0, 200.0);
		let first_extent = layout.layout(&mut tree);
		let first: Vec<_> = tree.iter().map(|n| n.position).collect();
		let second_extent = layout.layout(&mut tree);
		let second: Vec<_> = tree.iter().map(|n| n.position).collect();
		prop_assert_eq!(first, second);
		prop_assert_eq!(first_extent, second_extent);
	}

	#[test]
	fn same_depth_nodes_do_not_overlap((record, toggles) in arb_tree_and_toggles()) {
		let mut tree = Hierarchy::build(&record).unwrap();
		click_all(&mut tree, &toggles);
		let dx = 15.0;
		let extent = TidyTree::new(dx, 200.0).layout(&mut tree);

		let visible = tree.visible();
		let mut by_depth: Vec<Vec<f64>> = Vec::new();
		for &id in &visible {
			let node = tree.node(id);
			if by_depth.len() <= node.depth {
				by_depth.resize(node.depth + 1, Vec::new());
			}
			by_depth[node.depth].push(node.position.sibling);
			let sibling = node.position.sibling;
			prop_assert!(sibling >= extent.min && sibling <= extent.max);
		}
		for mut row in by_depth {
			row.sort_by(|a, b| a.partial_cmp(b).unwrap());
			for pair in row.windows(2) {
				prop_assert!(pair[1] - pair[0] >= dx - 1e-6, "{:?}", pair);
			}
		}
	}

	#[test]
	fn classifier_is_pure((record, toggles) in arb_tree_and_toggles()) {
		let mut tree = Hierarchy::build(&record).unwrap();
		click_all(&mut tree, &toggles);
		let classifier = Classifier::default();
		let states: Vec<Expansion> = tree.iter().map(|n| n.expansion().clone()).collect();
		for id in 0..tree.len() {
			prop_assert_eq!(classifier.color_of(&tree, id), classifier.color_of(&tree, id));
		}
		let after: Vec<Expansion> = tree.iter().map(|n| n.expansion().clone()).collect();
		prop_assert_eq!(states, after);
	}
}
