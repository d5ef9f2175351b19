//! End-to-end scenarios over build, seed, toggle, layout and render.

use collapsible_tree::components::tree_view::{
	Classifier, Hierarchy, InitialExpansion, Phase, RawRecord, TreeView, VisualConfig,
};
use collapsible_tree::loader::{Reply, document_from_reply};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

#[fixture]
fn document() -> RawRecord {
	serde_json::from_str(
		r#"{"name":"Root","children":[{"name":"A"},{"name":"B","children":[{"name":"C"}]}]}"#,
	)
	.unwrap()
}

fn names(tree: &Hierarchy) -> Vec<String> {
	tree.visible()
		.into_iter()
		.map(|id| tree.node(id).name.clone())
		.collect()
}

fn view_of(document: &RawRecord) -> TreeView {
	let config = VisualConfig {
		initial_expansion: InitialExpansion::Root,
		..VisualConfig::default()
	};
	TreeView::new(
		Hierarchy::build(document).unwrap(),
		config,
		Classifier::default(),
	)
}

#[rstest]
fn expanding_root_then_b(document: RawRecord) {
	let mut tree = Hierarchy::build(&document).unwrap();
	assert_eq!(names(&tree), vec!["Root"]);

	tree.expand(tree.root());
	assert_eq!(names(&tree), vec!["Root", "A", "B"]);

	let b = tree.find("B").unwrap();
	tree.expand(b);
	assert_eq!(names(&tree), vec!["Root", "A", "B", "C"]);
}

#[rstest]
fn c_lands_one_level_deeper_without_overlapping_a(document: RawRecord) {
	let mut view = view_of(&document);
	view.start(0.0);
	let b = view.hierarchy().find("B").unwrap();
	view.on_node_click(b, 1000.0, false);

	let tree = view.hierarchy();
	let config = view.config();
	let (a, b, c) = (
		tree.node(tree.find("A").unwrap()),
		tree.node(tree.find("B").unwrap()),
		tree.node(tree.find("C").unwrap()),
	);
	assert_eq!(c.position.depth, b.position.depth + config.dy);
	assert!((c.position.sibling - a.position.sibling).abs() >= config.dx);
}

#[rstest]
fn clicking_a_leaf_changes_nothing(document: RawRecord) {
	let mut view = view_of(&document);
	view.start(0.0);
	let before_nodes = view.hierarchy().visible();
	let before_links = view.hierarchy().visible_links();

	let a = view.hierarchy().find("A").unwrap();
	assert_eq!(view.on_node_click(a, 500.0, false), None);
	assert_eq!(view.hierarchy().visible(), before_nodes);
	assert_eq!(view.hierarchy().visible_links(), before_links);
}

#[rstest]
fn collapse_fades_children_into_clicked_node(document: RawRecord) {
	let mut view = view_of(&document);
	view.start(0.0);
	let b = view.hierarchy().find("B").unwrap();
	view.on_node_click(b, 1000.0, false);
	view.tick(2000.0);

	let stats = view.on_node_click(b, 3000.0, false).unwrap();
	assert_eq!(stats.exiting, 1);
	let c = view.hierarchy().find("C").unwrap();
	assert_eq!(view.scene().node(c).map(|s| s.phase), Some(Phase::Exiting));

	assert!(view.tick(3100.0));
	assert!(!view.tick(3250.0));
	assert!(view.scene().node(c).is_none());
}

#[rstest]
#[case(404)]
#[case(500)]
#[case(301)]
fn failed_fetch_is_fetch_failure(#[case] status: u16) {
	let reply = Reply {
		status,
		body: "not even json".into(),
	};
	let err = document_from_reply("./processed_data.json", &reply).unwrap_err();
	assert!(err.is_fetch_failure());
}

#[rstest]
#[case(InitialExpansion::Root, 3)]
#[case(InitialExpansion::All, 4)]
#[case(InitialExpansion::NameLength(1), 4)]
fn initial_expansion_rules(
	document: RawRecord,
	#[case] rule: InitialExpansion,
	#[case] visible: usize,
) {
	let config = VisualConfig {
		initial_expansion: rule,
		..VisualConfig::default()
	};
	let view = TreeView::new(
		Hierarchy::build(&document).unwrap(),
		config,
		Classifier::default(),
	);
	assert_eq!(view.hierarchy().visible().len(), visible);
}
