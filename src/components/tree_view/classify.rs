//! Ancestry-based category coloring.
//!
//! A node's color comes from the first rule in an ordered table whose
//! category name appears anywhere on the node's ancestor chain (the node
//! itself included). Rule order wins over ancestor proximity: a node under
//! both "Creative Code Frameworks" and "Real-time 3D/Game Engines" takes the
//! color of whichever rule is listed first.

use super::hierarchy::{Hierarchy, NodeId};
use super::theme::{Color, Theme, named};

/// Maps one category (an ancestor name) to a color.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRule {
	/// Name that must appear on the ancestor chain.
	pub ancestor: String,
	/// Color for nodes under that ancestor.
	pub color: Color,
}

impl CategoryRule {
	/// Rule coloring everything under `ancestor`.
	pub fn new(ancestor: impl Into<String>, color: Color) -> Self {
		Self {
			ancestor: ancestor.into(),
			color,
		}
	}
}

/// Category table with fallback colors for uncategorized nodes.
#[derive(Clone, Debug)]
pub struct Classifier {
	rules: Vec<CategoryRule>,
	collapsed: Color,
	plain: Color,
}

impl Default for Classifier {
	fn default() -> Self {
		Self::new(default_rules(), &Theme::default())
	}
}

/// The stock category table, in precedence order.
pub fn default_rules() -> Vec<CategoryRule> {
	[
		("Creative Code Frameworks", named::PINK),
		("Real-time 3D/Game Engines", named::DEEP_SKY_BLUE),
		("AI/Machine Learning", named::RED),
		("Uncategorized Utilities/DevOps", named::FIREBRICK),
		("Pro AV Hardware and Related Software", named::DARK_SALMON),
		("Optical Tracking", named::DARK_MAGENTA),
		("Sensors/Interaction Methods", named::DARK_VIOLET),
		("Physical Computing", named::LIGHT_BLUE),
		("Web/Networking Frameworks", named::LIME_GREEN),
		("Mobile Technology", named::GOLD),
		("Asset Creation", named::DEEP_PINK),
	]
	.into_iter()
	.map(|(name, color)| CategoryRule::new(name, color))
	.collect()
}

impl Classifier {
	/// Classifier with its own rule table and the theme's fallback colors.
	pub fn new(rules: Vec<CategoryRule>, theme: &Theme) -> Self {
		Self {
			rules,
			collapsed: theme.node.collapsed,
			plain: theme.node.plain,
		}
	}

	/// Rules in precedence order.
	pub fn rules(&self) -> &[CategoryRule] {
		&self.rules
	}

	/// Color of a node. Reads the tree only.
	pub fn color_of(&self, hierarchy: &Hierarchy, id: NodeId) -> Color {
		let chain: Vec<&str> = hierarchy.ancestors(id).map(|n| n.name.as_str()).collect();
		self.rules
			.iter()
			.find(|rule| chain.contains(&rule.ancestor.as_str()))
			.map(|rule| rule.color)
			.unwrap_or_else(|| {
				if hierarchy.node(id).is_collapsed() {
					self.collapsed
				} else {
					self.plain
				}
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::tree_view::types::RawRecord;

	fn catalog() -> Hierarchy {
		Hierarchy::build(&RawRecord::branch(
			"Everything",
			vec![
				RawRecord::branch(
					"Creative Code Frameworks",
					vec![RawRecord::branch(
						"Real-time 3D/Game Engines",
						vec![RawRecord::leaf("Godot")],
					)],
				),
				RawRecord::branch(
					"Real-time 3D/Game Engines",
					vec![RawRecord::leaf("Unity")],
				),
				RawRecord::branch("Misc", vec![RawRecord::leaf("Thing")]),
			],
		))
		.unwrap()
	}

	#[test]
	fn first_listed_rule_wins() {
		let tree = catalog();
		let classifier = Classifier::default();
		let godot = tree.find("Godot").unwrap();
		assert_eq!(classifier.color_of(&tree, godot), named::PINK);
		let unity = tree.find("Unity").unwrap();
		assert_eq!(classifier.color_of(&tree, unity), named::DEEP_SKY_BLUE);
	}

	#[test]
	fn category_node_matches_itself() {
		let tree = catalog();
		let classifier = Classifier::default();
		assert_eq!(classifier.color_of(&tree, 1), named::PINK);
	}

	#[test]
	fn fallback_depends_on_hidden_children() {
		let mut tree = catalog();
		let classifier = Classifier::default();
		let theme = Theme::default();
		let misc = tree.find("Misc").unwrap();
		let thing = tree.find("Thing").unwrap();
		assert_eq!(classifier.color_of(&tree, misc), theme.node.collapsed);
		assert_eq!(classifier.color_of(&tree, thing), theme.node.plain);
		tree.expand(misc);
		assert_eq!(classifier.color_of(&tree, misc), theme.node.plain);
	}

	#[test]
	fn custom_table_order_is_respected() {
		let tree = catalog();
		let classifier = Classifier::new(
			vec![
				CategoryRule::new("Real-time 3D/Game Engines", named::GOLD),
				CategoryRule::new("Creative Code Frameworks", named::RED),
			],
			&Theme::default(),
		);
		let godot = tree.find("Godot").unwrap();
		assert_eq!(classifier.color_of(&tree, godot), named::GOLD);
	}
}
