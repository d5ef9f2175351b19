//! Input document structures for the tree view component.

use serde::Deserialize;

/// One record of the hierarchical input document.
///
/// Both fields are optional at the serde level so that a missing `name` is
/// reported by [`Hierarchy::build`](super::Hierarchy::build) with the path of
/// the offending record instead of a bare parse error.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawRecord {
	/// Display label, also used for ancestry-based category matching.
	#[serde(default)]
	pub name: Option<String>,
	/// Nested records, in display order.
	#[serde(default)]
	pub children: Option<Vec<RawRecord>>,
}

impl RawRecord {
	/// A record with no children.
	pub fn leaf(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			children: None,
		}
	}

	/// A record with the given children.
	pub fn branch(name: impl Into<String>, children: Vec<RawRecord>) -> Self {
		Self {
			name: Some(name.into()),
			children: Some(children),
		}
	}

	pub(crate) fn children(&self) -> &[RawRecord] {
		self.children.as_deref().unwrap_or_default()
	}
}
