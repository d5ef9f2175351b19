//! Fixed visual configuration for the tree view.
//!
//! These are tuning knobs rather than protocol: spacing of the tidy layout,
//! margins around the drawing, glyph sizes and transition durations. All
//! values are in canvas pixels unless noted otherwise.
//!
//! # Axes
//!
//! The layout works in two axes:
//!
//! - **Depth axis**: distance from the root, drawn horizontally. Each level is
//!   [`VisualConfig::dy`] pixels further right.
//! - **Sibling axis**: position among siblings and cousins, drawn vertically.
//!   Adjacent siblings are [`VisualConfig::dx`] pixels apart.

use serde::Deserialize;

/// Which nodes are re-expanded after the builder collapses the whole tree.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum InitialExpansion {
	/// Only the root shows its children.
	#[default]
	Root,
	/// Every node is expanded.
	All,
	/// The root, plus every node whose name is exactly this many characters.
	NameLength(usize),
}

/// Margins around the laid-out tree, in pixels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Margins {
	/// Above the topmost node.
	pub top: f64,
	/// Right of the deepest labels.
	pub right: f64,
	/// Below the bottom node.
	pub bottom: f64,
	/// Left of the root.
	pub left: f64,
}

impl Default for Margins {
	fn default() -> Self {
		Self {
			top: 100.0,
			right: 10.0,
			bottom: 10.0,
			left: 150.0,
		}
	}
}

/// Complete visual configuration for the tree view.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualConfig {
	/// Sibling-axis distance between adjacent siblings.
	pub dx: f64,
	/// Depth-axis distance between levels.
	pub dy: f64,
	/// Space around the laid-out tree.
	pub margins: Margins,
	/// Label font size in pixels.
	pub font_size: f64,
	/// Node circle radius.
	pub circle_radius: f64,
	/// Link and circle stroke width.
	pub stroke_width: f64,
	/// Overall canvas width. The container scrolls horizontally past this.
	pub width: f64,
	/// Transition duration in milliseconds.
	pub duration_ms: f64,
	/// Transition duration while the slow-motion modifier is held.
	pub slow_duration_ms: f64,
	/// Which nodes start expanded.
	pub initial_expansion: InitialExpansion,
}

impl Default for VisualConfig {
	fn default() -> Self {
		Self {
			dx: 15.0,
			dy: 200.0,
			margins: Margins::default(),
			font_size: 12.0,
			circle_radius: 3.0,
			stroke_width: 3.0,
			width: 2200.0,
			duration_ms: 250.0,
			slow_duration_ms: 2500.0,
			initial_expansion: InitialExpansion::Root,
		}
	}
}

impl VisualConfig {
	/// Transition duration for one render cycle.
	pub fn duration(&self, slow_motion: bool) -> f64 {
		if slow_motion {
			self.slow_duration_ms
		} else {
			self.duration_ms
		}
	}

	/// Width of the rounded box drawn behind a label.
	pub fn label_box_width(&self, label: &str) -> f64 {
		label.chars().count() as f64 * (self.font_size - 5.0) + 20.0
	}

	/// Height of the rounded box drawn behind a label.
	pub fn label_box_height(&self) -> f64 {
		self.font_size + 4.0
	}

	/// Horizontal offset of a label relative to its node circle.
	/// Branch labels sit left of the circle, leaf labels right.
	pub fn label_offset(&self, branch: bool) -> f64 {
		if branch { -self.font_size } else { self.font_size }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slow_motion_stretches_duration() {
		let config = VisualConfig::default();
		assert_eq!(config.duration(false), 250.0);
		assert_eq!(config.duration(true), 2500.0);
	}

	#[test]
	fn partial_override_keeps_defaults() {
		let config: VisualConfig =
			serde_json::from_str(r#"{"dy": 120, "margins": {"left": 40}}"#).unwrap();
		assert_eq!(config.dy, 120.0);
		assert_eq!(config.dx, 15.0);
		assert_eq!(config.margins.left, 40.0);
		assert_eq!(config.margins.top, 100.0);
	}

	#[test]
	fn initial_expansion_forms() {
		let all: InitialExpansion = serde_json::from_str(r#""all""#).unwrap();
		assert_eq!(all, InitialExpansion::All);
		let by_len: InitialExpansion = serde_json::from_str(r#"{"name_length": 7}"#).unwrap();
		assert_eq!(by_len, InitialExpansion::NameLength(7));
	}

	#[test]
	fn label_box_tracks_name_length() {
		let config = VisualConfig::default();
		assert_eq!(config.label_box_width("abcd"), 4.0 * 7.0 + 20.0);
		assert_eq!(config.label_box_height(), 16.0);
	}
}
