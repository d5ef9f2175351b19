//! Colors and visual style for the tree view.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t).round() as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t).round() as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t).round() as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS color: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// CSS named colors used by the category table.
pub mod named {
	use super::Color;

	/// CSS `pink`.
	pub const PINK: Color = Color::rgb(255, 192, 203);
	/// CSS `deepskyblue`.
	pub const DEEP_SKY_BLUE: Color = Color::rgb(0, 191, 255);
	/// CSS `red`.
	pub const RED: Color = Color::rgb(255, 0, 0);
	/// CSS `firebrick`.
	pub const FIREBRICK: Color = Color::rgb(178, 34, 34);
	/// CSS `darksalmon`.
	pub const DARK_SALMON: Color = Color::rgb(233, 150, 122);
	/// CSS `darkmagenta`.
	pub const DARK_MAGENTA: Color = Color::rgb(139, 0, 139);
	/// CSS `darkviolet`.
	pub const DARK_VIOLET: Color = Color::rgb(148, 0, 211);
	/// CSS `lightblue`.
	pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
	/// CSS `limegreen`.
	pub const LIME_GREEN: Color = Color::rgb(50, 205, 50);
	/// CSS `gold`.
	pub const GOLD: Color = Color::rgb(255, 215, 0);
	/// CSS `deeppink`.
	pub const DEEP_PINK: Color = Color::rgb(255, 20, 147);
	/// CSS `white`.
	pub const WHITE: Color = Color::rgb(255, 255, 255);
	/// CSS `black`.
	pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// Link stroke style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Opacity applied to every link on top of its category color.
	pub opacity: f64,
}

/// Node and label style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fallback for uncategorized nodes that hide children.
	pub collapsed: Color,
	/// Fallback for every other uncategorized node.
	pub plain: Color,
	/// Label text color.
	pub label: Color,
	/// Halo drawn under the label text.
	pub halo: Color,
	/// Corner radius of the label box.
	pub box_radius: f64,
	/// Label box opacity for leaves. Branch label boxes are not shown.
	pub leaf_box_opacity: f64,
	/// Label font family.
	pub font_family: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Display name.
	pub name: &'static str,
	/// Canvas fill.
	pub background: Color,
	/// Link strokes.
	pub link: LinkStyle,
	/// Node circles, boxes and labels.
	pub node: NodeStyle,
}

impl Theme {
	/// Light page background with neutral gray fallbacks (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: named::WHITE,
			link: LinkStyle { opacity: 0.4 },
			node: NodeStyle {
				collapsed: Color::rgb(0x55, 0x55, 0x55),
				plain: Color::rgb(0x99, 0x99, 0x99),
				label: named::BLACK,
				halo: named::WHITE,
				box_radius: 5.0,
				leaf_box_opacity: 0.5,
				font_family: "sans-serif",
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_forms() {
		assert_eq!(Color::rgb(0x55, 0x55, 0x55).to_css(), "#555555");
		assert_eq!(
			named::RED.with_alpha(0.5).to_css(),
			"rgba(255, 0, 0, 0.5)"
		);
	}

	#[test]
	fn lerp_endpoints() {
		let from = named::BLACK;
		let to = named::WHITE;
		assert_eq!(from.lerp(to, 0.0), from);
		assert_eq!(from.lerp(to, 1.0), to);
		assert_eq!(from.lerp(to, 0.5).r, 128);
	}
}
