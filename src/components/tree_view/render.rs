//! Canvas rendering for the tree view.
//!
//! Paints one sampled [`Frame`]. Drawing order gives the z-ordering:
//! 1. Background (screen space)
//! 2. Links as horizontal Bézier diagonals (layout space)
//! 3. Nodes: label box, circle, haloed label

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::VisualConfig;
use super::hierarchy::Position;
use super::scene::{Frame, LinkFrame, NodeFrame};
use super::theme::Theme;

/// Renders the complete frame to the canvas.
pub fn render(
	frame: &Frame<'_>,
	ctx: &CanvasRenderingContext2d,
	config: &VisualConfig,
	theme: &Theme,
	width: f64,
) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, frame.viewport.height);

	ctx.save();
	// layout (depth, sibling) -> canvas (x, y)
	let _ = ctx.translate(config.margins.left, -frame.viewport.top);

	ctx.set_line_width(config.stroke_width);
	for link in &frame.links {
		draw_link(ctx, theme, link);
	}
	for node in &frame.nodes {
		draw_node(ctx, config, theme, node);
	}

	ctx.restore();
}

fn draw_link(ctx: &CanvasRenderingContext2d, theme: &Theme, link: &LinkFrame) {
	let LinkFrame { look, .. } = link;
	if look.opacity <= 0.001 {
		return;
	}
	let alpha = theme.link.opacity * look.opacity;
	ctx.set_stroke_style_str(&look.color.with_alpha(alpha).to_css());
	diagonal(ctx, look.source, look.target);
	ctx.stroke();
}

/// Horizontal cubic from `source` to `target`, control points at mid depth.
fn diagonal(ctx: &CanvasRenderingContext2d, source: Position, target: Position) {
	let mid = (source.depth + target.depth) / 2.0;
	ctx.begin_path();
	ctx.move_to(source.depth, source.sibling);
	ctx.bezier_curve_to(mid, source.sibling, mid, target.sibling, target.depth, target.sibling);
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	config: &VisualConfig,
	theme: &Theme,
	node: &NodeFrame<'_>,
) {
	let look = node.look;
	if look.opacity <= 0.001 {
		return;
	}
	let (x, y) = (look.position.depth, look.position.sibling);
	let color = look.color.to_css();

	ctx.set_global_alpha(look.opacity);

	if !node.branch {
		let width = config.label_box_width(node.label);
		let height = config.label_box_height();
		ctx.set_global_alpha(look.opacity * theme.node.leaf_box_opacity);
		ctx.set_fill_style_str(&color);
		rounded_rect(ctx, x + 5.0, y - height / 2.0, width, height, theme.node.box_radius);
		ctx.fill();
		ctx.set_global_alpha(look.opacity);
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, config.circle_radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color);
	ctx.fill();

	let label_x = x + config.label_offset(node.branch);
	ctx.set_font(&format!("{}px {}", config.font_size, theme.node.font_family));
	ctx.set_text_align(if node.branch { "end" } else { "start" });
	ctx.set_text_baseline("middle");

	ctx.set_line_join("round");
	ctx.set_line_width(config.stroke_width);
	ctx.set_stroke_style_str(&theme.node.halo.to_css());
	let _ = ctx.stroke_text(node.label, label_x, y);
	ctx.set_fill_style_str(&theme.node.label.to_css());
	let _ = ctx.fill_text(node.label, label_x, y);

	ctx.set_global_alpha(1.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
