//! Leptos component wrapping the tree view canvas.
//!
//! The component creates a horizontally scrolling container with a canvas,
//! builds the [`TreeView`] session once the canvas is mounted and runs an
//! animation loop via `requestAnimationFrame` that advances transitions and
//! repaints each frame. Clicks toggle the node under the pointer; holding Alt
//! during the click plays the transition in slow motion.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::classify::Classifier;
use super::config::VisualConfig;
use super::hierarchy::Hierarchy;
use super::render;
use super::state::TreeView;
use super::theme::Theme;

/// Bundles the session with the canvas it paints on.
struct ViewContext {
	view: TreeView,
	theme: Theme,
	ctx: CanvasRenderingContext2d,
}

/// Milliseconds on the page's monotonic clock.
fn now() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Renders an interactive collapsible tree on a canvas element.
///
/// The hierarchy is taken as built; the initial expansion from `config` is
/// applied when the canvas mounts.
#[component]
pub fn CollapsibleTree(
	hierarchy: Hierarchy,
	#[prop(optional)] config: VisualConfig,
	#[prop(optional)] classifier: Option<Classifier>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<ViewContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("collapsible-tree: canvas has no 2d context");
			return;
		};

		let mut view = TreeView::new(
			hierarchy.clone(),
			config.clone(),
			classifier.clone().unwrap_or_default(),
		);
		view.start(now());
		canvas.set_width(config.width as u32);

		*context_init.borrow_mut() = Some(ViewContext {
			view,
			theme: Theme::default(),
			ctx,
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let t = now();
				if c.view.poll(t) {
					let frame = c.view.frame(t);
					let height = frame.viewport.height.max(1.0).round() as u32;
					if canvas.height() != height {
						canvas.set_height(height);
					}
					let width = canvas.width() as f64;
					render::render(&frame, &c.ctx, c.view.config(), &c.theme, width);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), animate_init.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_click.borrow_mut() {
			let t = now();
			if let Some(id) = c.view.node_at(x, y, t) {
				c.view.on_node_click(id, t, ev.alt_key());
			}
		}
	};

	view! {
		<div class="collapsible-tree" style="overflow-x: auto; width: 100%;">
			<canvas
				node_ref=canvas_ref
				class="collapsible-tree-canvas"
				on:click=on_click
				style="display: block; cursor: pointer; user-select: none;"
			/>
		</div>
	}
}
