//! collapsible-tree: Interactive collapsible tree visualization.
//!
//! This crate provides a WASM-based component that renders a hierarchical
//! JSON document as a dendrogram with click-to-expand nodes, category
//! coloring by ancestry and animated transitions between states.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info};

pub mod components;
pub mod error;
pub mod loader;

pub use components::tree_view::{
	Classifier, CollapsibleTree, Hierarchy, RawRecord, TreeView, VisualConfig,
};
pub use error::LoadError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("collapsible-tree: logging initialized");
}

/// Build the tree from `data` and mount a visualization into `container`.
///
/// The container stays owned by the host page; the mounted view lives for the
/// rest of the page session. Fails without rendering anything if `data` is
/// malformed.
pub fn create_visualization(
	data: &RawRecord,
	container: &web_sys::HtmlElement,
) -> Result<(), LoadError> {
	let hierarchy = Hierarchy::build(data)?;
	let config = loader::load_config();
	info!("collapsible-tree: mounting {} nodes", hierarchy.len());
	leptos::mount::mount_to(container.clone(), move || {
		view! { <CollapsibleTree hierarchy=hierarchy config=config /> }
	})
	.forget();
	Ok(())
}

/// Main application component.
/// Fetches the document once and mounts the tree into the page container when
/// it arrives.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let container = NodeRef::<leptos::html::Div>::new();
	spawn_local(async move {
		let record = match loader::load_document(loader::DEFAULT_DATA_URL).await {
			Ok(record) => record,
			Err(e) => {
				error!("collapsible-tree: {}", e);
				return;
			}
		};
		let Some(container) = container.get_untracked() else {
			error!("collapsible-tree: page container is not mounted");
			return;
		};
		if let Err(e) = create_visualization(&record, &container) {
			error!("collapsible-tree: {}", e);
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Collapsible Tree" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="tree-page" node_ref=container />
	}
}
