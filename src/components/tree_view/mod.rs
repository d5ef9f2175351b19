//! Collapsible tree visualization component.
//!
//! Renders a dendrogram-style tree on an HTML canvas with:
//! - Tidy (Reingold–Tilford) layout of the currently expanded nodes
//! - Click-to-toggle expansion with keyed enter/update/exit transitions
//! - Ancestry-based category coloring of nodes and links
//! - A viewport that follows the laid-out extent
//!
//! # Example
//!
//! ```ignore
//! use collapsible_tree::{CollapsibleTree, Hierarchy, RawRecord};
//!
//! let data = RawRecord::branch("Root", vec![
//!     RawRecord::leaf("A"),
//!     RawRecord::branch("B", vec![RawRecord::leaf("C")]),
//! ]);
//! let hierarchy = Hierarchy::build(&data)?;
//!
//! view! { <CollapsibleTree hierarchy=hierarchy /> }
//! ```

pub mod classify;
mod component;
pub mod config;
pub mod hierarchy;
pub mod layout;
mod render;
pub mod scene;
pub mod state;
pub mod theme;
mod types;

pub use classify::{CategoryRule, Classifier};
pub use component::CollapsibleTree;
pub use config::{InitialExpansion, VisualConfig};
pub use hierarchy::{Expansion, Hierarchy, NodeId, Position, Toggle, TreeNode};
pub use layout::{Extent, TidyTree};
pub use scene::{CycleStats, Phase, Scene};
pub use state::TreeView;
pub use theme::{Color, Theme};
pub use types::RawRecord;
