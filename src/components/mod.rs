//! UI components.

pub mod tree_view;
