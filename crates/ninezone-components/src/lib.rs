#![forbid(unsafe_code)]

//! Components: tree drag-and-drop and property value labels.
//!
//! # Role in ninezone
//! `ninezone-components` hosts the drop zone classifier from
//! `ninezone-core` inside tree rows and applies the resulting drops to a
//! tree model.
//!
//! # Primary responsibilities
//! - **DragDropTreeNode**: per-row hover mode and drop indicator flags.
//! - **Tree**: ordered forest with `move_node` reordering.
//! - **array_value_label**: compact table-cell text for array values.

pub mod property;
pub mod tree;
pub mod tree_node;

pub use property::array_value_label;
pub use tree::{DropPosition, NodeId, Tree, TreeError, TreeNode};
pub use tree_node::{DragDropTreeNode, DropIndicator};
