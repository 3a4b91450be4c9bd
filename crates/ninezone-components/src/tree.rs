#![forbid(unsafe_code)]

//! Tree model with drag-and-drop reordering.
//!
//! A [`Tree`] is an ordered forest of [`TreeNode`]s addressed by id.
//! [`Tree::move_node`] relocates a node, with its subtree, relative to a
//! target node. The [`DropPosition`] usually comes from the hover zone a
//! [`DragDropTreeNode`](crate::tree_node::DragDropTreeNode) reports.

use ninezone_core::DropZone;
use thiserror::Error;
use tracing::debug;

pub type NodeId = String;

/// Where a dropped node lands relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPosition {
    /// Sibling immediately before the target.
    Before,
    /// Last child of the target.
    Inside,
    /// Sibling immediately after the target.
    After,
}

impl From<DropZone> for DropPosition {
    fn from(zone: DropZone) -> Self {
        match zone {
            DropZone::Above => Self::Before,
            DropZone::On => Self::Inside,
            DropZone::Below => Self::After,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown tree node: {0}")]
    UnknownNode(NodeId),

    #[error("cannot drop node {0} onto itself")]
    DropOntoSelf(NodeId),

    #[error("cannot drop node {node} into its own subtree at {target}")]
    DropIntoDescendant { node: NodeId, target: NodeId },

    #[error("duplicate tree node: {0}")]
    DuplicateNode(NodeId),
}

/// A node in the tree hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    id: NodeId,
    label: String,
    children: Vec<TreeNode>,
    expanded: bool,
}

impl TreeNode {
    /// Create a node labelled with its id.
    #[must_use]
    pub fn new(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            children: Vec::new(),
            expanded: true,
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.push(node);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether `id` names this node or one of its descendants.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|c| c.contains(id))
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.id);
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}

/// Ordered forest of uniquely identified nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    roots: Vec<TreeNode>,
}

impl Tree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from top-level nodes, rejecting repeated ids.
    pub fn from_roots(roots: Vec<TreeNode>) -> Result<Self, TreeError> {
        let tree = Self { roots };
        let duplicate = {
            let mut ids = tree.ids();
            ids.sort_unstable();
            ids.windows(2).find(|w| w[0] == w[1]).map(|w| w[0].to_owned())
        };
        match duplicate {
            Some(id) => Err(TreeError::DuplicateNode(id)),
            None => Ok(tree),
        }
    }

    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Every id in depth-first pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_ids(&mut out);
        }
        out
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        find(&self.roots, id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Parent of `id`, or `None` for top-level and unknown nodes.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<&TreeNode> {
        fn walk<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
            nodes.iter().find_map(|n| {
                if n.children.iter().any(|c| c.id == id) {
                    Some(n)
                } else {
                    walk(&n.children, id)
                }
            })
        }
        walk(&self.roots, id)
    }

    /// Move `dragged` and its subtree to `position` relative to `target`.
    pub fn move_node(
        &mut self,
        dragged: &str,
        target: &str,
        position: DropPosition,
    ) -> Result<(), TreeError> {
        if dragged == target {
            return Err(TreeError::DropOntoSelf(dragged.to_owned()));
        }
        let node = self
            .get(dragged)
            .ok_or_else(|| TreeError::UnknownNode(dragged.to_owned()))?;
        if !self.contains(target) {
            return Err(TreeError::UnknownNode(target.to_owned()));
        }
        if node.contains(target) {
            return Err(TreeError::DropIntoDescendant {
                node: dragged.to_owned(),
                target: target.to_owned(),
            });
        }

        let Some(node) = detach(&mut self.roots, dragged) else {
            return Err(TreeError::UnknownNode(dragged.to_owned()));
        };
        let Some((siblings, index)) = container_of(&mut self.roots, target) else {
            return Err(TreeError::UnknownNode(target.to_owned()));
        };
        match position {
            DropPosition::Before => siblings.insert(index, node),
            DropPosition::After => siblings.insert(index + 1, node),
            DropPosition::Inside => {
                let parent = &mut siblings[index];
                parent.expanded = true;
                parent.children.push(node);
            }
        }
        debug!(dragged, target, ?position, "tree node moved");
        Ok(())
    }
}

fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    nodes
        .iter()
        .find_map(|n| if n.id == id { Some(n) } else { find(&n.children, id) })
}

fn detach(nodes: &mut Vec<TreeNode>, id: &str) -> Option<TreeNode> {
    if let Some(index) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(index));
    }
    nodes.iter_mut().find_map(|n| detach(&mut n.children, id))
}

/// Sibling list holding `id` and the node's index within it.
fn container_of<'a>(nodes: &'a mut Vec<TreeNode>, id: &str) -> Option<(&'a mut Vec<TreeNode>, usize)> {
    if let Some(index) = nodes.iter().position(|n| n.id == id) {
        return Some((nodes, index));
    }
    nodes
        .iter_mut()
        .find_map(|n| container_of(&mut n.children, id))
}
