//! Row hover state feeding tree reordering.

use ninezone_components::{DragDropTreeNode, DropPosition, Tree, TreeError, TreeNode};
use ninezone_core::Rect;

const ROW_HEIGHT: f64 = 24.0;

fn row_rect(index: usize) -> Rect {
    Rect::new(0.0, index as f64 * ROW_HEIGHT, 240.0, ROW_HEIGHT)
}

fn tree() -> Tree {
    Tree::from_roots(vec![
        TreeNode::new("docs").child(TreeNode::new("readme")),
        TreeNode::new("src").child(TreeNode::new("lib")).child(TreeNode::new("main")),
        TreeNode::new("tests"),
    ])
    .unwrap()
}

/// Hover `row` at `pointer_y` and drop `dragged` wherever the row says.
fn drop_on(tree: &mut Tree, dragged: &str, target: &str, row: usize, pointer_y: f64) -> Result<(), TreeError> {
    let mut node = DragDropTreeNode::new();
    node.set_over(true);
    node.set_can_drop(true);
    node.on_drag_over(pointer_y, &row_rect(row));
    let position = node.drop_position().unwrap_or(DropPosition::Inside);
    tree.move_node(dragged, target, position)
}

#[test]
fn upper_third_inserts_before() {
    let mut tree = tree();
    // "tests" is row 5 in the expanded listing.
    drop_on(&mut tree, "readme", "tests", 5, 5.0 * ROW_HEIGHT + 2.0).unwrap();
    let roots: Vec<_> = tree.roots().iter().map(TreeNode::id).collect();
    assert_eq!(roots, ["docs", "src", "readme", "tests"]);
    assert!(tree.get("docs").unwrap().children().is_empty());
}

#[test]
fn middle_third_nests() {
    let mut tree = tree();
    drop_on(&mut tree, "tests", "src", 2, 2.0 * ROW_HEIGHT + 12.0).unwrap();
    assert_eq!(tree.parent_of("tests").map(TreeNode::id), Some("src"));
}

#[test]
fn lower_third_inserts_after() {
    let mut tree = tree();
    drop_on(&mut tree, "main", "readme", 1, 2.0 * ROW_HEIGHT - 1.0).unwrap();
    let docs = tree.get("docs").unwrap();
    let children: Vec<_> = docs.children().iter().map(TreeNode::id).collect();
    assert_eq!(children, ["readme", "main"]);
}

#[test]
fn cannot_drop_into_own_subtree() {
    let mut tree = tree();
    let err = drop_on(&mut tree, "src", "lib", 3, 3.0 * ROW_HEIGHT + 12.0).unwrap_err();
    assert_eq!(
        err,
        TreeError::DropIntoDescendant {
            node: "src".into(),
            target: "lib".into()
        }
    );
}

