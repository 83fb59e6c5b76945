//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.

use crate::arena::NodeId;
use crate::tree::{Balance, Removal, Tree};

/// An ordered collection implemented using a red-black tree.
///
/// A red-black tree keeps three invariants: the root is black, a red node never has a red
/// child, and every path from a node down to an empty subtree passes through the same number of
/// black nodes. Together they bound the depth of the tree by `2 * log2(n + 1)`.
///
/// # Examples
///
/// ```
/// use classic_collections::red_black_tree::{Color, RedBlackTree};
///
/// let tree = RedBlackTree::from_slice(&[50, 30, 70, 20, 40, 60, 80]);
///
/// assert_eq!(
///     tree.iter().cloned().collect::<Vec<u32>>(),
///     vec![20, 30, 40, 50, 60, 70, 80],
/// );
/// assert_eq!(tree.root_view().map(|root| *root.meta()), Some(Color::Black));
/// assert!(tree.validate().is_ok());
/// ```
pub type RedBlackTree<T> = Tree<T, Color>;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

fn color<T>(tree: &RedBlackTree<T>, id: NodeId) -> Color {
    tree.node(id).meta
}

fn set_color<T>(tree: &mut RedBlackTree<T>, id: NodeId, color: Color) {
    tree.node_mut(id).meta = color;
}

// Empty subtrees count as black.
fn is_red<T>(tree: &RedBlackTree<T>, id: Option<NodeId>) -> bool {
    match id {
        Some(id) => color(tree, id) == Color::Red,
        None => false,
    }
}

fn blacken<T>(tree: &mut RedBlackTree<T>, id: Option<NodeId>) {
    if let Some(id) = id {
        set_color(tree, id, Color::Black);
    }
}

fn blacken_root<T>(tree: &mut RedBlackTree<T>) {
    let root = tree.root_id();
    blacken(tree, root);
}

impl Balance for Color {
    fn fresh() -> Self {
        Color::Red
    }

    fn after_insert<T>(tree: &mut RedBlackTree<T>, node: NodeId) {
        let mut node = node;
        loop {
            let parent = match tree.parent(node) {
                Some(parent) => parent,
                None => {
                    // case 1: the node is the root
                    set_color(tree, node, Color::Black);
                    return;
                },
            };
            if color(tree, parent) == Color::Black {
                // case 2: nothing to fix
                return;
            }
            // a red parent is never the root
            let grandparent = tree
                .parent(parent)
                .expect("Expected red node to have a parent.");
            let parent_is_left = tree.left(grandparent) == Some(parent);
            let uncle = if parent_is_left {
                tree.right(grandparent)
            } else {
                tree.left(grandparent)
            };

            if is_red(tree, uncle) {
                // case 3: push the redness up and continue from the grandparent
                set_color(tree, parent, Color::Black);
                blacken(tree, uncle);
                set_color(tree, grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // case 4: straighten a zig-zag, then rotate the grandparent
            let mut parent = parent;
            if parent_is_left {
                if tree.right(parent) == Some(node) {
                    tree.rotate_left(parent);
                    parent = node;
                }
                tree.rotate_right(grandparent);
            } else {
                if tree.left(parent) == Some(node) {
                    tree.rotate_right(parent);
                    parent = node;
                }
                tree.rotate_left(grandparent);
            }
            set_color(tree, parent, Color::Black);
            set_color(tree, grandparent, Color::Red);
            return;
        }
    }

    fn after_remove<T>(tree: &mut RedBlackTree<T>, removal: Removal<Self>) {
        if removal.meta == Color::Red {
            return;
        }
        if is_red(tree, removal.child) {
            blacken(tree, removal.child);
            return;
        }

        // `node` carries an extra black; it may be an empty position, so track its parent and
        // side explicitly.
        let mut node = removal.child;
        let mut parent = removal.parent;
        let mut left_side = removal.left_side;
        while let Some(parent_id) = parent {
            if is_red(tree, node) {
                break;
            }
            if left_side {
                let mut sibling = tree
                    .right(parent_id)
                    .expect("Expected doubly black node to have a sibling.");
                if color(tree, sibling) == Color::Red {
                    // case 1: red sibling, rotate to get a black one
                    set_color(tree, sibling, Color::Black);
                    set_color(tree, parent_id, Color::Red);
                    tree.rotate_left(parent_id);
                    sibling = tree
                        .right(parent_id)
                        .expect("Expected doubly black node to have a sibling.");
                }
                if !is_red(tree, tree.left(sibling)) && !is_red(tree, tree.right(sibling)) {
                    // case 2: both nephews black, move the extra black up
                    set_color(tree, sibling, Color::Red);
                    node = Some(parent_id);
                    left_side = tree.is_left_child(parent_id);
                    parent = tree.parent(parent_id);
                    continue;
                }
                if !is_red(tree, tree.right(sibling)) {
                    // case 3: near nephew red, rotate it into the far position
                    let nephew = tree.left(sibling);
                    blacken(tree, nephew);
                    set_color(tree, sibling, Color::Red);
                    tree.rotate_right(sibling);
                    sibling = tree
                        .right(parent_id)
                        .expect("Expected doubly black node to have a sibling.");
                }
                // case 4: far nephew red, rotate the parent and finish
                let parent_color = color(tree, parent_id);
                set_color(tree, sibling, parent_color);
                set_color(tree, parent_id, Color::Black);
                let nephew = tree.right(sibling);
                blacken(tree, nephew);
                tree.rotate_left(parent_id);
            } else {
                let mut sibling = tree
                    .left(parent_id)
                    .expect("Expected doubly black node to have a sibling.");
                if color(tree, sibling) == Color::Red {
                    set_color(tree, sibling, Color::Black);
                    set_color(tree, parent_id, Color::Red);
                    tree.rotate_right(parent_id);
                    sibling = tree
                        .left(parent_id)
                        .expect("Expected doubly black node to have a sibling.");
                }
                if !is_red(tree, tree.left(sibling)) && !is_red(tree, tree.right(sibling)) {
                    set_color(tree, sibling, Color::Red);
                    node = Some(parent_id);
                    left_side = tree.is_left_child(parent_id);
                    parent = tree.parent(parent_id);
                    continue;
                }
                if !is_red(tree, tree.left(sibling)) {
                    let nephew = tree.right(sibling);
                    blacken(tree, nephew);
                    set_color(tree, sibling, Color::Red);
                    tree.rotate_left(sibling);
                    sibling = tree
                        .left(parent_id)
                        .expect("Expected doubly black node to have a sibling.");
                }
                let parent_color = color(tree, parent_id);
                set_color(tree, sibling, parent_color);
                set_color(tree, parent_id, Color::Black);
                let nephew = tree.left(sibling);
                blacken(tree, nephew);
                tree.rotate_right(parent_id);
            }
            node = None;
            break;
        }

        blacken(tree, node);
        blacken_root(tree);
    }

    fn validate<T>(tree: &RedBlackTree<T>) -> Result<(), String> {
        match tree.root_id() {
            Some(root) => {
                if color(tree, root) != Color::Black {
                    return Err("root is red".to_string());
                }
                black_height(tree, Some(root)).map(|_| ())
            },
            None => Ok(()),
        }
    }
}

fn black_height<T>(tree: &RedBlackTree<T>, id: Option<NodeId>) -> Result<usize, String> {
    let id = match id {
        Some(id) => id,
        None => return Ok(1),
    };
    let node = tree.node(id);
    if node.meta == Color::Red && (is_red(tree, node.left) || is_red(tree, node.right)) {
        return Err(format!("red node {:?} has a red child", id));
    }
    let left = black_height(tree, node.left)?;
    let right = black_height(tree, node.right)?;
    if left != right {
        return Err(format!(
            "{:?} has black heights {} and {} in its subtrees",
            id, left, right,
        ));
    }
    Ok(left + if node.meta == Color::Black { 1 } else { 0 })
}
