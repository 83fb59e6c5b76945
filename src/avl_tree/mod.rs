//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Every node stores a balance factor, the height of its right subtree minus the height of its
//! left subtree. Factors are maintained incrementally while retracing from the modified position
//! towards the root; a node whose factor reaches two is fixed with a single or double rotation.

use crate::arena::NodeId;
use crate::tree::{Balance, Removal, Tree};
use std::cmp;

/// An ordered collection implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one.
///
/// # Examples
///
/// ```
/// use classic_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for value in 0..7 {
///     tree.insert(value);
/// }
///
/// assert_eq!(tree.depth(), 3);
/// assert_eq!(tree.root_view().map(|root| *root.value()), Some(3));
/// assert_eq!(tree.remove(&3), Some(3));
/// assert!(tree.validate().is_ok());
/// ```
pub type AvlTree<T> = Tree<T, BalanceFactor>;

/// Height of the right subtree minus the height of the left subtree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BalanceFactor(pub i8);

fn factor<T>(tree: &AvlTree<T>, id: NodeId) -> i8 {
    tree.node(id).meta.0
}

fn set_factor<T>(tree: &mut AvlTree<T>, id: NodeId, value: i8) {
    tree.node_mut(id).meta = BalanceFactor(value);
}

// Right-left case: `node` is right heavy and its right child `child` is left heavy.
fn rotate_right_left<T>(tree: &mut AvlTree<T>, node: NodeId, child: NodeId) -> NodeId {
    let middle = tree
        .left(child)
        .expect("Expected left-heavy child to have a left child.");
    let middle_factor = factor(tree, middle);
    tree.rotate_right(child);
    let root = tree.rotate_left(node);
    set_factor(tree, node, if middle_factor == 1 { -1 } else { 0 });
    set_factor(tree, child, if middle_factor == -1 { 1 } else { 0 });
    set_factor(tree, middle, 0);
    root
}

// Left-right case: `node` is left heavy and its left child `child` is right heavy.
fn rotate_left_right<T>(tree: &mut AvlTree<T>, node: NodeId, child: NodeId) -> NodeId {
    let middle = tree
        .right(child)
        .expect("Expected right-heavy child to have a right child.");
    let middle_factor = factor(tree, middle);
    tree.rotate_left(child);
    let root = tree.rotate_right(node);
    set_factor(tree, node, if middle_factor == -1 { 1 } else { 0 });
    set_factor(tree, child, if middle_factor == 1 { -1 } else { 0 });
    set_factor(tree, middle, 0);
    root
}

// Fixes `node`, whose factor is +-2. Returns the new root of the subtree and whether the height
// of the subtree decreased compared to before the offending update.
fn rebalance<T>(tree: &mut AvlTree<T>, node: NodeId) -> (NodeId, bool) {
    match factor(tree, node) {
        2 => {
            let child = tree
                .right(node)
                .expect("Expected right-heavy node to have a right child.");
            match factor(tree, child) {
                -1 => (rotate_right_left(tree, node, child), true),
                child_factor => {
                    let root = tree.rotate_left(node);
                    if child_factor == 0 {
                        set_factor(tree, node, 1);
                        set_factor(tree, child, -1);
                        (root, false)
                    } else {
                        set_factor(tree, node, 0);
                        set_factor(tree, child, 0);
                        (root, true)
                    }
                },
            }
        },
        -2 => {
            let child = tree
                .left(node)
                .expect("Expected left-heavy node to have a left child.");
            match factor(tree, child) {
                1 => (rotate_left_right(tree, node, child), true),
                child_factor => {
                    let root = tree.rotate_right(node);
                    if child_factor == 0 {
                        set_factor(tree, node, -1);
                        set_factor(tree, child, 1);
                        (root, false)
                    } else {
                        set_factor(tree, node, 0);
                        set_factor(tree, child, 0);
                        (root, true)
                    }
                },
            }
        },
        value => unreachable!("balance factor {} does not need rebalancing", value),
    }
}

impl Balance for BalanceFactor {
    fn fresh() -> Self {
        BalanceFactor(0)
    }

    // The subtree containing the new leaf grew by one level. Walk up until a node absorbs the
    // growth or one rotation restores the previous height.
    fn after_insert<T>(tree: &mut AvlTree<T>, node: NodeId) {
        let mut child = node;
        while let Some(parent) = tree.parent(child) {
            let delta = if tree.left(parent) == Some(child) { -1 } else { 1 };
            let updated = factor(tree, parent) + delta;
            set_factor(tree, parent, updated);
            match updated {
                0 => break,
                1 | -1 => child = parent,
                _ => {
                    rebalance(tree, parent);
                    break;
                },
            }
        }
    }

    // The subtree at the removed position shrank by one level. Unlike insertion, a rotation may
    // shrink the subtree again, so retracing can continue up to the root.
    fn after_remove<T>(tree: &mut AvlTree<T>, removal: Removal<Self>) {
        let mut parent = removal.parent;
        let mut left_side = removal.left_side;
        while let Some(node) = parent {
            let updated = factor(tree, node) + if left_side { 1 } else { -1 };
            set_factor(tree, node, updated);
            let subtree = match updated {
                1 | -1 => break,
                0 => node,
                _ => match rebalance(tree, node) {
                    (root, true) => root,
                    (_, false) => break,
                },
            };
            left_side = tree.is_left_child(subtree);
            parent = tree.parent(subtree);
        }
    }

    fn validate<T>(tree: &AvlTree<T>) -> Result<(), String> {
        match tree.root_id() {
            Some(root) => checked_height(tree, root).map(|_| ()),
            None => Ok(()),
        }
    }
}

fn checked_height<T>(tree: &AvlTree<T>, id: NodeId) -> Result<i32, String> {
    let left = match tree.left(id) {
        Some(left) => checked_height(tree, left)?,
        None => 0,
    };
    let right = match tree.right(id) {
        Some(right) => checked_height(tree, right)?,
        None => 0,
    };
    let stored = i32::from(factor(tree, id));
    if stored != right - left {
        return Err(format!(
            "{:?} stores balance factor {} but its subtrees differ by {}",
            id,
            stored,
            right - left,
        ));
    }
    if stored.abs() > 1 {
        return Err(format!("{:?} is unbalanced with factor {}", id, stored));
    }
    Ok(cmp::max(left, right) + 1)
}
