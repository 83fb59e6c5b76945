use crate::arena::NodeId;
use crate::tree::Tree;
use std::fmt::Debug;

/// A struct representing an internal node of a search tree.
///
/// `M` is the per-node metadata of the balancing strategy: `()` for plain search trees, a
/// balance factor for AVL trees and a color for red-black trees. The parent link is a
/// non-owning back reference; every mutation of `left` or `right` goes through the tree so that
/// the child's `parent` stays consistent.
pub struct Node<T, M> {
    pub value: T,
    pub meta: M,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<T, M> Node<T, M> {
    pub fn new(value: T, meta: M, parent: Option<NodeId>) -> Self {
        Node {
            value,
            meta,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Describes the node that was physically unlinked by a removal.
///
/// Removal always unlinks a node with at most one child: `child` is the subtree that took its
/// place (possibly empty), `parent` is the parent of that position and `left_side` tells which
/// side of `parent` the position is on.
#[derive(Clone, Copy, Debug)]
pub struct Removal<M> {
    pub meta: M,
    pub child: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub left_side: bool,
}

/// A rebalancing strategy, implemented by the metadata type that it stores in every node.
pub trait Balance: Copy + Debug + PartialEq + Sized {
    /// Metadata of a freshly attached leaf.
    fn fresh() -> Self;

    /// Restores the invariants of the strategy after `node` was attached as a leaf.
    fn after_insert<T>(tree: &mut Tree<T, Self>, node: NodeId);

    /// Restores the invariants of the strategy after a node was unlinked.
    fn after_remove<T>(tree: &mut Tree<T, Self>, removal: Removal<Self>);

    /// Checks the strategy specific invariants of the whole tree.
    fn validate<T>(_tree: &Tree<T, Self>) -> Result<(), String> {
        Ok(())
    }
}

/// No rebalancing: the tree keeps whatever shape the insertion order produces.
impl Balance for () {
    fn fresh() -> Self {}

    fn after_insert<T>(_tree: &mut Tree<T, Self>, _node: NodeId) {}

    fn after_remove<T>(_tree: &mut Tree<T, Self>, _removal: Removal<Self>) {}
}
