//! Binary search tree base shared by the unbalanced, AVL, red-black and splay trees.
//!
//! Nodes live in an [`Arena`] and link to each other through [`NodeId`] handles, so the parent
//! back references never keep a node alive. Rotations are the only operations that change the
//! shape of a tree; balancing strategies hook into insertion and removal through the [`Balance`]
//! trait implemented by their per-node metadata.

mod iter;
mod node;
mod view;

pub use self::iter::{IntoIter, LevelOrder, TraversalOrder, Traverse};
pub use self::node::{Balance, Node, Removal};
pub use self::view::NodeView;

use crate::arena::{Arena, NodeId};
use crate::compare::Comparator;
use log::{debug, trace};
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

/// A binary search tree that does no rebalancing.
pub type BinarySearchTree<T> = Tree<T, ()>;

/// Selects the smallest or the largest end of an ordered collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MinMax {
    Min,
    Max,
}

/// An ordered collection stored as a binary search tree.
///
/// For every node, values in the left subtree compare less than or equal to the node's value and
/// values in the right subtree compare greater than or equal to it. Duplicates are allowed; an
/// equal value is placed to the right, so in-order iteration yields duplicates in insertion
/// order. `M` selects the balancing strategy, see [`AvlTree`](crate::avl_tree::AvlTree) and
/// [`RedBlackTree`](crate::red_black_tree::RedBlackTree).
///
/// Iterators borrow the tree, so the tree cannot be mutated while a traversal is in progress.
///
/// # Examples
///
/// ```
/// use classic_collections::tree::{BinarySearchTree, TraversalOrder};
///
/// let mut tree = BinarySearchTree::new();
/// for value in &[50, 30, 70, 20, 40] {
///     tree.insert(*value);
/// }
///
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.min(), Some(&20));
/// assert_eq!(tree.ceil(&35), Some(&40));
/// assert_eq!(
///     tree.traverse(TraversalOrder::PreOrder).collect::<Vec<_>>(),
///     vec![&50, &30, &20, &40, &70],
/// );
///
/// assert_eq!(tree.remove(&30), Some(30));
/// assert_eq!(tree.remove(&30), None);
/// ```
pub struct Tree<T, M = ()> {
    nodes: Arena<Node<T, M>>,
    root: Option<NodeId>,
    comparator: Comparator<T>,
    // `None` marks the cached depth as stale.
    depth: Cell<Option<usize>>,
}

impl<T, M> Tree<T, M> {
    pub(crate) fn node(&self, id: NodeId) -> &Node<T, M> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T, M> {
        &mut self.nodes[id]
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub(crate) fn is_left_child(&self, id: NodeId) -> bool {
        match self.nodes[id].parent {
            Some(parent) => self.nodes[parent].left == Some(id),
            None => false,
        }
    }

    pub(crate) fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.nodes[parent].left = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    pub(crate) fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.nodes[parent].right = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
        if let Some(root) = root {
            self.nodes[root].parent = None;
        }
        self.invalidate_depth();
    }

    // Points the link of `parent` that currently holds `old` at `new`. A `None` parent means
    // `old` is the root.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.set_root(new),
            Some(parent) => {
                if self.nodes[parent].left == Some(old) {
                    self.set_left(parent, new);
                } else {
                    self.set_right(parent, new);
                }
            },
        }
    }

    /// Rotates the subtree rooted at `pivot` to the left and returns the new subtree root.
    pub(crate) fn rotate_left(&mut self, pivot: NodeId) -> NodeId {
        let child = self
            .right(pivot)
            .expect("Expected right child node to be `Some`.");
        trace!("rotate left at {:?}", pivot);
        let parent = self.parent(pivot);
        let grandchild = self.left(child);
        self.set_right(pivot, grandchild);
        self.replace_child(parent, pivot, Some(child));
        self.set_left(child, Some(pivot));
        self.invalidate_depth();
        child
    }

    /// Rotates the subtree rooted at `pivot` to the right and returns the new subtree root.
    pub(crate) fn rotate_right(&mut self, pivot: NodeId) -> NodeId {
        let child = self
            .left(pivot)
            .expect("Expected left child node to be `Some`.");
        trace!("rotate right at {:?}", pivot);
        let parent = self.parent(pivot);
        let grandchild = self.right(child);
        self.set_left(pivot, grandchild);
        self.replace_child(parent, pivot, Some(child));
        self.set_right(child, Some(pivot));
        self.invalidate_depth();
        child
    }

    pub(crate) fn min_from(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    pub(crate) fn max_from(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    pub(crate) fn extreme(&self, end: MinMax) -> Option<NodeId> {
        self.root.map(|root| match end {
            MinMax::Min => self.min_from(root),
            MinMax::Max => self.max_from(root),
        })
    }

    // The returned node is unlinked; callers attach it with `set_left`, `set_right` or
    // `set_root`.
    pub(crate) fn allocate(&mut self, value: T, meta: M) -> NodeId {
        self.invalidate_depth();
        self.nodes.allocate(Node::new(value, meta, None))
    }

    // Frees a node without touching its neighbours; callers relink them afterwards.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        self.invalidate_depth();
        self.nodes.free(id).value
    }

    pub(crate) fn invalidate_depth(&self) {
        self.depth.set(None);
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of levels of the tree; an empty tree has depth 0.
    ///
    /// The depth is cached and only recomputed after the shape of the tree changed.
    pub fn depth(&self) -> usize {
        if let Some(depth) = self.depth.get() {
            return depth;
        }
        let mut depth = 0;
        let mut level: Vec<NodeId> = self.root.into_iter().collect();
        while !level.is_empty() {
            depth += 1;
            level = level
                .iter()
                .flat_map(|id| {
                    let node = &self.nodes[*id];
                    node.left.into_iter().chain(node.right)
                })
                .collect();
        }
        self.depth.set(Some(depth));
        depth
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len());
        self.nodes.clear();
        self.root = None;
        self.depth.set(Some(0));
    }

    /// Returns an iterator over the tree in-order.
    pub fn iter(&self) -> Traverse<T, M> {
        Traverse::new(self, TraversalOrder::InOrder)
    }

    /// Returns an iterator over the tree in the given depth-first order.
    ///
    /// The walk follows parent links with a trailing "previous node" pointer instead of a stack,
    /// so it uses constant extra memory. Calling `traverse` again restarts the walk.
    pub fn traverse(&self, order: TraversalOrder) -> Traverse<T, M> {
        Traverse::new(self, order)
    }

    /// Returns an iterator over the tree level by level, from left to right.
    pub fn level_order(&self) -> LevelOrder<T, M> {
        LevelOrder::new(self)
    }

    /// Returns a read-only view of the root node, or `None` if the tree is empty.
    pub fn root_view(&self) -> Option<NodeView<T, M>> {
        self.root.map(|root| NodeView::new(self, root))
    }
}

impl<T, M> Tree<T, M>
where
    M: Balance,
{
    // Unlinks `id`, which must have at most one child, and frees it.
    fn splice(&mut self, id: NodeId) -> (T, Removal<M>) {
        let (child, parent) = {
            let node = &self.nodes[id];
            debug_assert!(node.left.is_none() || node.right.is_none());
            (node.left.or(node.right), node.parent)
        };
        let left_side = self.is_left_child(id);
        self.replace_child(parent, id, child);
        self.invalidate_depth();
        let node = self.nodes.free(id);
        let removal = Removal {
            meta: node.meta,
            child,
            parent,
            left_side,
        };
        (node.value, removal)
    }

    // Removes the value stored at `id`. A node with two children takes its in-order successor's
    // value and the successor, which has no left child, is the node that gets unlinked.
    pub(crate) fn detach(&mut self, id: NodeId) -> (T, Removal<M>) {
        let successor = match (self.left(id), self.right(id)) {
            (Some(_), Some(right)) => self.min_from(right),
            _ => return self.splice(id),
        };
        {
            let (target, successor) = self.nodes.pair_mut(id, successor);
            mem::swap(&mut target.value, &mut successor.value);
        }
        self.splice(successor)
    }
}

impl<T, M> Tree<T, M>
where
    T: Ord,
    M: Balance,
{
    /// Constructs a new, empty tree ordered by the natural ordering of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::tree::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<u32> = BinarySearchTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::from_comparator(Comparator::natural())
    }

    /// Constructs a new, empty tree ordered by `comparator`.
    pub fn from_comparator(comparator: Comparator<T>) -> Self {
        Tree {
            nodes: Arena::new(),
            root: None,
            comparator,
            depth: Cell::new(Some(0)),
        }
    }

    /// Constructs a new, empty tree ordered by a comparison function. Values the function
    /// considers equal are ordered by their natural ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.extend(vec![1, 3, 2]);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::from_comparator(Comparator::from_fn(compare))
    }

    /// Constructs a new, empty tree ordered by a key extracted from each value.
    pub fn with_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self::from_comparator(Comparator::by_key(key))
    }

    /// Constructs a tree holding clones of `values`.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let mut tree = Self::new();
        tree.nodes = Arena::with_capacity(values.len());
        tree.extend(values.iter().cloned());
        tree
    }

    /// Returns the ordering used by the tree.
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        self.comparator.compare(a, b)
    }

    // Attaches `value` as a new leaf; equal values descend right.
    fn attach(&mut self, value: T) -> NodeId {
        let mut parent = None;
        let mut go_left = false;
        let mut curr = self.root;
        while let Some(id) = curr {
            parent = Some(id);
            go_left = self.compare(&value, &self.nodes[id].value) == Ordering::Less;
            curr = if go_left {
                self.nodes[id].left
            } else {
                self.nodes[id].right
            };
        }

        let id = self.allocate(value, M::fresh());
        match parent {
            None => self.set_root(Some(id)),
            Some(parent) if go_left => self.set_left(parent, Some(id)),
            Some(parent) => self.set_right(parent, Some(id)),
        }
        id
    }

    pub(crate) fn find(&self, target: &T) -> Option<NodeId> {
        let mut curr = self.root;
        while let Some(id) = curr {
            curr = match self.compare(target, &self.nodes[id].value) {
                Ordering::Less => self.nodes[id].left,
                Ordering::Greater => self.nodes[id].right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    // Returns the matching node or, if there is none, the last node visited by the search.
    pub(crate) fn nearest(&self, target: &T) -> Option<NodeId> {
        let mut curr = self.root?;
        loop {
            let next = match self.compare(target, &self.nodes[curr].value) {
                Ordering::Less => self.nodes[curr].left,
                Ordering::Greater => self.nodes[curr].right,
                Ordering::Equal => return Some(curr),
            };
            match next {
                Some(next) => curr = next,
                None => return Some(curr),
            }
        }
    }

    /// Inserts a value into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) {
        let id = self.attach(value);
        M::after_insert(self, id);
    }

    /// Checks if a value equal to `target` exists in the tree.
    pub fn contains(&self, target: &T) -> bool {
        self.find(target).is_some()
    }

    /// Returns the stored value equal to `target`, or `None` if there is no such value.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(7);
    /// assert_eq!(tree.get(&7), Some(&7));
    /// assert_eq!(tree.get(&8), None);
    /// ```
    pub fn get(&self, target: &T) -> Option<&T> {
        self.find(target).map(|id| &self.nodes[id].value)
    }

    /// Removes one value equal to `target` and returns it. Returns `None` if no such value
    /// exists.
    pub fn remove(&mut self, target: &T) -> Option<T> {
        let id = self.find(target)?;
        Some(self.remove_node(id))
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> T {
        let (value, removal) = self.detach(id);
        M::after_remove(self, removal);
        value
    }

    /// Returns the minimum value of the tree. Returns `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        self.min_max(MinMax::Min)
    }

    /// Returns the maximum value of the tree. Returns `None` if the tree is empty.
    pub fn max(&self) -> Option<&T> {
        self.min_max(MinMax::Max)
    }

    /// Returns the value at one end of the tree. Returns `None` if the tree is empty.
    pub fn min_max(&self, end: MinMax) -> Option<&T> {
        self.extreme(end).map(|id| &self.nodes[id].value)
    }

    /// Removes and returns the minimum value. Returns `None` if the tree is empty.
    pub fn remove_min(&mut self) -> Option<T> {
        self.remove_min_max(MinMax::Min)
    }

    /// Removes and returns the maximum value. Returns `None` if the tree is empty.
    pub fn remove_max(&mut self) -> Option<T> {
        self.remove_min_max(MinMax::Max)
    }

    /// Removes and returns the value at one end of the tree. Returns `None` if the tree is empty.
    pub fn remove_min_max(&mut self, end: MinMax) -> Option<T> {
        let id = self.extreme(end)?;
        Some(self.remove_node(id))
    }

    /// Returns the greatest value less than or equal to `target`. Returns `None` if such a value
    /// does not exist.
    pub fn floor(&self, target: &T) -> Option<&T> {
        let mut curr = self.root;
        let mut best = None;
        while let Some(id) = curr {
            let node = &self.nodes[id];
            curr = match self.compare(target, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    best = Some(&node.value);
                    node.right
                },
                Ordering::Equal => return Some(&node.value),
            };
        }
        best
    }

    /// Returns the least value greater than or equal to `target`. Returns `None` if such a value
    /// does not exist.
    pub fn ceil(&self, target: &T) -> Option<&T> {
        let mut curr = self.root;
        let mut best = None;
        while let Some(id) = curr {
            let node = &self.nodes[id];
            curr = match self.compare(target, &node.value) {
                Ordering::Greater => node.right,
                Ordering::Less => {
                    best = Some(&node.value);
                    node.left
                },
                Ordering::Equal => return Some(&node.value),
            };
        }
        best
    }

    /// Checks the structural invariants of the tree and of its balancing strategy. Returns a
    /// description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err("root has a parent link".to_string());
            }
        }

        let mut count = 0;
        let mut level_order = self.level_order();
        while let Some(id) = level_order.next_id() {
            count += 1;
            let node = &self.nodes[id];
            for child in node.left.iter().chain(node.right.iter()) {
                if self.nodes[*child].parent != Some(id) {
                    return Err(format!("child of {:?} has a stale parent link", id));
                }
            }
        }
        if count != self.len() {
            return Err(format!("{} reachable nodes but length is {}", count, self.len()));
        }

        let mut prev: Option<&T> = None;
        for value in self.iter() {
            if let Some(prev) = prev {
                if self.compare(prev, value) == Ordering::Greater {
                    return Err("in-order sequence is not sorted".to_string());
                }
            }
            prev = Some(value);
        }

        M::validate(self)
    }
}

impl<T, M> Default for Tree<T, M>
where
    T: Ord,
    M: Balance,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M> FromIterator<T> for Tree<T, M>
where
    T: Ord,
    M: Balance,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, M> Extend<T> for Tree<T, M>
where
    T: Ord,
    M: Balance,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, M> IntoIterator for Tree<T, M> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(mut self) -> Self::IntoIter {
        let ids: Vec<NodeId> = {
            let mut traverse = self.traverse(TraversalOrder::InOrder);
            let mut ids = Vec::with_capacity(self.len());
            while let Some(id) = traverse.next_id() {
                ids.push(id);
            }
            ids
        };
        let values: Vec<T> = ids
            .into_iter()
            .map(|id| self.nodes.free(id).value)
            .collect();
        IntoIter::new(values)
    }
}

impl<'a, T, M> IntoIterator for &'a Tree<T, M>
where
    T: 'a,
    M: 'a,
{
    type IntoIter = Traverse<'a, T, M>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, M> fmt::Debug for Tree<T, M>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
