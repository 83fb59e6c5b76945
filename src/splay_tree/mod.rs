//! Self-adjusting binary search tree with the additional property that recently accessed elements
//! are quick to access again.

use crate::arena::NodeId;
use crate::compare::Comparator;
use crate::tree::{BinarySearchTree, IntoIter, LevelOrder, MinMax, NodeView, TraversalOrder, Traverse};
use log::trace;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

/// An ordered collection implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary tree with an additional property that recently
/// accessed items are quick to access again. After each operation, the item that was accessed is
/// "splayed" to the root of the tree. Because lookups restructure the tree, they require a
/// mutable reference. No balancing metadata is stored in the nodes.
///
/// # Examples
///
/// ```
/// use classic_collections::splay_tree::SplayTree;
///
/// let mut tree = SplayTree::new();
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(2);
///
/// assert!(tree.contains(&1));
/// assert_eq!(tree.root(), Some(&1));
///
/// assert_eq!(tree.max(), Some(&3));
/// assert_eq!(tree.root(), Some(&3));
///
/// assert_eq!(tree.remove(&2), Some(2));
/// assert_eq!(tree.len(), 2);
/// ```
pub struct SplayTree<T> {
    tree: BinarySearchTree<T>,
}

impl<T> SplayTree<T> {
    // Moves `node` to the root with zig, zig-zig and zig-zag steps.
    fn splay(&mut self, node: NodeId) {
        trace!("splay {:?}", node);
        let tree = &mut self.tree;
        while let Some(parent) = tree.parent(node) {
            let node_is_left = tree.left(parent) == Some(node);
            match tree.parent(parent) {
                None => {
                    if node_is_left {
                        tree.rotate_right(parent);
                    } else {
                        tree.rotate_left(parent);
                    }
                },
                Some(grandparent) => {
                    let parent_is_left = tree.left(grandparent) == Some(parent);
                    match (node_is_left, parent_is_left) {
                        (true, true) => {
                            tree.rotate_right(grandparent);
                            tree.rotate_right(parent);
                        },
                        (false, false) => {
                            tree.rotate_left(grandparent);
                            tree.rotate_left(parent);
                        },
                        (true, false) => {
                            tree.rotate_right(parent);
                            tree.rotate_left(grandparent);
                        },
                        (false, true) => {
                            tree.rotate_left(parent);
                            tree.rotate_right(grandparent);
                        },
                    }
                },
            }
        }
    }

    // Removes the root and joins its subtrees. The in-order neighbour of the removed value ends
    // up at the root.
    fn remove_root(&mut self) -> Option<T> {
        let root = self.tree.root_id()?;
        let left = self.tree.left(root);
        let right = self.tree.right(root);
        let value = self.tree.release(root);
        match (left, right) {
            (None, None) => self.tree.set_root(None),
            (Some(left), None) => {
                self.tree.set_root(Some(left));
                let max = self.tree.max_from(left);
                self.splay(max);
            },
            (left, Some(right)) => {
                self.tree.set_root(Some(right));
                let min = self.tree.min_from(right);
                self.splay(min);
                self.tree.set_left(min, left);
            },
        }
        Some(value)
    }

    /// Returns the value at the root without restructuring the tree.
    pub fn root(&self) -> Option<&T> {
        self.tree.root_view().map(|root| root.value())
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of levels of the tree.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns an in-order iterator over the tree. Iteration does not splay.
    pub fn iter(&self) -> Traverse<T, ()> {
        self.tree.iter()
    }

    /// Returns an iterator over the tree in the given depth-first order.
    pub fn traverse(&self, order: TraversalOrder) -> Traverse<T, ()> {
        self.tree.traverse(order)
    }

    /// Returns an iterator over the tree level by level.
    pub fn level_order(&self) -> LevelOrder<T, ()> {
        self.tree.level_order()
    }

    /// Returns a read-only view of the root node.
    pub fn root_view(&self) -> Option<NodeView<T, ()>> {
        self.tree.root_view()
    }
}

impl<T> SplayTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `SplayTree<T>`.
    pub fn new() -> Self {
        Self::from_comparator(Comparator::natural())
    }

    /// Constructs a new, empty `SplayTree<T>` ordered by `comparator`.
    pub fn from_comparator(comparator: Comparator<T>) -> Self {
        SplayTree {
            tree: BinarySearchTree::from_comparator(comparator),
        }
    }

    /// Constructs a new, empty `SplayTree<T>` ordered by a comparison function.
    pub fn with_comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::from_comparator(Comparator::from_fn(compare))
    }

    /// Constructs a new, empty `SplayTree<T>` ordered by a key extracted from each value.
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
        values.iter().cloned().collect()
    }

    // Splays the node equal to `target`, or the last node on its search path, to the root.
    fn access(&mut self, target: &T) -> Option<NodeId> {
        let node = self.tree.nearest(target)?;
        self.splay(node);
        if self.tree.compare(target, &self.tree.node(node).value) == Ordering::Equal {
            Some(node)
        } else {
            None
        }
    }

    /// Inserts a value into the tree. The new value becomes the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::splay_tree::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn insert(&mut self, value: T) {
        let root = match self.tree.nearest(&value) {
            Some(nearest) => {
                self.splay(nearest);
                nearest
            },
            None => {
                let id = self.tree.allocate(value, ());
                self.tree.set_root(Some(id));
                return;
            },
        };

        let goes_left = self.tree.compare(&value, &self.tree.node(root).value) == Ordering::Less;
        let id = self.tree.allocate(value, ());
        if goes_left {
            let left = self.tree.left(root);
            self.tree.set_left(root, None);
            self.tree.set_left(id, left);
            self.tree.set_right(id, Some(root));
        } else {
            let right = self.tree.right(root);
            self.tree.set_right(root, None);
            self.tree.set_right(id, right);
            self.tree.set_left(id, Some(root));
        }
        self.tree.set_root(Some(id));
    }

    /// Checks if a value equal to `target` exists in the tree. The closest match is splayed to
    /// the root.
    pub fn contains(&mut self, target: &T) -> bool {
        self.access(target).is_some()
    }

    /// Returns the stored value equal to `target`, splaying it to the root. Returns `None` if no
    /// such value exists.
    pub fn get(&mut self, target: &T) -> Option<&T> {
        let node = self.access(target)?;
        Some(&self.tree.node(node).value)
    }

    /// Removes one value equal to `target` and returns it. Returns `None` if no such value
    /// exists.
    pub fn remove(&mut self, target: &T) -> Option<T> {
        self.access(target)?;
        self.remove_root()
    }

    /// Returns the value at one end of the tree after splaying it to the root.
    pub fn min_max(&mut self, end: MinMax) -> Option<&T> {
        let node = self.tree.extreme(end)?;
        self.splay(node);
        Some(&self.tree.node(node).value)
    }

    /// Returns the minimum value after splaying it to the root.
    pub fn min(&mut self) -> Option<&T> {
        self.min_max(MinMax::Min)
    }

    /// Returns the maximum value after splaying it to the root.
    pub fn max(&mut self) -> Option<&T> {
        self.min_max(MinMax::Max)
    }

    /// Removes and returns the value at one end of the tree.
    pub fn remove_min_max(&mut self, end: MinMax) -> Option<T> {
        let node = self.tree.extreme(end)?;
        self.splay(node);
        self.remove_root()
    }

    /// Removes and returns the minimum value.
    pub fn remove_min(&mut self) -> Option<T> {
        self.remove_min_max(MinMax::Min)
    }

    /// Removes and returns the maximum value.
    pub fn remove_max(&mut self) -> Option<T> {
        self.remove_min_max(MinMax::Max)
    }

    /// Checks the structural invariants of the tree.
    pub fn validate(&self) -> Result<(), String> {
        self.tree.validate()
    }
}

impl<T> Default for SplayTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SplayTree<T>
where
    T: Ord,
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

impl<T> Extend<T> for SplayTree<T>
where
    T: Ord,
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

impl<T> IntoIterator for SplayTree<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SplayTree<T>
where
    T: 'a,
{
    type IntoIter = Traverse<'a, T, ()>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for SplayTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

#[cfg(test)]
mod tests {
    use super::SplayTree;
    use crate::tree::BinarySearchTree;

    #[test]
    fn test_len_empty() {
        let mut tree: SplayTree<u32> = SplayTree::new();
        assert_eq!(tree.len(), 0);
        assert!(!tree.contains(&1));
        assert_eq!(tree.min(), None);
        assert_eq!(tree.remove(&1), None);
    }

    #[test]
    fn test_insert_becomes_root() {
        let mut tree = SplayTree::new();
        for value in &[5, 3, 8, 1, 4, 7, 9] {
            tree.insert(*value);
            assert_eq!(tree.root(), Some(value));
            assert_eq!(tree.validate(), Ok(()));
        }
        assert_eq!(
            tree.iter().cloned().collect::<Vec<u32>>(),
            vec![1, 3, 4, 5, 7, 8, 9],
        );
    }

    #[test]
    fn test_repeated_lookup_stays_at_root() {
        let mut tree: SplayTree<u32> = (0..64).collect();
        for _ in 0..3 {
            assert!(tree.contains(&17));
            assert_eq!(tree.root(), Some(&17));
        }
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_missed_lookup_splays_neighbour() {
        let mut tree = SplayTree::from_slice(&[10, 20, 30, 40]);
        assert!(!tree.contains(&25));
        let root = *tree.root().unwrap();
        assert!(root == 20 || root == 30);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_zig_zig() {
        // inserting in ascending order leaves a left path 3 -> 2 -> 1
        let mut tree = SplayTree::from_slice(&[1, 2, 3]);
        assert_eq!(tree.get(&1), Some(&1));
        let root = tree.root_view().unwrap();
        assert_eq!(root.right().map(|view| *view.value()), Some(2));
        assert_eq!(
            root.right().and_then(|view| view.right()).map(|view| *view.value()),
            Some(3),
        );
    }

    #[test]
    fn test_zig_zag() {
        let mut tree = SplayTree {
            tree: BinarySearchTree::from_slice(&[5, 1, 3, 7]),
        };
        assert!(tree.contains(&3));
        let root = tree.root_view().unwrap();
        assert_eq!(*root.value(), 3);
        assert_eq!(root.left().map(|view| *view.value()), Some(1));
        assert_eq!(root.right().map(|view| *view.value()), Some(5));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_remove_splays_neighbour() {
        let mut tree = SplayTree::from_slice(&[10, 20, 30, 40, 50]);
        assert_eq!(tree.remove(&30), Some(30));
        assert_eq!(tree.root(), Some(&40));
        assert_eq!(tree.remove(&50), Some(50));
        assert_eq!(tree.root(), Some(&40));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![10, 20, 40]);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = SplayTree::from_slice(&[1, 2]);
        assert_eq!(tree.remove(&3), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_min_max() {
        let mut tree = SplayTree::from_slice(&[4, 2, 6, 1, 3]);
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.root(), Some(&1));
        assert_eq!(tree.max(), Some(&6));
        assert_eq!(tree.root(), Some(&6));
        assert_eq!(tree.remove_min(), Some(1));
        assert_eq!(tree.remove_max(), Some(6));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_sequential_access_flattens() {
        let mut tree: SplayTree<u32> = (0..100).collect();
        for value in 0..100 {
            assert!(tree.contains(&value));
        }
        assert_eq!(tree.root(), Some(&99));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_into_iter() {
        let tree = SplayTree::from_slice(&[3, 1, 2]);
        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 2, 3]);
    }
}
