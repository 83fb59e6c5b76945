use crate::compare::Comparator;
use crate::priority_queue::Priority;
use crate::red_black_tree::{Color, RedBlackTree};
use crate::tree::Traverse;
use std::cmp::Ordering;
use std::fmt;

/// A priority queue backed by a red-black tree.
///
/// Values are kept sorted, so peeking walks to one end of the tree and popping removes it.
///
/// # Examples
///
/// ```
/// use classic_collections::priority_queue::{Priority, TreePriorityQueue};
///
/// let mut queue = TreePriorityQueue::new(Priority::Min);
/// queue.push(3);
/// queue.push(1);
/// queue.push(2);
///
/// assert_eq!(queue.peek(), Some(&1));
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.into_sorted_vec(), vec![2, 3]);
/// ```
pub struct TreePriorityQueue<T> {
    tree: RedBlackTree<T>,
    priority: Priority,
}

impl<T> TreePriorityQueue<T>
where
    T: Ord,
{
    /// Constructs a new, empty `TreePriorityQueue<T>` ordered by the natural ordering of `T`.
    pub fn new(priority: Priority) -> Self {
        TreePriorityQueue {
            tree: RedBlackTree::new(),
            priority,
        }
    }

    /// Constructs a new, empty `TreePriorityQueue<T>` ordered by a comparison function.
    pub fn with_comparator<F>(priority: Priority, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        TreePriorityQueue {
            tree: RedBlackTree::with_comparator(compare),
            priority,
        }
    }

    /// Constructs a new, empty `TreePriorityQueue<T>` ordered by a key extracted from each value.
    pub fn with_key<K, F>(priority: Priority, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        TreePriorityQueue {
            tree: RedBlackTree::with_key(key),
            priority,
        }
    }

    /// Constructs a new, empty `TreePriorityQueue<T>` ordered by `comparator`.
    pub fn from_comparator(priority: Priority, comparator: Comparator<T>) -> Self {
        TreePriorityQueue {
            tree: RedBlackTree::from_comparator(comparator),
            priority,
        }
    }

    /// Constructs a `TreePriorityQueue<T>` holding the values of `iter`.
    pub fn from_iter<I>(priority: Priority, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = Self::new(priority);
        queue.extend(iter);
        queue
    }

    /// Constructs a `TreePriorityQueue<T>` holding clones of `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::priority_queue::{Priority, TreePriorityQueue};
    ///
    /// let queue = TreePriorityQueue::from_slice(Priority::Max, &[3, 1, 2]);
    /// assert_eq!(queue.peek(), Some(&3));
    /// ```
    pub fn from_slice(priority: Priority, values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_iter(priority, values.iter().cloned())
    }

    /// Adds a value to the queue.
    pub fn push(&mut self, value: T) {
        self.tree.insert(value);
    }

    /// Removes and returns the value served first. Returns `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.tree.remove_min_max(self.priority.end())
    }

    /// Returns the value served first without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.tree.min_max(self.priority.end())
    }

    /// Consumes the queue and returns its values in the order they would be served.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut ret: Vec<T> = self.tree.into_iter().collect();
        if self.priority == Priority::Max {
            ret.reverse();
        }
        ret
    }
}

impl<T> TreePriorityQueue<T> {
    /// Returns the number of values in the queue.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every value from the queue.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the priority the queue was constructed with.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns an iterator over the values of the queue in ascending order.
    pub fn iter(&self) -> Traverse<T, Color> {
        self.tree.iter()
    }
}

impl<T> Extend<T> for TreePriorityQueue<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> fmt::Debug for TreePriorityQueue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.tree.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TreePriorityQueue;
    use crate::compare::Comparator;
    use crate::priority_queue::Priority;

    #[test]
    fn test_len_empty() {
        let mut queue: TreePriorityQueue<u32> = TreePriorityQueue::new(Priority::Max);
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_min_priority() {
        let mut queue = TreePriorityQueue::new(Priority::Min);
        queue.extend(vec![4, 2, 2, 9]);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.peek(), Some(&4));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_max_priority() {
        let mut queue = TreePriorityQueue::new(Priority::Max);
        queue.extend(vec![4, 2, 9, 7]);
        assert_eq!(queue.peek(), Some(&9));
        assert_eq!(queue.iter().cloned().collect::<Vec<u32>>(), vec![2, 4, 7, 9]);
        assert_eq!(queue.into_sorted_vec(), vec![9, 7, 4, 2]);
    }

    #[test]
    fn test_with_comparator() {
        let mut queue = TreePriorityQueue::with_comparator(Priority::Max, |a: &u32, b: &u32| {
            (a % 10).cmp(&(b % 10))
        });
        queue.extend(vec![19, 21, 5, 15]);
        assert_eq!(queue.pop(), Some(19));
        assert_eq!(queue.pop(), Some(15));
        assert_eq!(queue.pop(), Some(5));
    }

    #[test]
    fn test_with_key() {
        let mut queue = TreePriorityQueue::with_key(Priority::Min, |word: &&str| word.len());
        queue.extend(vec!["ccc", "bb", "a", "dd"]);
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("bb"));
        assert_eq!(queue.pop(), Some("dd"));
        assert_eq!(queue.pop(), Some("ccc"));
    }

    #[test]
    fn test_from_comparator() {
        let comparator = Comparator::from_fn(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        let mut queue = TreePriorityQueue::from_comparator(Priority::Max, comparator);
        queue.extend(vec![-8, 3, 5, -1]);
        assert_eq!(queue.peek(), Some(&-8));
        assert_eq!(queue.into_sorted_vec(), vec![-8, 5, 3, -1]);
    }

    #[test]
    fn test_from_iter() {
        let queue = TreePriorityQueue::from_iter(Priority::Min, (0..50).map(|i| i * 7 % 50));
        assert_eq!(queue.len(), 50);
        assert_eq!(queue.peek(), Some(&0));
        assert_eq!(queue.into_sorted_vec(), (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_from_slice() {
        let values = [3, 9, 1, 9, 4];
        let mut queue = TreePriorityQueue::from_slice(Priority::Max, &values);
        assert_eq!(queue.len(), values.len());
        assert_eq!(queue.pop(), Some(9));
        assert_eq!(queue.pop(), Some(9));
        assert_eq!(queue.into_sorted_vec(), vec![4, 3, 1]);
    }

    #[test]
    fn test_clear() {
        let mut queue = TreePriorityQueue::new(Priority::Min);
        queue.extend(0..10);
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.pop(), None);
    }
}
