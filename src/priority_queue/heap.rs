use crate::compare::Comparator;
use crate::priority_queue::Priority;
use std::cmp::Ordering;
use std::fmt;
use std::slice;

/// A priority queue implemented as a binary heap stored in a vector.
///
/// The value served first sits at index 0 and the children of index `i` are at `2i + 1` and
/// `2i + 2`. Pushing and popping are `O(log n)`; peeking is `O(1)`.
///
/// # Examples
///
/// ```
/// use classic_collections::priority_queue::{HeapPriorityQueue, Priority};
///
/// let mut queue = HeapPriorityQueue::new(Priority::Max);
/// queue.push(3);
/// queue.push(7);
/// queue.push(5);
///
/// assert_eq!(queue.peek(), Some(&7));
/// assert_eq!(queue.pop(), Some(7));
/// assert_eq!(queue.pop(), Some(5));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct HeapPriorityQueue<T> {
    values: Vec<T>,
    comparator: Comparator<T>,
    priority: Priority,
}

impl<T> HeapPriorityQueue<T>
where
    T: Ord,
{
    /// Constructs a new, empty `HeapPriorityQueue<T>` ordered by the natural ordering of `T`.
    pub fn new(priority: Priority) -> Self {
        Self::from_comparator(priority, Comparator::natural())
    }

    /// Constructs a new, empty `HeapPriorityQueue<T>` ordered by a comparison function.
    pub fn with_comparator<F>(priority: Priority, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::from_comparator(priority, Comparator::from_fn(compare))
    }

    /// Constructs a new, empty `HeapPriorityQueue<T>` ordered by a key extracted from each value.
    pub fn with_key<K, F>(priority: Priority, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self::from_comparator(priority, Comparator::by_key(key))
    }

    /// Constructs a new, empty `HeapPriorityQueue<T>` ordered by `comparator`.
    pub fn from_comparator(priority: Priority, comparator: Comparator<T>) -> Self {
        HeapPriorityQueue {
            values: Vec::new(),
            comparator,
            priority,
        }
    }

    /// Constructs a `HeapPriorityQueue<T>` holding the values of `iter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_collections::priority_queue::{HeapPriorityQueue, Priority};
    ///
    /// let queue = HeapPriorityQueue::from_iter(Priority::Min, vec![3, 1, 2]);
    /// assert_eq!(queue.peek(), Some(&1));
    /// ```
    pub fn from_iter<I>(priority: Priority, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut queue = Self::new(priority);
        queue.values.reserve(iter.size_hint().0);
        queue.extend(iter);
        queue
    }

    /// Constructs a `HeapPriorityQueue<T>` holding clones of `values`.
    pub fn from_slice(priority: Priority, values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_iter(priority, values.iter().cloned())
    }

    // Returns `true` if `a` should be served before `b`.
    fn precedes(&self, a: &T, b: &T) -> bool {
        let ordering = self.comparator.compare(a, b);
        match self.priority {
            Priority::Min => ordering == Ordering::Less,
            Priority::Max => ordering == Ordering::Greater,
        }
    }

    fn bubble_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes(&self.values[index], &self.values[parent]) {
                break;
            }
            self.values.swap(index, parent);
            index = parent;
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        let len = self.values.len();
        loop {
            let mut best = index;
            for child in &[2 * index + 1, 2 * index + 2] {
                if *child < len && self.precedes(&self.values[*child], &self.values[best]) {
                    best = *child;
                }
            }
            if best == index {
                break;
            }
            self.values.swap(index, best);
            index = best;
        }
    }

    /// Adds a value to the queue.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
        let index = self.values.len() - 1;
        self.bubble_up(index);
    }

    /// Removes and returns the value served first. Returns `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        let ret = self.values.swap_remove(0);
        if !self.values.is_empty() {
            self.bubble_down(0);
        }
        Some(ret)
    }

    /// Returns the value served first without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.values.first()
    }

    /// Consumes the queue and returns its values in the order they would be served.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut ret = Vec::with_capacity(self.values.len());
        while let Some(value) = self.pop() {
            ret.push(value);
        }
        ret
    }
}

impl<T> HeapPriorityQueue<T> {
    /// Returns the number of values in the queue.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes every value from the queue.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the priority the queue was constructed with.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns an iterator over the values of the queue in heap order.
    pub fn iter(&self) -> slice::Iter<T> {
        self.values.iter()
    }
}

impl<T> Extend<T> for HeapPriorityQueue<T>
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

impl<T> fmt::Debug for HeapPriorityQueue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::HeapPriorityQueue;
    use crate::priority_queue::Priority;

    #[test]
    fn test_len_empty() {
        let mut queue: HeapPriorityQueue<u32> = HeapPriorityQueue::new(Priority::Min);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_min_priority() {
        let mut queue = HeapPriorityQueue::new(Priority::Min);
        queue.extend(vec![5, 1, 4, 1, 3]);
        assert_eq!(queue.peek(), Some(&1));
        assert_eq!(queue.into_sorted_vec(), vec![1, 1, 3, 4, 5]);
    }

    #[test]
    fn test_max_priority() {
        let mut queue = HeapPriorityQueue::new(Priority::Max);
        queue.extend(vec![5, 1, 4, 1, 3]);
        assert_eq!(queue.priority(), Priority::Max);
        assert_eq!(queue.pop(), Some(5));
        assert_eq!(queue.pop(), Some(4));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_with_comparator() {
        let mut queue =
            HeapPriorityQueue::with_comparator(Priority::Min, |a: &&str, b: &&str| {
                a.len().cmp(&b.len())
            });
        queue.extend(vec!["ccc", "a", "bb", "b"]);
        assert_eq!(queue.into_sorted_vec(), vec!["a", "b", "bb", "ccc"]);
    }

    #[test]
    fn test_with_key() {
        let mut queue = HeapPriorityQueue::with_key(Priority::Max, |pair: &(u32, char)| pair.0);
        queue.extend(vec![(2, 'b'), (7, 'a'), (2, 'a'), (4, 'z')]);
        assert_eq!(queue.pop(), Some((7, 'a')));
        assert_eq!(queue.pop(), Some((4, 'z')));
        assert_eq!(queue.pop(), Some((2, 'b')));
        assert_eq!(queue.pop(), Some((2, 'a')));
    }

    #[test]
    fn test_from_iter() {
        let queue = HeapPriorityQueue::from_iter(Priority::Max, (0..50).map(|i| i * 7 % 50));
        assert_eq!(queue.len(), 50);
        for index in 1..queue.len() {
            assert!(queue.values[(index - 1) / 2] >= queue.values[index]);
        }
        assert_eq!(queue.into_sorted_vec(), (0..50).rev().collect::<Vec<u32>>());
    }

    #[test]
    fn test_from_slice() {
        let values = [3, 9, 1, 9, 4];
        let mut queue = HeapPriorityQueue::from_slice(Priority::Min, &values);
        assert_eq!(queue.len(), values.len());
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.into_sorted_vec(), vec![3, 4, 9, 9]);
    }

    #[test]
    fn test_heap_property() {
        let mut queue = HeapPriorityQueue::new(Priority::Min);
        queue.extend((0..100).rev());
        for index in 1..queue.len() {
            assert!(queue.values[(index - 1) / 2] <= queue.values[index]);
        }
        assert_eq!(queue.iter().count(), 100);
    }

    #[test]
    fn test_clear() {
        let mut queue = HeapPriorityQueue::new(Priority::Max);
        queue.push(1);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
