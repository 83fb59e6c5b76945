//! Index-based node pool used by the search trees.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in an `Arena<T>`.
///
/// Handles are plain indices, so links between tree nodes never form ownership cycles. A handle
/// becomes dangling once its object is freed and may later be reused by another allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<NodeId>),
}

/// A pool that allocates objects of a single type and addresses them through `NodeId` handles.
///
/// Freed slots are chained into a free list and reused by later allocations, so the pool only
/// grows when every slot is occupied. The backing storage is a single `Vec` and no unsafe code
/// is used.
///
/// # Examples
///
/// ```
/// use classic_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    head: Option<NodeId>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Arena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object and returns its handle.
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            },
            Some(id) => {
                let vacant = mem::replace(&mut self.slots[id.0], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => {
                        self.head = next;
                        id
                    },
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                }
            },
        }
    }

    /// Deallocates an object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a live object.
    pub fn free(&mut self, id: NodeId) -> T {
        let slot = self
            .slots
            .get_mut(id.0)
            .expect("Error: attempting to free an out of bounds slot.");
        match mem::replace(slot, Slot::Vacant(self.head)) {
            Slot::Occupied(value) => {
                self.head = Some(id);
                self.len -= 1;
                value
            },
            Slot::Vacant(next) => {
                *slot = Slot::Vacant(next);
                panic!("Error: attempting to free a vacant slot.");
            },
        }
    }

    /// Returns an immutable reference to an object, or `None` if `id` is not live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if `id` is not live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct live objects.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either handle is not live.
    pub fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut T, &mut T) {
        assert_ne!(a, b, "Error: pair_mut requires distinct handles.");
        let swapped = a.0 > b.0;
        let (low, high) = if swapped { (b.0, a.0) } else { (a.0, b.0) };
        let (head, tail) = self.slots.split_at_mut(high);
        let low = match &mut head[low] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => panic!("Error: handle refers to a vacant slot."),
        };
        let high = match &mut tail[0] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => panic!("Error: handle refers to a vacant slot."),
        };
        if swapped {
            (high, low)
        } else {
            (low, high)
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and releases the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: handle does not refer to a live object.")
    }
}
