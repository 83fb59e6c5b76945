//! Priority queues that serve either the smallest or the largest value first.
//!
//! [`HeapPriorityQueue`] is an array-backed binary heap. [`TreePriorityQueue`] keeps its values
//! in a [`RedBlackTree`](crate::red_black_tree::RedBlackTree) and removes from one end of it.

mod heap;
mod tree;

pub use self::heap::HeapPriorityQueue;
pub use self::tree::TreePriorityQueue;

use crate::tree::MinMax;

/// Selects which end of the ordering a priority queue serves first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Priority {
    Min,
    Max,
}

impl Priority {
    pub(crate) fn end(self) -> MinMax {
        match self {
            Priority::Min => MinMax::Min,
            Priority::Max => MinMax::Max,
        }
    }
}
