use crate::arena::NodeId;
use crate::tree::Tree;
use std::collections::VecDeque;
use std::vec;

/// The order in which a depth-first traversal yields values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

/// A depth-first iterator over a `Tree<T, M>`.
///
/// The iterator keeps only the current node and the node it came from. Whether it arrived from
/// the parent, the left child or the right child decides where to go next and whether the
/// current value is yielded.
pub struct Traverse<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a Tree<T, M>,
    order: TraversalOrder,
    current: Option<NodeId>,
    previous: Option<NodeId>,
}

impl<'a, T, M> Traverse<'a, T, M> {
    pub(crate) fn new(tree: &'a Tree<T, M>, order: TraversalOrder) -> Self {
        Traverse {
            tree,
            order,
            current: tree.root_id(),
            previous: None,
        }
    }

    pub(crate) fn next_id(&mut self) -> Option<NodeId> {
        while let Some(id) = self.current {
            let node = self.tree.node(id);
            let (emit, next) = if self.previous.is_some() && self.previous == node.right {
                (self.order == TraversalOrder::PostOrder, node.parent)
            } else if self.previous.is_some() && self.previous == node.left {
                let emit = match self.order {
                    TraversalOrder::PreOrder => false,
                    TraversalOrder::InOrder => true,
                    TraversalOrder::PostOrder => node.right.is_none(),
                };
                (emit, node.right.or(node.parent))
            } else {
                let emit = match self.order {
                    TraversalOrder::PreOrder => true,
                    TraversalOrder::InOrder => node.left.is_none(),
                    TraversalOrder::PostOrder => node.is_leaf(),
                };
                (emit, node.left.or(node.right).or(node.parent))
            };

            self.previous = Some(id);
            self.current = next;
            if emit {
                return Some(id);
            }
        }
        None
    }
}

impl<'a, T, M> Iterator for Traverse<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_id().map(|id| &tree.node(id).value)
    }
}

/// A breadth-first iterator over a `Tree<T, M>`.
pub struct LevelOrder<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a Tree<T, M>,
    queue: VecDeque<NodeId>,
}

impl<'a, T, M> LevelOrder<'a, T, M> {
    pub(crate) fn new(tree: &'a Tree<T, M>) -> Self {
        LevelOrder {
            tree,
            queue: tree.root_id().into_iter().collect(),
        }
    }

    pub(crate) fn next_id(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        let node = self.tree.node(id);
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(id)
    }
}

impl<'a, T, M> Iterator for LevelOrder<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_id().map(|id| &tree.node(id).value)
    }
}

/// An owning iterator for `Tree<T, M>`.
///
/// This iterator yields owned values in-order.
pub struct IntoIter<T> {
    values: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        IntoIter {
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}
