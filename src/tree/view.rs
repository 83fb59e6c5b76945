use crate::arena::NodeId;
use crate::tree::Tree;

/// A read-only view of a node in a `Tree<T, M>`.
///
/// Views borrow the tree, so the tree cannot change while a view exists. Child and parent views
/// are produced on demand; nothing is copied.
pub struct NodeView<'a, T, M>
where
    T: 'a,
    M: 'a,
{
    tree: &'a Tree<T, M>,
    id: NodeId,
}

impl<'a, T, M> NodeView<'a, T, M> {
    pub(crate) fn new(tree: &'a Tree<T, M>, id: NodeId) -> Self {
        NodeView { tree, id }
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| NodeView::new(self.tree, id))
    }

    /// Returns the handle of the viewed node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the value stored in the node.
    pub fn value(&self) -> &'a T {
        let tree = self.tree;
        &tree.node(self.id).value
    }

    /// Returns the balancing metadata stored in the node.
    pub fn meta(&self) -> &'a M {
        let tree = self.tree;
        &tree.node(self.id).meta
    }

    pub fn left(&self) -> Option<Self> {
        self.wrap(self.tree.left(self.id))
    }

    pub fn right(&self) -> Option<Self> {
        self.wrap(self.tree.right(self.id))
    }

    pub fn parent(&self) -> Option<Self> {
        self.wrap(self.tree.parent(self.id))
    }

    pub fn is_leaf(&self) -> bool {
        self.tree.node(self.id).is_leaf()
    }
}

impl<'a, T, M> Clone for NodeView<'a, T, M> {
    fn clone(&self) -> Self {
        NodeView::new(self.tree, self.id)
    }
}

impl<'a, T, M> Copy for NodeView<'a, T, M> {}
