//! Visiting orders for [`OSRBTree::traverse`](crate::OSRBTree::traverse) and the ordered
//! walks.

/// The order in which [`OSRBTree::traverse`](crate::OSRBTree::traverse) visits nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, node, right subtree: ascending key order.
    InOrder,
    /// Left subtree, right subtree, then node.
    PostOrder,
    /// Breadth first, level by level from the root, left to right.
    LevelOrder,
}

/// Key order for the walks over individual chain entries.
///
/// Within one key, entries are always visited front to back (newest first).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}
