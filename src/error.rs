use thiserror::Error;

/// Failures surfaced by the fallible bulk operations.
///
/// Looking up or removing a key that is not present is never an error; those operations
/// return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Room for new nodes or chain cells could not be reserved. The operation was not
    /// attempted and every tree involved is unchanged.
    #[error("could not reserve room for {additional} more {what}")]
    Reserve {
        /// Which storage ran out: `"nodes"` or `"values"`.
        what: &'static str,
        /// How many more slots were requested.
        additional: usize,
    },
}

/// A broken structural invariant, as reported by [`OSRBTree::check`](crate::OSRBTree::check).
///
/// `position` is the node's zero-based place in key order (not its rank, which counts
/// chain entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// The root is red.
    #[error("root node is red")]
    RedRoot,
    /// A key does not compare greater than its in-order predecessor.
    #[error("key at position {position} does not follow its predecessor")]
    OutOfOrder {
        /// Position of the offending node.
        position: usize,
    },
    /// A red node has a red child.
    #[error("red node at position {position} has a red child")]
    RedRed {
        /// Position of the parent.
        position: usize,
    },
    /// A red link leans right.
    #[error("node at position {position} has a red right child")]
    RightLeaningRed {
        /// Position of the parent.
        position: usize,
    },
    /// A child does not point back at its parent, or the root has a parent.
    #[error("parent link of node at position {position} is broken")]
    BrokenParent {
        /// Position of the child.
        position: usize,
    },
    /// A chain's recorded length disagrees with its cells.
    #[error("chain at position {position} records {recorded} values but links {linked}")]
    ChainLength {
        /// Position of the node.
        position: usize,
        /// The stored chain length.
        recorded: usize,
        /// The number of linked cells.
        linked: usize,
    },
    /// A subtree size is not its chain length plus its children's sizes.
    #[error("subtree size at position {position} is {stored}, expected {expected}")]
    SizeMismatch {
        /// Position of the node.
        position: usize,
        /// The stored size.
        stored: usize,
        /// The size recomputed from the node's chain and children.
        expected: usize,
    },
    /// Two paths from the root to a missing child cross different numbers of black nodes.
    #[error("black height below position {position} is {found}, expected {expected}")]
    BlackHeight {
        /// Position of the node with the missing child.
        position: usize,
        /// Black height of the first path examined.
        expected: usize,
        /// Black height of this path.
        found: usize,
    },
}
