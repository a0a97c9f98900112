//! Invariant violations reported by `validate`.
//!
//! Slots are arena indices; they identify nodes without requiring keys to be printable.

use thiserror::Error;

/// A broken red-black or binary-search-tree invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    /// The root is red.
    #[error("root is red")]
    RedRoot,

    /// A red node has a red child.
    #[error("red node in slot {parent} has red child in slot {child}")]
    RedChild {
        /// The red parent.
        parent: usize,
        /// Its red child.
        child: usize,
    },

    /// Paths through the two children of a node pass through different numbers of black nodes.
    #[error("black height mismatch under slot {slot}: {left} on the left, {right} on the right")]
    BlackHeight {
        /// The node whose subtrees disagree.
        slot: usize,
        /// The black height of its left subtree.
        left: usize,
        /// The black height of its right subtree.
        right: usize,
    },

    /// A node's parent link does not point back at the node that owns it.
    #[error("parent link of slot {slot} is inconsistent")]
    BrokenParent {
        /// The node whose parent link is wrong.
        slot: usize,
    },

    /// An in-order walk reached a key that compares less than the key before it.
    #[error("key in slot {slot} is out of order")]
    OutOfOrder {
        /// The out-of-order node.
        slot: usize,
    },

    /// The number of reachable nodes differs from the tree's length.
    #[error("expected {expected} nodes, found {found}")]
    Len {
        /// The tree's recorded length.
        expected: usize,
        /// The number of nodes actually present.
        found: usize,
    },
}
