use thiserror::Error;

use crate::reference::NodeId;

/// Errors reported by fallible tree operations.
///
/// Every fallible operation checks its input before touching the tree, so an
/// `Err` always leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A leaf-table row has a different length than the first row.
    #[error("row {row} has {found} values, expected {expected}")]
    ArityMismatch { row: usize, expected: usize, found: usize },

    /// A leaf position is not below the current leaf count.
    #[error("leaf position {index} is out of range for {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    /// A node handle does not name a live node of the tree.
    #[error("node {0} is not live in this tree")]
    InvalidNode(NodeId),
}
