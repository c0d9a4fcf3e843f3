use crate::reference::NodeId;
use crate::types::Var;

/// Where a node hangs in its parent's child list.
///
/// The head of a sibling chain points at its parent, every other child at its
/// previous sibling. This is enough to unlink a childless node in O(1).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BackRef {
    /// Detached node, or the root.
    #[default]
    None,
    Parent(NodeId),
    PrevSibling(NodeId),
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Node {
    /// Constrained variable; `None` for the root and for placeholders.
    pub variable: Option<Var>,
    pub value: bool,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub back: BackRef,
}

impl Node {
    /// Create an unlinked node with the given label.
    pub fn new(variable: Option<Var>, value: bool) -> Self {
        Self {
            variable,
            value,
            ..Self::default()
        }
    }

    /// The `(variable, value)` pair this node contributes to an assignment.
    pub fn label(&self) -> Option<(Var, bool)> {
        self.variable.map(|var| (var, self.value))
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}
