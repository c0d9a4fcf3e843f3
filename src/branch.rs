use crate::reference::NodeId;
use crate::tree::Tree;
use crate::types::Assignment;

/// A child reachable from some node, with the labels collected on the way.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BranchInfo {
    pub node: NodeId,
    /// Labels between the queried node (exclusive) and `node` (inclusive).
    pub delta: Assignment,
}

impl Tree {
    /// Return the branches below `node`.
    ///
    /// Each child is reported with its own label as delta. Runs of single,
    /// non-leaf children are looked through: if `node` has exactly one child and
    /// that child has children of its own, the branches of the child are returned
    /// instead, with the child's label prepended to each delta.
    ///
    /// The tree is not modified.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not live.
    pub fn branch_info(&self, node: NodeId) -> Vec<BranchInfo> {
        let mut prefix = Assignment::new();
        let mut current = node;

        loop {
            let branches: Vec<BranchInfo> = self
                .children(current)
                .map(|child| {
                    let mut delta = prefix.clone();
                    delta.extend(self.node(child).label());
                    BranchInfo { node: child, delta }
                })
                .collect();

            match branches.as_slice() {
                [single] if !self.is_leaf(single.node) => {
                    prefix = single.delta.clone();
                    current = single.node;
                }
                _ => return branches,
            }
        }
    }
}
