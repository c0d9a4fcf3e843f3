//! Debug utilities for inspecting tree structure.
//!
//! Everything here recomputes its answer by walking the nodes, independently of
//! the cached leaf index. This is primarily useful in tests and during
//! development, to cross-check the index against the actual structure.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::node::BackRef;
use crate::reference::NodeId;
use crate::tree::Tree;
use crate::types::{fmt_assignment, Assignment, Var};

/// A broken structural invariant, as found by [`Tree::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("arena holds {live} live nodes, but {reachable} are reachable from the root")]
    NodeCount { live: usize, reachable: usize },

    #[error("node {node} has back-reference {found:?}, expected {expected:?}")]
    BackRef {
        node: NodeId,
        expected: BackRef,
        found: BackRef,
    },

    #[error("variable {var} is tested twice on the path to node {node}")]
    RepeatedVariable { node: NodeId, var: Var },

    #[error("leaf index holds {indexed} entries, but the tree has {found} leaves")]
    LeafCount { indexed: usize, found: usize },

    #[error("leaf index entry {position} does not match the tree")]
    LeafMismatch { position: usize },
}

impl Tree {
    /// Leaf assignments recomputed by a depth-first walk from the root.
    ///
    /// Agrees with [`Tree::leaf_assignments`] on every well-formed tree.
    pub fn propagated_leaf_assignments(&self) -> Vec<Assignment> {
        self.propagated_leaves().into_iter().map(|(_, assignment)| assignment).collect()
    }

    fn propagated_leaves(&self) -> Vec<(NodeId, Assignment)> {
        let mut leaves = Vec::new();
        if self.is_leaf(self.root) {
            return leaves;
        }

        // Children are pushed in reverse so that they pop in sibling order.
        let mut stack = vec![(self.root, Assignment::new())];
        while let Some((id, mut path)) = stack.pop() {
            path.extend(self.node(id).label());
            if id != self.root && self.is_leaf(id) {
                leaves.push((id, path));
                continue;
            }
            let children: Vec<NodeId> = self.children(id).collect();
            for &child in children.iter().rev() {
                stack.push((child, path.clone()));
            }
        }
        leaves
    }

    /// Number of nodes reachable from the root, root included.
    pub fn reachable_node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.children(id));
        }
        count
    }

    /// Verify the structural invariants of the tree.
    ///
    /// Checks that the arena holds exactly the reachable nodes, that every
    /// back-reference points at the parent (chain heads) or the previous
    /// sibling, that no variable repeats along a path, and that the leaf index
    /// matches the leaves found by a fresh traversal, in order.
    pub fn check(&self) -> Result<(), Violation> {
        let reachable = self.reachable_node_count();
        if reachable != self.node_count() {
            return Err(Violation::NodeCount {
                live: self.node_count(),
                reachable,
            });
        }

        let mut stack = vec![(self.root, HashSet::new())];
        while let Some((id, mut seen)) = stack.pop() {
            if let Some(var) = self.node(id).variable {
                if !seen.insert(var) {
                    return Err(Violation::RepeatedVariable { node: id, var });
                }
            }
            let mut expected = BackRef::Parent(id);
            for child in self.children(id) {
                let found = self.node(child).back;
                if found != expected {
                    return Err(Violation::BackRef {
                        node: child,
                        expected,
                        found,
                    });
                }
                expected = BackRef::PrevSibling(child);
                stack.push((child, seen.clone()));
            }
        }

        let propagated = self.propagated_leaves();
        if propagated.len() != self.leaf_count() {
            return Err(Violation::LeafCount {
                indexed: self.leaf_count(),
                found: propagated.len(),
            });
        }
        for (position, (leaf, (node, assignment))) in self.leaves().iter().zip(&propagated).enumerate() {
            if leaf.node != *node || leaf.assignment != *assignment {
                return Err(Violation::LeafMismatch { position });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tree (n_bins = {}, n_leaves = {}, n_nodes = {}):",
            self.bin_count(),
            self.leaf_count(),
            self.node_count()
        )?;
        for leaf in self.leaves() {
            write!(f, "  {}: ", leaf.node)?;
            fmt_assignment(f, &leaf.assignment)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::concat::{hcat, vcat};

    #[test]
    fn test_propagated_matches_index() {
        let a = Tree::from_leaf_table(&[[false, true], [true, false], [true, true]]).unwrap();
        let b = Tree::single_path(Some(Var::new(0)), false, 1);
        let mut tree = hcat([&vcat(&a, &b), &a]);
        assert_eq!(tree.propagated_leaf_assignments(), tree.leaf_assignments());
        assert_eq!(tree.check(), Ok(()));

        tree.prune_leaves(&[1, 3]).unwrap();
        assert_eq!(tree.propagated_leaf_assignments(), tree.leaf_assignments());
        assert_eq!(tree.check(), Ok(()));
    }

    #[test]
    fn test_check_empty() {
        let tree = Tree::empty();
        assert_eq!(tree.reachable_node_count(), 1);
        assert!(tree.propagated_leaf_assignments().is_empty());
        assert_eq!(tree.check(), Ok(()));
    }

    #[test]
    fn test_check_detects_stale_index() {
        let mut tree = Tree::from_leaf_table(&[[false], [true]]).unwrap();
        tree.leaves.swap(0, 1);
        assert_eq!(tree.check(), Err(Violation::LeafMismatch { position: 0 }));

        tree.leaves.pop();
        assert_eq!(tree.check(), Err(Violation::LeafCount { indexed: 1, found: 2 }));
    }

    #[test]
    fn test_check_detects_bad_back_reference() {
        let mut tree = Tree::from_leaf_table(&[[false], [true]]).unwrap();
        let high = tree.leaves[1].node;
        tree.arena[high].back = BackRef::Parent(tree.root);
        assert!(matches!(tree.check(), Err(Violation::BackRef { node, .. }) if node == high));
    }

    #[test]
    fn test_check_detects_repeated_variable() {
        let mut tree = Tree::single_path(Some(Var::new(0)), true, 1);
        let leaf = tree.leaves[0].node;
        let again = tree.arena.allocate(Some(Var::new(0)), false);
        tree.arena.attach(leaf, None, again);
        assert_eq!(
            tree.check(),
            Err(Violation::RepeatedVariable {
                node: again,
                var: Var::new(0)
            })
        );
    }

    #[test]
    fn test_display() {
        let tree = Tree::from_leaf_table(&[[true, false]]).unwrap();
        assert_eq!(tree.to_string(), "Tree (n_bins = 2, n_leaves = 1, n_nodes = 3):\n  @2: x0 ~x1\n");
    }
}
