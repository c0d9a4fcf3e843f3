//! In-place pruning.
//!
//! Removing a leaf unlinks it from its parent's child list. A parent left
//! without children is unlinked in turn, so whole chains that only led to the
//! pruned leaf collapse; the root is the only node that is never released.

use log::debug;

use crate::error::TreeError;
use crate::node::BackRef;
use crate::reference::NodeId;
use crate::tree::Tree;

impl Tree {
    /// Remove the leaves at the given positions of the leaf index.
    ///
    /// All positions are checked before anything is removed. The remaining
    /// leaves keep their relative order; a position listed twice is pruned once.
    ///
    /// # Errors
    ///
    /// [`TreeError::IndexOutOfRange`] if a position is not below [`Tree::leaf_count`].
    pub fn prune_leaves(&mut self, positions: &[usize]) -> Result<(), TreeError> {
        let len = self.leaves.len();
        if let Some(&index) = positions.iter().find(|&&index| index >= len) {
            return Err(TreeError::IndexOutOfRange { index, len });
        }

        let mut targeted = vec![false; len];
        for &index in positions {
            targeted[index] = true;
        }

        let nodes: Vec<NodeId> = self
            .leaves
            .iter()
            .zip(&targeted)
            .filter(|(_, &hit)| hit)
            .map(|(leaf, _)| leaf.node)
            .collect();

        let mut released = 0;
        for &node in &nodes {
            released += self.prune_from(node);
        }

        let mut hits = targeted.into_iter();
        self.leaves.retain(|_| !hits.next().unwrap_or(false));

        debug!(
            "prune_leaves: pruned {} leaves, released {} nodes, {} leaves and {} nodes left",
            nodes.len(),
            released,
            self.leaves.len(),
            self.node_count()
        );
        Ok(())
    }

    /// Remove `node` together with everything below it, and collapse ancestors
    /// left without children. Pruning the root clears the tree down to the root.
    ///
    /// Leaves under `node` are dropped from the leaf index. Returns the number of
    /// released nodes.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidNode`] if `node` is not live.
    pub fn prune_subtree(&mut self, node: NodeId) -> Result<usize, TreeError> {
        if !self.arena.is_live(node) {
            return Err(TreeError::InvalidNode(node));
        }

        let released = self.prune_from(node);
        if released > 0 {
            let arena = &self.arena;
            self.leaves.retain(|leaf| arena.is_live(leaf.node));
        }

        debug!("prune_subtree({}): released {} nodes", node, released);
        Ok(released)
    }

    fn prune_from(&mut self, node: NodeId) -> usize {
        let first = self.arena[node].first_child.take();
        let released = self.release_chain(first);
        released + self.detach(node)
    }

    /// Release a sibling chain with all its descendants, children first.
    fn release_chain(&mut self, mut current: Option<NodeId>) -> usize {
        let mut released = 0;
        while let Some(id) = current {
            let node = &mut self.arena[id];
            let child = node.first_child.take();
            current = node.next_sibling;

            released += self.release_chain(child);
            self.arena.release_one(id);
            released += 1;
        }
        released
    }

    /// Unlink the childless `node` and release it, then keep going upwards while
    /// the parent is left without children.
    fn detach(&mut self, node: NodeId) -> usize {
        let mut released = 0;
        let mut current = node;

        while current != self.root {
            let removed = self.arena[current];
            debug_assert!(removed.is_leaf());

            let next = removed.next_sibling;
            let emptied = match removed.back {
                BackRef::Parent(parent) => {
                    self.arena[parent].first_child = next;
                    if let Some(next) = next {
                        self.arena[next].back = BackRef::Parent(parent);
                    }
                    next.is_none().then_some(parent)
                }
                BackRef::PrevSibling(prev) => {
                    self.arena[prev].next_sibling = next;
                    if let Some(next) = next {
                        self.arena[next].back = BackRef::PrevSibling(prev);
                    }
                    None
                }
                BackRef::None => unreachable!("Non-root node {} is detached", current),
            };

            let unlinked = &mut self.arena[current];
            unlinked.next_sibling = None;
            unlinked.back = BackRef::None;
            self.arena.release_one(current);
            released += 1;

            match emptied {
                Some(parent) => current = parent,
                None => break,
            }
        }

        released
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Var;

    fn lit(var: u32, value: bool) -> (Var, bool) {
        (Var::new(var), value)
    }

    fn full_table(n: usize) -> Vec<Vec<bool>> {
        (0..1usize << n)
            .map(|row| (0..n).map(|bit| (row >> (n - 1 - bit)) & 1 == 1).collect())
            .collect()
    }

    #[test]
    fn test_prune_last_sibling() {
        let mut tree = Tree::from_leaf_table(&full_table(2)).unwrap();
        assert_eq!(tree.node_count(), 7);

        tree.prune_leaves(&[1]).unwrap();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(
            tree.leaf_assignments(),
            vec![
                vec![lit(0, false), lit(1, false)],
                vec![lit(0, true), lit(1, false)],
                vec![lit(0, true), lit(1, true)],
            ]
        );
    }

    #[test]
    fn test_prune_first_child_relinks_sibling() {
        let mut tree = Tree::from_leaf_table(&full_table(2)).unwrap();
        tree.prune_leaves(&[0]).unwrap();

        let low = tree.children(tree.root()).next().unwrap();
        let remaining: Vec<_> = tree.children(low).collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(tree.node(remaining[0]).back, BackRef::Parent(low));

        // The new head can itself be pruned, collapsing its parent.
        tree.prune_leaves(&[0]).unwrap();
        assert_eq!(tree.node_count(), 4);
        let heads: Vec<_> = tree.children(tree.root()).collect();
        assert_eq!(heads.len(), 1);
        assert_eq!(tree.node(heads[0]).back, BackRef::Parent(tree.root()));
        assert_eq!(tree.node(heads[0]).label(), Some(lit(0, true)));
    }

    #[test]
    fn test_prune_cascades_up_a_chain() {
        let mut tree = Tree::from_leaf_table(&[[false, false, false], [true, true, true]]).unwrap();
        assert_eq!(tree.node_count(), 7);

        tree.prune_leaves(&[1]).unwrap();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.leaf_assignments(), vec![vec![lit(0, false), lit(1, false), lit(2, false)]]);
    }

    #[test]
    fn test_prune_all() {
        let mut tree = Tree::from_leaf_table(&full_table(3)).unwrap();
        tree.prune_leaves(&(0..8).collect::<Vec<_>>()).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.leaf_count(), 0);
        assert!(tree.is_leaf(tree.root()));
    }

    #[test]
    fn test_prune_out_of_range_leaves_tree_unchanged() {
        let mut tree = Tree::from_leaf_table(&full_table(2)).unwrap();
        let err = tree.prune_leaves(&[0, 4]).unwrap_err();
        assert_eq!(err, TreeError::IndexOutOfRange { index: 4, len: 4 });
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_prune_duplicate_positions() {
        let mut tree = Tree::from_leaf_table(&full_table(2)).unwrap();
        tree.prune_leaves(&[3, 3]).unwrap();
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_prune_nothing() {
        let mut tree = Tree::from_leaf_table(&full_table(2)).unwrap();
        tree.prune_leaves(&[]).unwrap();
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_prune_subtree_internal() {
        let mut tree = Tree::from_leaf_table(&full_table(3)).unwrap();
        assert_eq!(tree.node_count(), 15);

        let low = tree.children(tree.root()).next().unwrap();
        let released = tree.prune_subtree(low).unwrap();
        assert_eq!(released, 7);
        assert_eq!(tree.node_count(), 8);
        assert_eq!(tree.leaf_count(), 4);
        assert!(tree.leaf_assignments().iter().all(|a| a[0] == lit(0, true)));

        let head = tree.children(tree.root()).next().unwrap();
        assert_eq!(tree.node(head).back, BackRef::Parent(tree.root()));
    }

    #[test]
    fn test_prune_subtree_root() {
        let mut tree = Tree::from_leaf_table(&full_table(2)).unwrap();
        let released = tree.prune_subtree(tree.root()).unwrap();
        assert_eq!(released, 6);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_prune_subtree_stale_handle() {
        let mut tree = Tree::from_leaf_table(&full_table(1)).unwrap();
        let leaf = tree.leaves()[0].node;
        tree.prune_subtree(leaf).unwrap();
        assert_eq!(tree.prune_subtree(leaf), Err(TreeError::InvalidNode(leaf)));
    }
}
