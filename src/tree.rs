//! The prunable tree: construction, read access and copying.
//!
//! A [`Tree`] stores a set of partial boolean assignments as a prefix-sharing
//! tree. Each non-root node tests one variable; the path from the root to a
//! leaf spells out one assignment. Next to the nodes, the tree keeps an index
//! of its leaves with their resolved assignments, so that reading the
//! assignments back never needs a traversal.
//!
//! # Example
//!
//! ```
//! use prunable_tree::tree::Tree;
//! use prunable_tree::types::Var;
//!
//! let mut tree = Tree::from_leaf_table(&[
//!     [false, false],
//!     [false, true],
//!     [true, true],
//! ])?;
//! assert_eq!(tree.leaf_count(), 3);
//! assert_eq!(tree.node_count(), 6);
//!
//! tree.prune_leaves(&[2])?;
//! assert_eq!(
//!     tree.leaf_assignments(),
//!     vec![
//!         vec![(Var::new(0), false), (Var::new(1), false)],
//!         vec![(Var::new(0), false), (Var::new(1), true)],
//!     ]
//! );
//! # Ok::<(), prunable_tree::error::TreeError>(())
//! ```

use std::fmt::Debug;

use log::debug;

use crate::arena::{Arena, Children};
use crate::copy::copy_subtree;
use crate::error::TreeError;
use crate::node::Node;
use crate::reference::NodeId;
use crate::types::{Assignment, Var};

/// One entry of the leaf index.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Leaf {
    pub node: NodeId,
    /// Labels on the path from the root down to `node`.
    pub assignment: Assignment,
}

pub struct Tree {
    pub(crate) arena: Arena,
    pub(crate) root: NodeId,
    pub(crate) n_bins: u32,
    /// Leaves in depth-first, first-child-before-sibling order.
    pub(crate) leaves: Vec<Leaf>,
}

impl Tree {
    /// Create a tree over `n_bins` variables holding only the root.
    pub fn with_bins(n_bins: u32) -> Self {
        Self::with_capacity(n_bins, 1)
    }

    /// Like [`Tree::with_bins`], reserving arena room for `capacity` nodes.
    pub fn with_capacity(n_bins: u32, capacity: usize) -> Self {
        let mut arena = Arena::with_capacity(capacity.max(1));
        let root = arena.allocate(None, false);
        Self {
            arena,
            root,
            n_bins,
            leaves: Vec::new(),
        }
    }

    /// Release every node but a fresh root. The number of bins is kept.
    pub fn clear(&mut self) {
        self.arena.release_all();
        self.root = self.arena.allocate(None, false);
        self.leaves.clear();
    }

    /// The empty tree: a root, no variables, no leaves.
    pub fn empty() -> Self {
        Self::with_bins(0)
    }

    /// A tree with a single one-literal path below the root.
    ///
    /// When `variable` is `None` the tree has no leaves.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is not below `n_bins`.
    pub fn single_path(variable: Option<Var>, value: bool, n_bins: u32) -> Self {
        let mut tree = Self::with_capacity(n_bins, 2);
        if let Some(var) = variable {
            assert!(var.id() < n_bins, "Variable {} out of range for {} bins", var, n_bins);
            let node = tree.arena.allocate(Some(var), value);
            tree.arena.attach(tree.root, None, node);
            tree.leaves.push(Leaf {
                node,
                assignment: vec![(var, value)],
            });
        }
        tree
    }

    /// Build a tree holding exactly the given dense rows.
    ///
    /// Row `r` assigns `rows[r][b]` to variable `b`, so every row must have the
    /// same length, which becomes the number of bins. Rows sharing a prefix share
    /// the nodes for it; duplicate rows end up as a single leaf. An empty table
    /// (or a table of empty rows) gives the empty tree.
    pub fn from_leaf_table<R>(rows: &[R]) -> Result<Self, TreeError>
    where
        R: AsRef<[bool]>,
    {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let expected = first.as_ref().len();
        for (row, values) in rows.iter().enumerate() {
            let found = values.as_ref().len();
            if found != expected {
                return Err(TreeError::ArityMismatch { row, expected, found });
            }
        }
        if expected == 0 {
            return Ok(Self::empty());
        }

        let n_bins = u32::try_from(expected).unwrap_or_else(|_| panic!("Too many bins: {}", expected));
        let mut tree = Self::with_capacity(n_bins, rows.len() + expected);
        let root = tree.root;
        let rows: Vec<&[bool]> = rows.iter().map(|row| row.as_ref()).collect();
        let mut path = Vec::with_capacity(expected);
        tree.build(root, rows, 0, &mut path);

        debug!(
            "from_leaf_table: n_bins = {}, leaves = {}, nodes = {}",
            tree.n_bins,
            tree.leaves.len(),
            tree.node_count()
        );
        Ok(tree)
    }

    fn build(&mut self, node: NodeId, rows: Vec<&[bool]>, bin: u32, path: &mut Assignment) {
        if bin == self.n_bins {
            self.leaves.push(Leaf {
                node,
                assignment: path.clone(),
            });
            return;
        }

        let var = Var::new(bin);
        let (high, low): (Vec<&[bool]>, Vec<&[bool]>) = rows.into_iter().partition(|row| row[var.index()]);

        let mut prev = None;
        for (value, group) in [(false, low), (true, high)] {
            if group.is_empty() {
                continue;
            }
            let child = self.arena.allocate(Some(var), value);
            self.arena.attach(node, prev, child);
            prev = Some(child);

            path.push((var, value));
            self.build(child, group, bin + 1, path);
            path.pop();
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::empty()
    }
}

impl Clone for Tree {
    fn clone(&self) -> Self {
        let mut arena = Arena::with_capacity(self.arena.size());
        let root = arena.allocate(None, false);
        let leaves = if self.is_leaf(self.root) {
            Vec::new()
        } else {
            copy_subtree(&self.arena, self.root, &mut arena, root, 0, &[])
        };
        Self {
            arena,
            root,
            n_bins: self.n_bins,
            leaves,
        }
    }

    /// Copy-assignment. The copy is built in a fresh arena first; the old arena
    /// is released only once the copy is complete.
    fn clone_from(&mut self, source: &Self) {
        let copy = source.clone();
        self.arena.release_all();
        *self = copy;
    }
}

impl Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("n_bins", &self.n_bins)
            .field("leaves", &self.leaves.len())
            .field("nodes", &self.arena.size())
            .field("capacity", &self.arena.capacity())
            .finish()
    }
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.arena.children(id)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.arena[id].is_leaf()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The leaf index, in depth-first order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// The assignment of every leaf, in leaf-index order.
    pub fn leaf_assignments(&self) -> Vec<Assignment> {
        self.leaves.iter().map(|leaf| leaf.assignment.clone()).collect()
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.size()
    }

    pub fn bin_count(&self) -> usize {
        self.n_bins as usize
    }
}
