//! # prunable-tree: prefix-sharing sets of partial boolean assignments
//!
//! **`prunable-tree`** stores a finite set of partial assignments over `n_bins`
//! boolean variables ("bins") as a mutable tree, and combines such trees with
//! algebraic operators. Assignments sharing a prefix share the nodes for it,
//! so large sets can be built, pruned and composed without being flattened
//! into lists, except on demand.
//!
//! ## Model
//!
//! - Every non-root node tests one variable: it carries a `(variable, value)`
//!   label. The path from the root to a leaf spells out one assignment;
//!   variables missing from the path are "don't care".
//! - Nodes live in an [`Arena`][crate::arena::Arena] owned by the tree and are
//!   addressed through lightweight [`NodeId`][crate::reference::NodeId]
//!   handles. Children form a singly linked sibling list; each node also keeps
//!   a back-reference (parent or previous sibling) so that a leaf can be
//!   unlinked in O(1).
//! - The tree keeps an index of its leaves along with their assignments, so
//!   [`Tree::leaf_assignments`] never walks the nodes.
//!
//! Trees are not canonical: equal subtrees are not merged, and mutation is
//! destructive.
//!
//! ## Basic Usage
//!
//! ```rust
//! use prunable_tree::{hcat, vcat, Tree, Var};
//!
//! // Two one-variable trees: {x0 = 1} and {x0 = 0}.
//! let a = Tree::single_path(Some(Var::new(0)), true, 1);
//! let b = Tree::single_path(Some(Var::new(0)), false, 1);
//!
//! // Disjoint union: a fresh selector variable per operand.
//! let either = hcat([&a, &b]);
//! assert_eq!(either.bin_count(), 4);
//! assert_eq!(either.leaf_count(), 2);
//!
//! // Cartesian product over disjoint variables.
//! let mut both = vcat(&either, &either);
//! assert_eq!(both.bin_count(), 8);
//! assert_eq!(both.leaf_count(), 4);
//!
//! // Drop some leaves; emptied branches collapse.
//! let before = both.node_count();
//! both.prune_leaves(&[0, 1])?;
//! assert_eq!(both.leaf_count(), 2);
//! assert!(both.node_count() < before);
//! # Ok::<(), prunable_tree::TreeError>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`tree`]**: the [`Tree`] type, its constructors and read access.
//! - **[`prune`]**: in-place removal of leaves and subtrees.
//! - **[`concat`]**: [`vcat`] and [`hcat`].
//! - **[`branch`]**: a read-only view of a node's branches that skips single-child runs.
//! - **[`debug`]**: independent recomputation of leaves and an invariant checker.

pub mod arena;
pub mod branch;
pub mod concat;
pub mod copy;
pub mod count;
pub mod debug;
pub mod error;
pub mod node;
pub mod prune;
pub mod reference;
pub mod tree;
pub mod types;

pub use concat::{hcat, vcat};
pub use error::TreeError;
pub use reference::NodeId;
pub use tree::{Leaf, Tree};
pub use types::{Assignment, Var};
