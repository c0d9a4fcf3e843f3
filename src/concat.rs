//! Composition of trees.
//!
//! Both operators build a brand-new tree and only read their operands, so the
//! same tree may be passed more than once (`vcat(&t, &t)`).
//!
//! - [`vcat`] is the Cartesian product: every leaf of the first tree is
//!   extended with a full copy of the second, over disjoint variables.
//! - [`hcat`] is the disjoint union: one fresh selector variable per operand
//!   decides which operand a leaf comes from.

use log::debug;

use crate::copy::copy_subtree;
use crate::tree::Tree;
use crate::types::Var;

/// Vertical concatenation.
///
/// The result is defined over `upper.n_bins + lower.n_bins` variables: the
/// variables of `upper` keep their indices, those of `lower` are shifted up by
/// `upper.n_bins`. Every leaf of `upper` receives a copy of `lower`, so the
/// result has `|upper| * |lower|` leaves, each assignment being an `upper`
/// assignment followed by a shifted `lower` one. A `lower` without leaves
/// adds no constraint and leaves the `upper` leaves as they are.
pub fn vcat(upper: &Tree, lower: &Tree) -> Tree {
    let mut tree = upper.clone();
    let offset = upper.n_bins;
    tree.n_bins = add_bins(upper.n_bins, lower.n_bins);

    let leaves = std::mem::take(&mut tree.leaves);
    for leaf in leaves {
        let grafted = copy_subtree(&lower.arena, lower.root, &mut tree.arena, leaf.node, offset, &leaf.assignment);
        tree.leaves.extend(grafted);
    }

    debug!(
        "vcat: {} x {} leaves -> {} leaves, {} nodes, {} bins",
        upper.leaf_count(),
        lower.leaf_count(),
        tree.leaf_count(),
        tree.node_count(),
        tree.n_bins
    );
    tree
}

/// Horizontal concatenation.
///
/// Operand `i` gets the variable block starting at `offset_i`, the total size
/// of the blocks before it. The block holds the operand's own variables,
/// shifted by `offset_i`, followed by the operand's selector at
/// `offset_i + n_bins_i`. The selectors, set to `true`, hang as siblings under
/// the new root, and each heads the copy of its operand. So a selector carries
/// the highest index of its block while sitting above the block's variables.
///
/// The result has `Σ n_bins_i + count` variables and `Σ |leaves_i|` leaves (an
/// operand without leaves contributes its bare selector). Selectors of other
/// operands are "don't care" in a leaf's assignment.
pub fn hcat<'a, I>(trees: I) -> Tree
where
    I: IntoIterator<Item = &'a Tree>,
{
    let trees: Vec<&Tree> = trees.into_iter().collect();
    let n_bins = trees.iter().fold(0, |total, source| add_bins(total, add_bins(source.n_bins, 1)));
    let capacity = 1 + trees.iter().map(|source| source.node_count()).sum::<usize>();

    let mut tree = Tree::with_capacity(n_bins, capacity);
    let root = tree.root;
    let mut offset = 0;
    let mut prev = None;

    for source in &trees {
        let selector = Var::new(offset + source.n_bins);
        let head = tree.arena.allocate(Some(selector), true);
        tree.arena.attach(root, prev, head);
        prev = Some(head);

        let grafted = copy_subtree(&source.arena, source.root, &mut tree.arena, head, offset, &[(selector, true)]);
        tree.leaves.extend(grafted);
        offset = selector.id() + 1;
    }

    debug!(
        "hcat: {} trees -> {} leaves, {} nodes, {} bins",
        trees.len(),
        tree.leaf_count(),
        tree.node_count(),
        tree.n_bins
    );
    tree
}

/// Variable counts are `u32`; a composition whose total does not fit panics.
fn add_bins(a: u32, b: u32) -> u32 {
    a.checked_add(b)
        .unwrap_or_else(|| panic!("Bin count overflow: {} + {} does not fit in u32", a, b))
}
