//! The copy traversal shared by [`Tree::clone`][crate::tree::Tree], [`vcat`][crate::concat::vcat]
//! and [`hcat`][crate::concat::hcat].
//!
//! The source is only read. Unlabeled nodes met in the source are elided: their
//! children are spliced in at the current position of the copy, so the empty
//! roots of concatenated operands never show up in the result.

use crate::arena::Arena;
use crate::reference::NodeId;
use crate::tree::Leaf;
use crate::types::{Assignment, Var};

/// Copies the children of `from` (in `source`) under the childless node `onto`
/// (in `target`), shifting every variable by `offset`.
///
/// Returns the leaf records of the copy in depth-first order, each assignment
/// starting with `prefix`. When nothing gets copied, `onto` itself is the only
/// leaf.
pub fn copy_subtree(
    source: &Arena,
    from: NodeId,
    target: &mut Arena,
    onto: NodeId,
    offset: u32,
    prefix: &[(Var, bool)],
) -> Vec<Leaf> {
    debug_assert!(target[onto].is_leaf(), "Copy target {} must be childless", onto);

    let mut copier = Copier {
        source,
        target,
        offset,
        path: prefix.to_vec(),
        leaves: Vec::new(),
    };
    copier.graft(from, onto);
    copier.leaves
}

struct Copier<'a> {
    source: &'a Arena,
    target: &'a mut Arena,
    offset: u32,
    /// Assignment from the root of the target down to the current node.
    path: Assignment,
    leaves: Vec<Leaf>,
}

impl Copier<'_> {
    fn graft(&mut self, from: NodeId, onto: NodeId) {
        let mut last = None;
        self.copy_children(from, onto, &mut last);

        if last.is_none() {
            self.leaves.push(Leaf {
                node: onto,
                assignment: self.path.clone(),
            });
        }
    }

    fn copy_children(&mut self, from: NodeId, onto: NodeId, last: &mut Option<NodeId>) {
        let source = self.source;
        for child in source.children(from) {
            let node = source[child];
            match node.variable {
                // Placeholder: keep its children, drop the node.
                None => self.copy_children(child, onto, last),
                Some(var) => {
                    let var = var.shifted(self.offset);
                    let copy = self.target.allocate(Some(var), node.value);
                    self.target.attach(onto, *last, copy);
                    *last = Some(copy);

                    self.path.push((var, node.value));
                    self.graft(child, copy);
                    self.path.pop();
                }
            }
        }
    }
}
