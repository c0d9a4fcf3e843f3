use num_bigint::BigUint;

use crate::tree::Tree;

impl Tree {
    /// Number of complete assignments over all bins covered by the leaves.
    ///
    /// A leaf constraining `k` of the `n_bins` variables covers `2^(n_bins - k)`
    /// complete assignments. Leaves are counted independently, so assignments
    /// covered by several leaves (possible after [`hcat`][crate::concat::hcat],
    /// where other selectors are "don't care") are counted once per leaf.
    pub fn assignment_count(&self) -> BigUint {
        let n_bins = self.bin_count();
        self.leaves
            .iter()
            .map(|leaf| BigUint::from(1u32) << n_bins.saturating_sub(leaf.assignment.len()))
            .sum()
    }
}
