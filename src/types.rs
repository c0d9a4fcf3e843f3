//! Type-safe wrappers for tree variables ("bins") and assignments.
//!
//! Every tree is defined over `n_bins` boolean variables, each identified by a
//! fixed 0-based index. The [`Var`] newtype keeps those indices apart from
//! node handles and leaf positions, which are plain integers too.
use std::fmt;

/// A variable (bin) identifier, 0-indexed.
///
/// # Invariants
///
/// - A tree over `n_bins` variables only uses indices in `0..n_bins`.
/// - No variable appears twice on a single root-to-leaf path.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a variable with the given index.
    pub const fn new(id: u32) -> Self {
        Var(id)
    }

    /// Returns the raw variable index as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the variable index as a `usize`, for indexing into dense rows.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the variable moved `offset` places up the index space.
    ///
    /// # Panics
    ///
    /// Panics if the shifted index does not fit in `u32`.
    pub const fn shifted(self, offset: u32) -> Self {
        match self.0.checked_add(offset) {
            Some(id) => Var(id),
            None => panic!("Variable index overflow"),
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(id: u32) -> Self {
        Var(id)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A partial assignment: `(variable, value)` pairs in root-to-leaf order.
///
/// Variables that do not appear are "don't care".
pub type Assignment = Vec<(Var, bool)>;

/// Writes an assignment as space-separated literals (`x3`, `~x4`), sorted by variable.
pub fn fmt_assignment(f: &mut impl fmt::Write, assignment: &[(Var, bool)]) -> fmt::Result {
    let mut sorted = assignment.to_vec();
    sorted.sort_by_key(|&(var, _)| var);
    for (i, (var, value)) in sorted.into_iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}{}", if value { "" } else { "~" }, var)?;
    }
    Ok(())
}
