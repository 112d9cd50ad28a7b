//! Solvability verdicts.

/// Whether a linear system has a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemInfo {
    /// A solution exists and has been written to the output buffer.
    Consistent,
    /// Some row reduces to `0 = c` with `c != 0`.
    Inconsistent,
}

impl SystemInfo {
    /// Returns true for [`SystemInfo::Consistent`].
    #[must_use]
    pub fn is_consistent(self) -> bool {
        matches!(self, SystemInfo::Consistent)
    }
}
