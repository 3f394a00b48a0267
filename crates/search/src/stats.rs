//! Counters accumulated during successor generation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rejection and pruning counters for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Candidate descriptors skipped via the bad-placement cache.
    pub descriptors_rejected: u64,
    /// Blocks that failed the overlap or stability check.
    pub blocks_rejected: u64,
    /// Father blocks skipped because their top face was full.
    pub fathers_saturated: u64,
    /// Symmetry groups undone for falling below the survivor threshold.
    pub groups_rolled_back: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.descriptors_rejected += other.descriptors_rejected;
        self.blocks_rejected += other.blocks_rejected;
        self.fathers_saturated += other.fathers_saturated;
        self.groups_rolled_back += other.groups_rolled_back;
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "descriptors rejected: {}, blocks rejected: {}, saturated fathers: {}, groups rolled back: {}",
            self.descriptors_rejected,
            self.blocks_rejected,
            self.fathers_saturated,
            self.groups_rolled_back
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates() {
        let mut a = SearchStats {
            descriptors_rejected: 1,
            blocks_rejected: 2,
            fathers_saturated: 3,
            groups_rolled_back: 4,
        };
        let b = SearchStats {
            descriptors_rejected: 10,
            blocks_rejected: 20,
            fathers_saturated: 30,
            groups_rolled_back: 40,
        };
        a.merge(&b);
        assert_eq!(a.descriptors_rejected, 11);
        assert_eq!(a.blocks_rejected, 22);
        assert_eq!(a.fathers_saturated, 33);
        assert_eq!(a.groups_rolled_back, 44);
    }
}
