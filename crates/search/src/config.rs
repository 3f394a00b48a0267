//! Search configuration.

use towerlab_core::{Error, OrientationFilter, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning knobs for the tower search strategies.
///
/// Defaults mirror a mid-size run: a 30-cell square floor, several hundred
/// candidate descriptors per father, and ten-way branching. Use the
/// `with_*` builders to override individual fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Side length of the square floor, in cells.
    pub floor_size: i32,
    /// Maximum candidate descriptors drawn per father block.
    pub limit_sons: usize,
    /// Which orientations a father may spawn.
    pub son_orientation_filter: OrientationFilter,
    /// Shuffle candidate order; when false, candidates come in the
    /// deterministic generation order.
    pub random_order: bool,
    /// Seed for the shuffle RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Place mirror-image siblings together with each accepted block.
    pub use_symmetry: bool,
    /// Minimum surviving members for a symmetry group to be kept.
    pub sym_son_threshold: usize,
    /// Base mirror distance, in cells, for symmetry propagation.
    pub sym_base_dist: i32,
    /// Maximum blocks placed per successor state.
    pub limit_blocks_in_action: usize,
    /// Number of successor states generated per expansion.
    pub limit_branching: usize,
    /// Target tower height, in levels.
    pub height_goal: i32,
    /// Width of each floor ring, in cells (ring strategy only).
    pub ring_width: i32,
    /// Number of concentric floor rings (ring strategy only).
    pub ring_count: i32,
    /// Spacing between successive ring outer edges (ring strategy only).
    pub ring_spacing: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            floor_size: 30,
            limit_sons: 500,
            son_orientation_filter: OrientationFilter::Any,
            random_order: true,
            seed: None,
            use_symmetry: false,
            sym_son_threshold: 2,
            sym_base_dist: 6,
            limit_blocks_in_action: 10,
            limit_branching: 10,
            height_goal: 30,
            ring_width: 3,
            ring_count: 1,
            ring_spacing: 10,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor_size(mut self, floor_size: i32) -> Self {
        self.floor_size = floor_size;
        self
    }

    pub fn with_limit_sons(mut self, limit_sons: usize) -> Self {
        self.limit_sons = limit_sons;
        self
    }

    pub fn with_son_orientation_filter(mut self, filter: OrientationFilter) -> Self {
        self.son_orientation_filter = filter;
        self
    }

    pub fn with_random_order(mut self, random_order: bool) -> Self {
        self.random_order = random_order;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_symmetry(mut self, threshold: usize, base_dist: i32) -> Self {
        self.use_symmetry = true;
        self.sym_son_threshold = threshold;
        self.sym_base_dist = base_dist;
        self
    }

    pub fn with_limit_blocks_in_action(mut self, limit: usize) -> Self {
        self.limit_blocks_in_action = limit;
        self
    }

    pub fn with_limit_branching(mut self, limit: usize) -> Self {
        self.limit_branching = limit;
        self
    }

    pub fn with_height_goal(mut self, height_goal: i32) -> Self {
        self.height_goal = height_goal;
        self
    }

    pub fn with_rings(mut self, width: i32, count: i32, spacing: i32) -> Self {
        self.ring_width = width;
        self.ring_count = count;
        self.ring_spacing = spacing;
        self
    }

    /// Validates field ranges before a strategy is built from this config.
    pub fn validate(&self) -> Result<()> {
        if self.floor_size < 1 {
            return Err(Error::InvalidConfig(format!(
                "floor_size must be at least 1, got {}",
                self.floor_size
            )));
        }
        if self.limit_branching == 0 {
            return Err(Error::InvalidConfig(
                "limit_branching must be at least 1".into(),
            ));
        }
        if self.limit_blocks_in_action == 0 {
            return Err(Error::InvalidConfig(
                "limit_blocks_in_action must be at least 1".into(),
            ));
        }
        if self.height_goal < 0 {
            return Err(Error::InvalidConfig(format!(
                "height_goal must be non-negative, got {}",
                self.height_goal
            )));
        }
        if self.use_symmetry {
            if self.sym_base_dist < 1 {
                return Err(Error::InvalidConfig(format!(
                    "sym_base_dist must be at least 1, got {}",
                    self.sym_base_dist
                )));
            }
            // A group is the base block plus four mirrors.
            if self.sym_son_threshold == 0 || self.sym_son_threshold > 5 {
                return Err(Error::InvalidConfig(format!(
                    "sym_son_threshold must be in 1..=5, got {}",
                    self.sym_son_threshold
                )));
            }
        }
        Ok(())
    }
}
