//! The two successor-generation strategies.
//!
//! [`BranchingSearch`] expands every committed block as a father, draws
//! candidate placements from its attachment surface, and optionally places
//! each accepted block together with its four mirror-image siblings,
//! rolling the whole group back when too few survive.
//!
//! [`RingSearch`] builds over a ring-shaped floor with perpendicular-only
//! attachment. All branches of one expansion draw from a single shared
//! candidate pool, so a placement is attempted at most once per expansion
//! and an exhausted pool ends the expansion without empty successors.

use std::cmp::Reverse;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use towerlab_core::{Block, Orientation, OrientationFilter, Placement, PlankShape, Result};

use crate::config::SearchConfig;
use crate::problem::{SearchProblem, Successor};
use crate::stats::SearchStats;
use crate::tower::{BlockId, TowerState};

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Mirror placements of a base placement, reflected to the four diagonal
/// quadrants at a distance scaled by the orientation's horizontal extents.
///
/// Edge orientations mirror at half the base distance on both axes; flat
/// and upright orientations mirror at the base distance along their short
/// axis and twice that along their long axis.
pub(crate) fn propagate(base: &Placement, dist: i32) -> Vec<Placement> {
    const SIGN_X: [i32; 4] = [-1, 1, -1, 1];
    const SIGN_Y: [i32; 4] = [-1, -1, 1, 1];

    let (dx, dy) = match base.orientation {
        Orientation::EdgeX | Orientation::EdgeY => (dist / 2, dist / 2),
        Orientation::FlatX | Orientation::UprightY => (dist, 2 * dist),
        Orientation::FlatY | Orientation::UprightX => (2 * dist, dist),
    };

    (0..4)
        .map(|i| {
            Placement::new(
                base.orientation,
                base.position.translated(SIGN_X[i] * dx, SIGN_Y[i] * dy, 0),
            )
        })
        .collect()
}

/// Places a group of blocks into `state`, skipping members that overlap an
/// earlier sibling or fail the stability check.
///
/// With a threshold, a group whose survivors fall short is rolled back
/// entirely; otherwise the survivors are committed and their placements
/// returned in placement order.
pub(crate) fn commit_group(
    state: &mut TowerState,
    group: &[Block],
    threshold: Option<usize>,
    stats: &mut SearchStats,
) -> Vec<Placement> {
    let mut placed: Vec<(BlockId, Placement)> = Vec::new();
    for block in group {
        // Earlier siblings are linked but not yet committed, so the
        // occupancy check cannot see them; test against the group directly.
        if placed
            .iter()
            .any(|&(id, _)| state.block(id).is_overlapping(block))
        {
            stats.blocks_rejected += 1;
            continue;
        }
        match state.can_add(block) {
            Some(id) => placed.push((id, *block.placement())),
            None => stats.blocks_rejected += 1,
        }
    }

    if let Some(threshold) = threshold {
        if placed.len() < threshold {
            stats.groups_rolled_back += 1;
            for &(id, _) in placed.iter().rev() {
                state.disconnect_block_from_neighbors(id);
            }
            return Vec::new();
        }
    }

    placed
        .into_iter()
        .map(|(id, placement)| {
            state.add(id);
            placement
        })
        .collect()
}

/// Unconstrained branching search over a square floor.
pub struct BranchingSearch {
    config: SearchConfig,
    shape: PlankShape,
    rng: StdRng,
    stats: SearchStats,
}

impl BranchingSearch {
    pub fn new(shape: PlankShape, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = make_rng(config.seed);
        Ok(Self {
            config,
            shape,
            rng,
            stats: SearchStats::default(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl SearchProblem for BranchingSearch {
    fn start_state(&self) -> Result<TowerState> {
        TowerState::new(self.config.floor_size)
    }

    fn successors(&mut self, state: &TowerState) -> Vec<Successor> {
        log::debug!(
            "expanding level {} ({} blocks) into {} branches",
            state.max_level(),
            state.block_count(),
            self.config.limit_branching
        );
        let mut successors = Vec::new();
        for _ in 0..self.config.limit_branching {
            let mut new_state = state.clone();
            let mut actions: Vec<Placement> = Vec::new();

            for father in state.gen_blocks(false, false) {
                if actions.len() >= self.config.limit_blocks_in_action {
                    break;
                }
                // Saturation is judged on the branch copy, where blocks
                // placed earlier in this expansion already count.
                if new_state.is_saturated(father) {
                    self.stats.fathers_saturated += 1;
                    continue;
                }
                let rng = if self.config.random_order {
                    Some(&mut self.rng)
                } else {
                    None
                };
                let descriptors = new_state.block(father).possible_placements(
                    &self.shape,
                    &self.config.son_orientation_filter,
                    Some(self.config.limit_sons),
                    rng,
                );

                for desc in descriptors {
                    if actions.len() >= self.config.limit_blocks_in_action {
                        break;
                    }
                    if new_state.is_bad_block(&desc) {
                        self.stats.descriptors_rejected += 1;
                        continue;
                    }
                    let mut group = vec![Block::from_placement(&self.shape, &desc)];
                    if self.config.use_symmetry {
                        for sym in propagate(&desc, self.config.sym_base_dist) {
                            if new_state.is_bad_block(&sym) {
                                self.stats.descriptors_rejected += 1;
                                continue;
                            }
                            group.push(Block::from_placement(&self.shape, &sym));
                        }
                    }
                    let threshold = self
                        .config
                        .use_symmetry
                        .then_some(self.config.sym_son_threshold);
                    let placed =
                        commit_group(&mut new_state, &group, threshold, &mut self.stats);
                    actions.extend(placed);
                }
            }

            let cost = self.cost_of_actions(&actions);
            successors.push(Successor {
                state: new_state,
                actions,
                cost,
            });
        }
        log::debug!("expansion done; {}", self.stats);
        successors
    }

    fn is_goal(&self, state: &TowerState) -> bool {
        state.max_level() >= self.config.height_goal
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Branching search over a ring floor with perpendicular-only attachment
/// and a shared per-expansion candidate pool.
pub struct RingSearch {
    config: SearchConfig,
    shape: PlankShape,
    rng: StdRng,
    stats: SearchStats,
}

impl RingSearch {
    pub fn new(shape: PlankShape, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = make_rng(config.seed);
        Ok(Self {
            config,
            shape,
            rng,
            stats: SearchStats::default(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl SearchProblem for RingSearch {
    fn start_state(&self) -> Result<TowerState> {
        TowerState::with_ring_floor(
            self.config.floor_size,
            self.config.ring_width,
            self.config.ring_count,
            self.config.ring_spacing,
        )
    }

    fn successors(&mut self, state: &TowerState) -> Vec<Successor> {
        let mut pool: Vec<Placement> = Vec::new();
        for father in state.gen_blocks(false, false) {
            if state.is_saturated(father) {
                self.stats.fathers_saturated += 1;
                continue;
            }
            let descriptors = state.block(father).possible_placements(
                &self.shape,
                &OrientationFilter::Perpendicular,
                Some(self.config.limit_sons),
                None,
            );
            for desc in descriptors {
                if state.is_bad_block(&desc) {
                    self.stats.descriptors_rejected += 1;
                    continue;
                }
                pool.push(desc);
            }
        }

        log::debug!(
            "ring pool holds {} candidates at level {}",
            pool.len(),
            state.max_level()
        );
        if self.config.random_order {
            pool.shuffle(&mut self.rng);
        } else {
            // Descending sort plus pop from the back consumes the lowest
            // placements first.
            pool.sort_unstable_by_key(|p| {
                Reverse((p.position.z, p.position.x, p.position.y, p.orientation.label()))
            });
        }

        let mut successors = Vec::new();
        for _ in 0..self.config.limit_branching {
            let mut new_state = state.clone();
            let mut actions: Vec<Placement> = Vec::new();
            while actions.len() < self.config.limit_blocks_in_action {
                let Some(desc) = pool.pop() else { break };
                let block = Block::from_placement(&self.shape, &desc);
                if let Some(id) = new_state.can_add(&block) {
                    new_state.add(id);
                    actions.push(desc);
                } else {
                    self.stats.blocks_rejected += 1;
                }
            }
            if actions.is_empty() {
                // Pool exhausted; no branch after this one could place
                // anything either.
                log::debug!(
                    "candidate pool exhausted after {} successors; {}",
                    successors.len(),
                    self.stats
                );
                break;
            }
            let cost = self.cost_of_actions(&actions);
            successors.push(Successor {
                state: new_state,
                actions,
                cost,
            });
        }
        successors
    }

    fn is_goal(&self, state: &TowerState) -> bool {
        state.max_level() >= self.config.height_goal
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
