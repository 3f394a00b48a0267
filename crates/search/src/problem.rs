//! The search-problem seam the strategies implement.

use crate::stats::SearchStats;
use crate::tower::TowerState;
use towerlab_core::{Placement, Result};

/// One expansion outcome: a new tower state plus the placements that
/// produced it from the parent state.
#[derive(Debug, Clone)]
pub struct Successor {
    pub state: TowerState,
    pub actions: Vec<Placement>,
    pub cost: usize,
}

/// A tower-building search problem: start state, successor generation,
/// and the goal test.
///
/// `successors` takes `&mut self` because strategies carry an RNG and
/// rejection counters across expansions; the parent state itself is never
/// mutated.
pub trait SearchProblem {
    /// The initial tower, floor included.
    fn start_state(&self) -> Result<TowerState>;

    /// Expands a state into up to `limit_branching` successor towers.
    fn successors(&mut self, state: &TowerState) -> Vec<Successor>;

    /// Whether the state satisfies the height goal.
    fn is_goal(&self, state: &TowerState) -> bool;

    /// Cost of an action sequence; by default one unit per placement.
    fn cost_of_actions(&self, actions: &[Placement]) -> usize {
        actions.len()
    }

    /// Counters accumulated so far.
    fn stats(&self) -> SearchStats {
        SearchStats::default()
    }
}
