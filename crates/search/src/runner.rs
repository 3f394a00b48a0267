//! Greedy best-successor driver.

use std::cmp::Reverse;
use std::time::Instant;

use crate::problem::SearchProblem;
use crate::stats::SearchStats;
use crate::tower::TowerState;
use towerlab_core::Result;

/// Outcome of a [`greedy_build`] run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub state: TowerState,
    pub iterations: usize,
    pub blocks_placed: usize,
    pub goal_reached: bool,
    pub elapsed_ms: u64,
    pub stats: SearchStats,
}

/// Repeatedly expands the current state and keeps the best successor,
/// preferring the highest tower and breaking ties with the fewest
/// placements, until the goal is reached, expansion stalls, or the
/// iteration cap is hit.
pub fn greedy_build<P: SearchProblem>(
    problem: &mut P,
    max_iterations: usize,
) -> Result<BuildReport> {
    let started = Instant::now();
    let mut state = problem.start_state()?;
    let mut blocks_placed = 0usize;
    let mut iterations = 0usize;
    let mut goal_reached = problem.is_goal(&state);

    while !goal_reached && iterations < max_iterations {
        let successors = problem.successors(&state);
        let best = successors
            .into_iter()
            .max_by_key(|s| (s.state.max_level(), Reverse(s.actions.len())));
        let Some(best) = best else { break };
        if best.actions.is_empty() {
            // Every branch came back empty; nothing left to place.
            log::debug!("all branches empty at level {}; stopping", state.max_level());
            break;
        }
        blocks_placed += best.actions.len();
        state = best.state;
        iterations += 1;
        goal_reached = problem.is_goal(&state);
        log::debug!(
            "iteration {iterations}: level {} ({blocks_placed} placements total)",
            state.max_level()
        );
    }

    Ok(BuildReport {
        elapsed_ms: started.elapsed().as_millis() as u64,
        stats: problem.stats(),
        state,
        iterations,
        blocks_placed,
        goal_reached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::strategy::BranchingSearch;
    use towerlab_core::{Orientation, OrientationFilter, PlankShape};

    #[test]
    fn test_greedy_build_reaches_a_low_goal() {
        let config = SearchConfig::new()
            .with_floor_size(20)
            .with_limit_sons(20)
            .with_son_orientation_filter(OrientationFilter::Only(Orientation::EdgeX))
            .with_random_order(false)
            .with_limit_blocks_in_action(3)
            .with_limit_branching(1)
            .with_height_goal(2);
        let mut problem = BranchingSearch::new(PlankShape::kapla(), config).unwrap();
        let report = greedy_build(&mut problem, 10).unwrap();
        assert!(report.goal_reached);
        assert!(report.state.max_level() >= 2);
        assert!(report.blocks_placed >= 1);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn test_greedy_build_respects_iteration_cap() {
        let config = SearchConfig::new()
            .with_floor_size(20)
            .with_limit_sons(5)
            .with_son_orientation_filter(OrientationFilter::Only(Orientation::FlatX))
            .with_random_order(false)
            .with_limit_blocks_in_action(1)
            .with_limit_branching(1)
            .with_height_goal(1000);
        let mut problem = BranchingSearch::new(PlankShape::kapla(), config).unwrap();
        let report = greedy_build(&mut problem, 3).unwrap();
        assert!(!report.goal_reached);
        assert!(report.iterations <= 3);
    }
}
