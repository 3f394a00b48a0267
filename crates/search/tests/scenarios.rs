//! End-to-end scenarios driving the strategies through the public API.

use towerlab_core::{Orientation, OrientationFilter, PlankShape};
use towerlab_search::{
    greedy_build, BranchingSearch, RingSearch, SearchConfig, SearchProblem,
};

#[test]
fn branching_search_fills_the_floor_and_reaches_a_low_goal() {
    let config = SearchConfig::new()
        .with_floor_size(30)
        .with_limit_sons(10)
        .with_son_orientation_filter(OrientationFilter::Only(Orientation::EdgeX))
        .with_random_order(false)
        .with_limit_blocks_in_action(4)
        .with_limit_branching(1)
        .with_height_goal(1);
    let mut problem = BranchingSearch::new(PlankShape::kapla(), config).unwrap();
    let start = problem.start_state().unwrap();

    let successors = problem.successors(&start);
    assert_eq!(successors.len(), 1);
    let successor = &successors[0];
    assert_eq!(successor.actions.len(), 4);
    // On-edge planks resting on the floor all sit at the same height.
    assert!(successor.actions.iter().all(|p| p.position.z == 1));
    assert!(successor
        .actions
        .iter()
        .all(|p| p.orientation == Orientation::EdgeX));
    assert!(problem.is_goal(&successor.state));
    assert_eq!(successor.state.max_level(), 2);

    // The parent state is untouched by the expansion.
    assert_eq!(start.block_count(), 1);
    assert_eq!(start.max_level(), -1);
}

#[test]
fn symmetry_groups_commit_above_threshold_and_roll_back_below() {
    let shape = PlankShape::kapla();
    let base_config = SearchConfig::new()
        .with_floor_size(80)
        .with_limit_sons(1)
        .with_son_orientation_filter(OrientationFilter::Only(Orientation::FlatX))
        .with_random_order(false)
        .with_limit_blocks_in_action(100)
        .with_limit_branching(1)
        .with_height_goal(1);

    // Flat mirrors at base distance 6 overlap pairwise along the long
    // axis, so a five-member group keeps exactly three survivors.
    let mut lenient =
        BranchingSearch::new(shape.clone(), base_config.clone().with_symmetry(3, 6)).unwrap();
    let start = lenient.start_state().unwrap();
    let successors = lenient.successors(&start);
    assert_eq!(successors[0].actions.len(), 3);
    assert_eq!(successors[0].state.block_count(), 4);
    assert_eq!(lenient.stats().groups_rolled_back, 0);

    // A threshold of four rolls the same group back entirely.
    let mut strict = BranchingSearch::new(shape, base_config.with_symmetry(4, 6)).unwrap();
    let start = strict.start_state().unwrap();
    let successors = strict.successors(&start);
    assert!(successors[0].actions.is_empty());
    assert_eq!(successors[0].state.block_count(), 1);
    assert!(strict.stats().groups_rolled_back >= 1);
}

#[test]
fn ring_search_stops_on_pool_exhaustion_without_empty_successors() {
    let config = SearchConfig::new()
        .with_floor_size(12)
        .with_rings(2, 1, 4)
        .with_limit_sons(6)
        .with_random_order(false)
        .with_limit_blocks_in_action(2)
        .with_limit_branching(10)
        .with_height_goal(5);
    let mut problem = RingSearch::new(PlankShape::kapla(), config).unwrap();
    let start = problem.start_state().unwrap();

    // Ring floor: a band of width 2 inside a 13x13 square.
    let floor = start.block(start.floor_id());
    assert!(floor.is_floor());
    assert_eq!(floor.cover_cells().len(), 13 * 13 - 9 * 9);

    let successors = problem.successors(&start);
    // The shared pool drains long before ten branches are filled.
    assert!(!successors.is_empty());
    assert!(successors.len() < 10);
    assert!(successors.iter().all(|s| !s.actions.is_empty()));

    // Each pool candidate is consumed at most once across all branches.
    let mut seen = std::collections::HashSet::new();
    for successor in &successors {
        for action in &successor.actions {
            assert!(seen.insert(*action));
        }
    }

    // Perpendicular-only attachment never yields a plank aligned with the
    // floor's nominal orientation.
    assert!(successors
        .iter()
        .flat_map(|s| &s.actions)
        .all(|p| p.orientation != Orientation::FlatX && p.orientation != Orientation::EdgeX));
}

#[test]
fn greedy_build_stacks_toward_the_height_goal() {
    let config = SearchConfig::new()
        .with_floor_size(30)
        .with_limit_sons(40)
        .with_seed(7)
        .with_limit_blocks_in_action(6)
        .with_limit_branching(3)
        .with_height_goal(4);
    let mut problem = BranchingSearch::new(PlankShape::kapla(), config).unwrap();
    let report = greedy_build(&mut problem, 50).unwrap();

    assert!(report.blocks_placed >= 1);
    assert!(report.iterations >= 1);
    assert_eq!(report.goal_reached, report.state.max_level() >= 4);
    if report.goal_reached {
        assert!(report.iterations <= 50);
    }
}
