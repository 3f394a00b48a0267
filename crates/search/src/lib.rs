//! # towerlab-search
//!
//! Stability physics and successor-generation search over towerlab block
//! geometry.
//!
//! - **Tower state**: [`TowerState`] — arena-backed container of placed
//!   blocks with the support graph, occupancy index, and bad-placement
//!   cache; a clone is an isolated branch
//! - **Stability**: recursive center-of-gravity support analysis, exposed
//!   through [`TowerState::can_add`]
//! - **Strategies**: [`BranchingSearch`] (square floor, optional symmetry
//!   groups) and [`RingSearch`] (ring floor, shared candidate pool), both
//!   behind the [`SearchProblem`] seam
//! - **Runner**: [`greedy_build`] — greedy best-successor driver producing
//!   a [`BuildReport`]
//!
//! ## Feature flags
//!
//! - `serde`: enable serialization/deserialization support

pub mod config;
pub mod problem;
pub mod runner;
pub mod stability;
pub mod stats;
pub mod strategy;
pub mod tower;

// Re-exports
pub use towerlab_core::{Error, Result};

pub use config::SearchConfig;
pub use problem::{SearchProblem, Successor};
pub use runner::{greedy_build, BuildReport};
pub use stability::FLOOR_LEVEL;
pub use stats::SearchStats;
pub use strategy::{BranchingSearch, RingSearch};
pub use tower::{BlockId, TowerState};
