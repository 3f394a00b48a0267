//! Error types shared across the towerlab crates.

use thiserror::Error;

/// Errors produced by geometry construction and configuration validation.
///
/// Candidate rejection during the search (overlap, instability, cache hits)
/// is ordinary control flow and never surfaces as an `Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// A rotation triple outside the closed axis-aligned set.
    #[error("invalid orientation: ({0}, {1}, {2}) is not an axis-aligned plank rotation")]
    InvalidOrientation(i32, i32, i32),

    /// A string label that does not name a known orientation.
    #[error("unknown orientation label: {0:?}")]
    UnknownOrientation(String),

    /// A plank shape with degenerate or non-lattice extents.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A floor or search configuration that cannot be satisfied.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
