//! # towerlab-core
//!
//! Block geometry model for the towerlab stacking-tower search.
//!
//! This crate provides the discrete geometric primitives the search and
//! stability engines are built on:
//!
//! - **Lattice types**: [`Cell`], [`CoverCell`], [`Spread`] — integer grid
//!   coordinates for block volumes, footprints, and joint support surfaces
//! - **Shape**: [`PlankShape`] — lattice extents and mass of the reference
//!   plank, derivable from a mesh bounding box
//! - **Orientation**: [`Orientation`] — the closed six-variant set of
//!   axis-aligned plank poses, with rotation-triple and label normalization
//! - **Block**: [`Block`] — immutable-once-placed geometric unit with
//!   derived cells, footprint, levels, and center of gravity;
//!   [`Placement`] is its minimal cache-key identity
//!
//! Support relations, stability physics, and the search itself live in
//! `towerlab-search`.
//!
//! ## Feature flags
//!
//! - `serde`: enable serialization/deserialization support

pub mod block;
pub mod error;
pub mod grid;
pub mod orientation;
pub mod shape;

// Re-exports
pub use block::{Block, BlockKind, Placement};
pub use error::{Error, Result};
pub use grid::{Axis, Cell, CoverCell, Spread};
pub use orientation::{Orientation, OrientationFilter};
pub use shape::PlankShape;
