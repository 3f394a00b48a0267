//! Integer-lattice primitives: cells, cover cells, axes, and spreads.
//!
//! All block geometry lives on a unit lattice. A block's volume is a set of
//! [`Cell`]s, its footprint a set of [`CoverCell`]s, and the joint support
//! surface of two blocks a [`Spread`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit lattice coordinate occupied by a block's 3D volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Projects this cell onto the horizontal grid.
    pub fn cover(self) -> CoverCell {
        CoverCell::new(self.x, self.y)
    }

    /// Returns this cell translated by the given offsets.
    pub fn translated(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// A cell projected onto the horizontal grid (height ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverCell {
    pub x: i32,
    pub y: i32,
}

impl CoverCell {
    /// Creates a new cover cell.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance from the grid origin. Square "rings" of a ring
    /// floor are bands of constant Chebyshev distance.
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }
}

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

/// The lattice-convex joint footprint of one or two blocks, used as the
/// support surface a center of gravity must land inside.
///
/// Stored as an inclusive axis-aligned cell-range rectangle: the smallest
/// rectangle covering both footprints. For a single rectangular plank this
/// is exactly its own footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spread {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Spread {
    /// Creates a spread from inclusive cell bounds.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the smallest spread covering both inputs.
    pub fn join(a: Spread, b: Spread) -> Spread {
        Spread::new(
            a.min_x.min(b.min_x),
            a.min_y.min(b.min_y),
            a.max_x.max(b.max_x),
            a.max_y.max(b.max_y),
        )
    }

    /// Returns true if the cover cell lies inside this spread.
    pub fn contains(&self, cell: CoverCell) -> bool {
        cell.x >= self.min_x && cell.x <= self.max_x && cell.y >= self.min_y && cell.y <= self.max_y
    }

    /// Number of cover cells inside this spread.
    pub fn area(&self) -> i64 {
        let w = (self.max_x - self.min_x + 1) as i64;
        let d = (self.max_y - self.min_y + 1) as i64;
        w * d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_cover_projection() {
        let c = Cell::new(3, -2, 7);
        assert_eq!(c.cover(), CoverCell::new(3, -2));
    }

    #[test]
    fn test_cell_translated() {
        let c = Cell::new(1, 2, 3).translated(-1, -2, -3);
        assert_eq!(c, Cell::new(0, 0, 0));
    }

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(CoverCell::new(0, 0).chebyshev(), 0);
        assert_eq!(CoverCell::new(-3, 2).chebyshev(), 3);
        assert_eq!(CoverCell::new(1, -5).chebyshev(), 5);
    }

    #[test]
    fn test_spread_join_and_contains() {
        let a = Spread::new(-7, 0, 7, 0);
        let b = Spread::new(-7, 4, 7, 4);
        let joint = Spread::join(a, b);
        assert_eq!(joint, Spread::new(-7, 0, 7, 4));
        assert!(joint.contains(CoverCell::new(0, 2)));
        assert!(!joint.contains(CoverCell::new(8, 2)));
        assert_eq!(joint.area(), 15 * 5);
    }
}
