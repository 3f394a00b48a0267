//! The reference plank shape: lattice extents and mass.
//!
//! The search only needs the bounding dimensions and mass of the block it
//! stacks; full mesh fidelity (and STL parsing) is a rendering concern and
//! stays outside this crate. [`PlankShape::from_mesh_bounds`] is the bridge
//! from a loaded mesh to the lattice model.

use crate::{Error, Result};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lattice extents and mass of the rectangular plank every block is cut from.
///
/// Extents are odd cell counts, so a plank centered on an integer lattice
/// position covers whole cells symmetrically in every orientation. Extents
/// are ordered `length >= width >= height`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlankShape {
    length: i32,
    width: i32,
    height: i32,
    mass: f64,
}

impl PlankShape {
    /// Creates a plank shape from cell extents.
    pub fn new(length: i32, width: i32, height: i32) -> Result<Self> {
        if height < 1 {
            return Err(Error::InvalidShape(format!(
                "extents must be positive, got {length}x{width}x{height}"
            )));
        }
        if length < width || width < height {
            return Err(Error::InvalidShape(format!(
                "extents must satisfy length >= width >= height, got {length}x{width}x{height}"
            )));
        }
        if length % 2 == 0 || width % 2 == 0 || height % 2 == 0 {
            return Err(Error::InvalidShape(format!(
                "extents must be odd cell counts, got {length}x{width}x{height}"
            )));
        }
        Ok(Self {
            length,
            width,
            height,
            mass: 1.0,
        })
    }

    /// The classic 15x3x1 stacking plank.
    pub fn kapla() -> Self {
        Self {
            length: 15,
            width: 3,
            height: 1,
            mass: 1.0,
        }
    }

    /// Derives a shape from the axis-aligned bounds of a reference mesh,
    /// supplied once at startup. Extents are rounded up to odd cell counts
    /// and sorted so the longest mesh axis becomes the plank length.
    pub fn from_mesh_bounds(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        let mut extents = [max.x - min.x, max.y - min.y, max.z - min.z];
        if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(Error::InvalidShape(format!(
                "mesh bounds are degenerate: {min} .. {max}"
            )));
        }
        extents.sort_by(|a, b| b.total_cmp(a));
        let cells = extents.map(|e| {
            let n = e.ceil() as i32;
            if n % 2 == 0 {
                n + 1
            } else {
                n
            }
        });
        Self::new(cells[0], cells[1], cells[2])
    }

    /// Sets the plank mass (used to weight aggregate centers of gravity).
    pub fn with_mass(mut self, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidShape(format!("mass must be positive, got {mass}")));
        }
        self.mass = mass;
        Ok(self)
    }

    /// Longest extent, in cells.
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Middle extent, in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Shortest extent, in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Plank mass.
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

impl Default for PlankShape {
    fn default() -> Self {
        Self::kapla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kapla_extents() {
        let shape = PlankShape::kapla();
        assert_eq!(
            (shape.length(), shape.width(), shape.height()),
            (15, 3, 1)
        );
        assert_eq!(shape.mass(), 1.0);
    }

    #[test]
    fn test_new_rejects_even_extents() {
        assert!(PlankShape::new(14, 3, 1).is_err());
        assert!(PlankShape::new(15, 4, 1).is_err());
        assert!(PlankShape::new(15, 3, 2).is_err());
    }

    #[test]
    fn test_new_rejects_unordered_extents() {
        assert!(PlankShape::new(3, 15, 1).is_err());
        assert!(PlankShape::new(15, 1, 3).is_err());
    }

    #[test]
    fn test_from_mesh_bounds_rounds_to_odd() {
        let shape = PlankShape::from_mesh_bounds(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(14.2, 0.8, 2.9),
        )
        .unwrap();
        assert_eq!(
            (shape.length(), shape.width(), shape.height()),
            (15, 3, 1)
        );
    }

    #[test]
    fn test_from_mesh_bounds_rejects_degenerate() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(PlankShape::from_mesh_bounds(p, p).is_err());
    }

    #[test]
    fn test_with_mass_validation() {
        assert!(PlankShape::kapla().with_mass(2.5).is_ok());
        assert!(PlankShape::kapla().with_mass(0.0).is_err());
        assert!(PlankShape::kapla().with_mass(f64::NAN).is_err());
    }
}
