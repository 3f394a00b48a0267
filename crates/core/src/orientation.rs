//! The closed set of axis-aligned plank orientations.
//!
//! A plank can stand in exactly six axis-aligned poses: lying flat, on edge,
//! or upright, each with its long axis along X or Y (or Z when upright,
//! where X/Y distinguishes the width axis). Every pose corresponds to one
//! rotation triple over {0, 90} degrees per axis; any other triple is
//! rejected at construction. String labels are normalized to the enum at
//! input edges only.

use crate::shape::PlankShape;
use crate::{Axis, Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the six axis-aligned orientations of a plank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Lying flat, long axis along X.
    FlatX,
    /// Lying flat, long axis along Y.
    FlatY,
    /// On edge, long axis along X.
    EdgeX,
    /// On edge, long axis along Y.
    EdgeY,
    /// Standing upright, width axis along X.
    UprightX,
    /// Standing upright, width axis along Y.
    UprightY,
}

impl Orientation {
    /// All six orientations, in a fixed enumeration order.
    pub const ALL: [Orientation; 6] = [
        Orientation::FlatX,
        Orientation::FlatY,
        Orientation::EdgeX,
        Orientation::EdgeY,
        Orientation::UprightX,
        Orientation::UprightY,
    ];

    /// Maps a rotation triple (degrees about X, Y, Z) to its orientation.
    ///
    /// Only the six triples that keep the plank axis-aligned are accepted;
    /// anything else fails with [`Error::InvalidOrientation`].
    pub fn from_rotation(rotation: (i32, i32, i32)) -> Result<Self> {
        match rotation {
            (0, 0, 0) => Ok(Orientation::FlatX),
            (0, 0, 90) => Ok(Orientation::FlatY),
            (90, 0, 0) => Ok(Orientation::EdgeX),
            (90, 0, 90) => Ok(Orientation::EdgeY),
            (90, 90, 0) => Ok(Orientation::UprightX),
            (0, 90, 0) => Ok(Orientation::UprightY),
            (rx, ry, rz) => Err(Error::InvalidOrientation(rx, ry, rz)),
        }
    }

    /// The canonical rotation triple of this orientation.
    pub fn rotation(self) -> (i32, i32, i32) {
        match self {
            Orientation::FlatX => (0, 0, 0),
            Orientation::FlatY => (0, 0, 90),
            Orientation::EdgeX => (90, 0, 0),
            Orientation::EdgeY => (90, 0, 90),
            Orientation::UprightX => (90, 90, 0),
            Orientation::UprightY => (0, 90, 0),
        }
    }

    /// Normalizes a string label (`"flat_x"`, `"edge_y"`, ...) to an
    /// orientation.
    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "flat_x" => Ok(Orientation::FlatX),
            "flat_y" => Ok(Orientation::FlatY),
            "edge_x" => Ok(Orientation::EdgeX),
            "edge_y" => Ok(Orientation::EdgeY),
            "upright_x" => Ok(Orientation::UprightX),
            "upright_y" => Ok(Orientation::UprightY),
            other => Err(Error::UnknownOrientation(other.to_string())),
        }
    }

    /// The canonical label of this orientation.
    pub fn label(self) -> &'static str {
        match self {
            Orientation::FlatX => "flat_x",
            Orientation::FlatY => "flat_y",
            Orientation::EdgeX => "edge_x",
            Orientation::EdgeY => "edge_y",
            Orientation::UprightX => "upright_x",
            Orientation::UprightY => "upright_y",
        }
    }

    /// Cell extents (x, y, z) of a plank of the given shape in this
    /// orientation.
    pub fn dims(self, shape: &PlankShape) -> (i32, i32, i32) {
        let (l, w, h) = (shape.length(), shape.width(), shape.height());
        match self {
            Orientation::FlatX => (l, w, h),
            Orientation::FlatY => (w, l, h),
            Orientation::EdgeX => (l, h, w),
            Orientation::EdgeY => (h, l, w),
            Orientation::UprightX => (w, h, l),
            Orientation::UprightY => (h, w, l),
        }
    }

    /// The axis the plank's longest extent runs along.
    pub fn long_axis(self) -> Axis {
        match self {
            Orientation::FlatX | Orientation::EdgeX => Axis::X,
            Orientation::FlatY | Orientation::EdgeY => Axis::Y,
            Orientation::UprightX | Orientation::UprightY => Axis::Z,
        }
    }

    /// True iff the long axes of the two orientations are orthogonal.
    pub fn is_perpendicular(self, other: Orientation) -> bool {
        self.long_axis() != other.long_axis()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicate restricting which son orientations a father block may spawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationFilter {
    /// Admit every orientation.
    #[default]
    Any,
    /// Admit exactly one orientation.
    Only(Orientation),
    /// Admit a fixed subset of orientations.
    AnyOf(Vec<Orientation>),
    /// Admit orientations perpendicular to the father block.
    Perpendicular,
}

impl OrientationFilter {
    /// Returns true if a son with orientation `son` may spawn off a father
    /// with orientation `father`.
    pub fn admits(&self, father: Orientation, son: Orientation) -> bool {
        match self {
            OrientationFilter::Any => true,
            OrientationFilter::Only(o) => son == *o,
            OrientationFilter::AnyOf(set) => set.contains(&son),
            OrientationFilter::Perpendicular => father.is_perpendicular(son),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_round_trip() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_rotation(o.rotation()).unwrap(), o);
        }
    }

    #[test]
    fn test_rotation_rejects_off_axis_triples() {
        for triple in [(-90, -90, -90), (45, 0, 0), (0, 0, 180), (90, 90, 90)] {
            assert!(matches!(
                Orientation::from_rotation(triple),
                Err(Error::InvalidOrientation(..))
            ));
        }
    }

    #[test]
    fn test_label_round_trip() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_label(o.label()).unwrap(), o);
        }
        assert!(matches!(
            Orientation::from_label("sideways"),
            Err(Error::UnknownOrientation(_))
        ));
    }

    #[test]
    fn test_dims_cover_all_axis_permutations() {
        let shape = PlankShape::kapla();
        let mut seen: Vec<(i32, i32, i32)> =
            Orientation::ALL.iter().map(|o| o.dims(&shape)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 6);
        assert_eq!(Orientation::FlatX.dims(&shape), (15, 3, 1));
        assert_eq!(Orientation::EdgeY.dims(&shape), (1, 15, 3));
        assert_eq!(Orientation::UprightX.dims(&shape), (3, 1, 15));
    }

    #[test]
    fn test_perpendicularity() {
        assert!(Orientation::FlatX.is_perpendicular(Orientation::FlatY));
        assert!(Orientation::FlatX.is_perpendicular(Orientation::UprightX));
        assert!(!Orientation::FlatX.is_perpendicular(Orientation::EdgeX));
        assert!(!Orientation::UprightX.is_perpendicular(Orientation::UprightY));
    }

    #[test]
    fn test_filter_admission() {
        let father = Orientation::FlatX;
        assert!(OrientationFilter::Any.admits(father, Orientation::EdgeX));
        assert!(OrientationFilter::Only(Orientation::EdgeY).admits(father, Orientation::EdgeY));
        assert!(!OrientationFilter::Only(Orientation::EdgeY).admits(father, Orientation::FlatX));
        let subset = OrientationFilter::AnyOf(vec![Orientation::FlatX, Orientation::FlatY]);
        assert!(subset.admits(father, Orientation::FlatY));
        assert!(!subset.admits(father, Orientation::EdgeX));
        assert!(OrientationFilter::Perpendicular.admits(father, Orientation::FlatY));
        assert!(!OrientationFilter::Perpendicular.admits(father, Orientation::EdgeX));
    }
}
