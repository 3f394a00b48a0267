//! Blocks: immutable-once-placed geometric units.
//!
//! A [`Block`] is a plank in one of the six orientations at an integer
//! lattice position, or a floor slab the tower is built on. Its occupied
//! cells, footprint, vertical extent, and center of gravity are derived at
//! construction and never change. Identity, equality, and hashing depend
//! only on the [`Placement`] (orientation + position), which is also the
//! cache key for known-bad placements.
//!
//! Support relations between blocks live in the tower's arena, not here;
//! blocks stay purely geometric.

use crate::grid::{Cell, CoverCell, Spread};
use crate::orientation::{Orientation, OrientationFilter};
use crate::shape::PlankShape;
use crate::{Error, Result};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The minimal serializable identity of a hypothetical block: orientation
/// plus lattice position. Used as the bad-placement cache key before any
/// full [`Block`] is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub orientation: Orientation,
    pub position: Cell,
}

impl Placement {
    /// Creates a new placement descriptor.
    pub fn new(orientation: Orientation, position: Cell) -> Self {
        Self {
            orientation,
            position,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@({},{},{})",
            self.orientation, self.position.x, self.position.y, self.position.z
        )
    }
}

/// What kind of footprint a block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlockKind {
    /// A plank cut from the reference shape.
    Plank,
    /// A pre-seeded floor slab (plain square or concentric rings).
    Floor,
}

/// An immutable geometric block: a plank or a floor slab.
#[derive(Debug, Clone)]
pub struct Block {
    placement: Placement,
    kind: BlockKind,
    cells: HashSet<Cell>,
    cover: HashSet<CoverCell>,
    cover_rect: Spread,
    bottom_level: i32,
    top_level: i32,
    mass: f64,
}

impl Block {
    /// Creates a plank block of the given shape, orientation, and position.
    pub fn plank(shape: &PlankShape, orientation: Orientation, position: Cell) -> Self {
        let (sx, sy, sz) = orientation.dims(shape);
        let (hx, hy, hz) = ((sx - 1) / 2, (sy - 1) / 2, (sz - 1) / 2);
        let mut cells = HashSet::with_capacity((sx * sy * sz) as usize);
        let mut cover = HashSet::with_capacity((sx * sy) as usize);
        for x in (position.x - hx)..=(position.x + hx) {
            for y in (position.y - hy)..=(position.y + hy) {
                cover.insert(CoverCell::new(x, y));
                for z in (position.z - hz)..=(position.z + hz) {
                    cells.insert(Cell::new(x, y, z));
                }
            }
        }
        Self {
            placement: Placement::new(orientation, position),
            kind: BlockKind::Plank,
            cells,
            cover,
            cover_rect: Spread::new(
                position.x - hx,
                position.y - hy,
                position.x + hx,
                position.y + hy,
            ),
            bottom_level: position.z - hz,
            top_level: position.z + hz,
            mass: shape.mass(),
        }
    }

    /// Creates a plank from a raw rotation triple, failing on any triple
    /// outside the closed orientation set.
    pub fn from_rotation(
        shape: &PlankShape,
        rotation: (i32, i32, i32),
        position: Cell,
    ) -> Result<Self> {
        let orientation = Orientation::from_rotation(rotation)?;
        Ok(Self::plank(shape, orientation, position))
    }

    /// Creates a plank from a placement descriptor.
    pub fn from_placement(shape: &PlankShape, placement: &Placement) -> Self {
        Self::plank(shape, placement.orientation, placement.position)
    }

    /// Creates a square floor slab of the given size (cells per side).
    ///
    /// The floor occupies level -1, so any block resting on it has bottom
    /// level 0, the floor level of the stability engine.
    pub fn floor(size: i32) -> Result<Self> {
        if size < 1 {
            return Err(Error::InvalidConfig(format!(
                "floor size must be positive, got {size}"
            )));
        }
        let h = size / 2;
        Self::floor_from_cover(
            (-h..=h).flat_map(|x| (-h..=h).map(move |y| CoverCell::new(x, y))),
        )
    }

    /// Creates a floor whose footprint is `ring_count` concentric square
    /// rings of `ring_width` cells, spaced `ring_spacing` cells apart, the
    /// outermost ring at the edge of a floor of the given size.
    pub fn ring_floor(size: i32, ring_width: i32, ring_count: i32, ring_spacing: i32) -> Result<Self> {
        if size < 1 || ring_width < 1 || ring_count < 1 || ring_spacing < 1 {
            return Err(Error::InvalidConfig(format!(
                "ring floor parameters must be positive, got size {size}, width {ring_width}, \
                 count {ring_count}, spacing {ring_spacing}"
            )));
        }
        let h = size / 2;
        if h - (ring_count - 1) * ring_spacing - ring_width < 0 {
            return Err(Error::InvalidConfig(format!(
                "{ring_count} rings of width {ring_width} spaced {ring_spacing} apart do not fit \
                 a floor of size {size}"
            )));
        }
        let in_ring = move |cell: CoverCell| {
            let d = cell.chebyshev();
            (0..ring_count).any(|k| {
                let outer = h - k * ring_spacing;
                d <= outer && d > outer - ring_width
            })
        };
        Self::floor_from_cover(
            (-h..=h)
                .flat_map(|x| (-h..=h).map(move |y| CoverCell::new(x, y)))
                .filter(move |c| in_ring(*c)),
        )
    }

    fn floor_from_cover(cover: impl Iterator<Item = CoverCell>) -> Result<Self> {
        let cover: HashSet<CoverCell> = cover.collect();
        if cover.is_empty() {
            return Err(Error::InvalidConfig("floor footprint is empty".to_string()));
        }
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
        for c in &cover {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        let cells = cover.iter().map(|c| Cell::new(c.x, c.y, -1)).collect();
        Ok(Self {
            placement: Placement::new(Orientation::FlatX, Cell::new(0, 0, -1)),
            kind: BlockKind::Floor,
            cells,
            cover,
            cover_rect: Spread::new(min_x, min_y, max_x, max_y),
            bottom_level: -1,
            top_level: -1,
            mass: 1.0,
        })
    }

    /// The placement identity of this block.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// This block's orientation.
    pub fn orientation(&self) -> Orientation {
        self.placement.orientation
    }

    /// This block's lattice position (the geometric center).
    pub fn position(&self) -> Cell {
        self.placement.position
    }

    /// Whether this block is a floor slab.
    pub fn is_floor(&self) -> bool {
        self.kind == BlockKind::Floor
    }

    /// The lattice cells occupied by this block's volume.
    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    /// The footprint of this block on the horizontal grid.
    pub fn cover_cells(&self) -> &HashSet<CoverCell> {
        &self.cover
    }

    /// Lowest level this block occupies.
    pub fn bottom_level(&self) -> i32 {
        self.bottom_level
    }

    /// Highest level this block occupies.
    pub fn top_level(&self) -> i32 {
        self.top_level
    }

    /// This block's mass.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Geometric center of this block, standing in for its mass center.
    pub fn cog(&self) -> Point3<f64> {
        let p = self.placement.position;
        Point3::new(p.x as f64, p.y as f64, p.z as f64)
    }

    /// True iff the two blocks occupy at least one common cell.
    pub fn is_overlapping(&self, other: &Block) -> bool {
        if self.top_level < other.bottom_level || other.top_level < self.bottom_level {
            return false;
        }
        let (small, large) = if self.cells.len() <= other.cells.len() {
            (&self.cells, &other.cells)
        } else {
            (&other.cells, &self.cells)
        };
        small.iter().any(|c| large.contains(c))
    }

    /// The joint support surface spanned by this block and another,
    /// presumed co-supporting, block.
    pub fn spread(&self, other: &Block) -> Spread {
        Spread::join(self.cover_rect, other.cover_rect)
    }

    /// True iff the given orientation is perpendicular to this block's.
    pub fn is_perpendicular(&self, orientation: Orientation) -> bool {
        self.placement.orientation.is_perpendicular(orientation)
    }

    /// Generates every placement where a new plank could rest directly on
    /// this block, across all orientations admitted by `filter`.
    ///
    /// For plank fathers a son qualifies when its footprint overlaps the
    /// father's; for floor fathers the son's center must sit on a floor
    /// cover cell, which keeps ring floors meaningful. Pass an RNG to
    /// shuffle the sequence; `limit` truncates it. Every call produces a
    /// fresh, independent sequence.
    pub fn possible_placements(
        &self,
        shape: &PlankShape,
        filter: &OrientationFilter,
        limit: Option<usize>,
        rng: Option<&mut StdRng>,
    ) -> Vec<Placement> {
        let mut descriptors = Vec::new();
        for orientation in Orientation::ALL {
            if !filter.admits(self.placement.orientation, orientation) {
                continue;
            }
            let (sx, sy, sz) = orientation.dims(shape);
            let (hx, hy, hz) = ((sx - 1) / 2, (sy - 1) / 2, (sz - 1) / 2);
            let z = self.top_level + 1 + hz;
            match self.kind {
                BlockKind::Plank => {
                    for x in (self.cover_rect.min_x - hx)..=(self.cover_rect.max_x + hx) {
                        for y in (self.cover_rect.min_y - hy)..=(self.cover_rect.max_y + hy) {
                            descriptors
                                .push(Placement::new(orientation, Cell::new(x, y, z)));
                        }
                    }
                }
                BlockKind::Floor => {
                    let mut anchors: Vec<CoverCell> = self.cover.iter().copied().collect();
                    anchors.sort_unstable();
                    descriptors.extend(
                        anchors
                            .into_iter()
                            .map(|c| Placement::new(orientation, Cell::new(c.x, c.y, z))),
                    );
                }
            }
        }
        if let Some(rng) = rng {
            descriptors.shuffle(rng);
        }
        if let Some(limit) = limit {
            descriptors.truncate(limit);
        }
        descriptors
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.placement == other.placement
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.placement.hash(state);
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BlockKind::Plank => write!(f, "plank {}", self.placement),
            BlockKind::Floor => write!(
                f,
                "floor [{}..{}]x[{}..{}]",
                self.cover_rect.min_x,
                self.cover_rect.max_x,
                self.cover_rect.min_y,
                self.cover_rect.max_y
            ),
        }
    }
}
