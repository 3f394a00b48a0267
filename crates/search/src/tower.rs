//! Tower state: the mutable container of placed blocks.
//!
//! Blocks live in a free-list arena and reference each other by stable
//! [`BlockId`], so the bidirectional support relations are index sets
//! instead of ownership cycles. A [`TowerState`] clone is a full deep copy
//! with the same ids, which is the unit of speculative state in the search:
//! branches mutate their own copy and can never disturb the original.
//!
//! A candidate block moves through three stages: *inserted* into the arena,
//! *linked* into the support graph by the stability check (see
//! `stability.rs`), and finally *committed* by [`TowerState::add`], which
//! registers its cells in the occupancy index and the per-level grouping.
//! [`TowerState::can_add`] leaves a valid candidate in the linked stage so
//! a symmetry group can be committed or rolled back as a whole.

use nalgebra::{Point3, Vector3};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use towerlab_core::{Block, Cell, Placement, Result};

/// Stable index of a block in a tower's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) block: Block,
    /// Blocks immediately supporting this one.
    pub(crate) below: BTreeSet<BlockId>,
    /// Blocks immediately resting on this one.
    pub(crate) above: BTreeSet<BlockId>,
    /// Cached aggregate COG of this block plus everything transitively
    /// above it; cleared whenever the above-closure changes.
    pub(crate) agg_cog: Option<Point3<f64>>,
}

/// A tower of placed blocks indexed by vertical level, with the support
/// graph, the occupancy index, and the bad-placement cache.
#[derive(Debug, Clone)]
pub struct TowerState {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    by_top_level: BTreeMap<i32, Vec<BlockId>>,
    occupied: HashMap<Cell, BlockId>,
    max_level: i32,
    bad: HashSet<Placement>,
    floor: BlockId,
}

impl TowerState {
    /// Creates a tower seeded with a plain square floor of the given size.
    pub fn new(floor_size: i32) -> Result<Self> {
        Ok(Self::with_floor(Block::floor(floor_size)?))
    }

    /// Creates a tower seeded with a ring-shaped floor.
    pub fn with_ring_floor(
        floor_size: i32,
        ring_width: i32,
        ring_count: i32,
        ring_spacing: i32,
    ) -> Result<Self> {
        Ok(Self::with_floor(Block::ring_floor(
            floor_size,
            ring_width,
            ring_count,
            ring_spacing,
        )?))
    }

    fn with_floor(floor: Block) -> Self {
        let mut state = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            by_top_level: BTreeMap::new(),
            occupied: HashMap::new(),
            max_level: floor.top_level(),
            bad: HashSet::new(),
            floor: BlockId(0),
        };
        let id = state.insert(floor);
        state.add(id);
        state.floor = id;
        state
    }

    pub(crate) fn insert(&mut self, block: Block) -> BlockId {
        let node = Node {
            block,
            below: BTreeSet::new(),
            above: BTreeSet::new(),
            agg_cog: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                BlockId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                BlockId(self.nodes.len() - 1)
            }
        }
    }

    pub(crate) fn node(&self, id: BlockId) -> &Node {
        self.nodes[id.0].as_ref().expect("stale block id")
    }

    pub(crate) fn node_mut(&mut self, id: BlockId) -> &mut Node {
        self.nodes[id.0].as_mut().expect("stale block id")
    }

    /// The block stored under the given id.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.node(id).block
    }

    /// The id of the floor slab this tower was seeded with.
    pub fn floor_id(&self) -> BlockId {
        self.floor
    }

    /// Number of committed blocks, floor included.
    pub fn block_count(&self) -> usize {
        self.by_top_level.values().map(Vec::len).sum()
    }

    /// The maximum top level over all committed blocks.
    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    /// Ids of the blocks immediately supporting `id`.
    pub fn blocks_below(&self, id: BlockId) -> Vec<BlockId> {
        self.node(id).below.iter().copied().collect()
    }

    /// Ids of the blocks immediately resting on `id`.
    pub fn blocks_above(&self, id: BlockId) -> Vec<BlockId> {
        self.node(id).above.iter().copied().collect()
    }

    /// Committed block ids in ascending top-level order, optionally
    /// excluding floor slabs and already-saturated blocks.
    pub fn gen_blocks(&self, no_floor: bool, filter_saturated: bool) -> Vec<BlockId> {
        let mut ids = Vec::new();
        for level_ids in self.by_top_level.values() {
            for &id in level_ids {
                if no_floor && self.block(id).is_floor() {
                    continue;
                }
                if filter_saturated && self.is_saturated(id) {
                    continue;
                }
                ids.push(id);
            }
        }
        ids
    }

    pub(crate) fn ids_at_top_level(&self, level: i32) -> Vec<BlockId> {
        self.by_top_level
            .get(&level)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn ids_with_top_above(&self, level: i32) -> Vec<BlockId> {
        self.by_top_level
            .range((level + 1)..)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    /// True iff this placement is already known to fail for this tower.
    pub fn is_bad_block(&self, placement: &Placement) -> bool {
        self.bad.contains(placement)
    }

    /// Number of placements in the bad-placement cache.
    pub fn bad_cache_len(&self) -> usize {
        self.bad.len()
    }

    /// True iff every cover cell of the block already carries a block at
    /// the level directly above its top: no attachment slot remains.
    pub fn is_saturated(&self, id: BlockId) -> bool {
        let block = self.block(id);
        let above_level = block.top_level() + 1;
        block
            .cover_cells()
            .iter()
            .all(|c| self.occupied.contains_key(&Cell::new(c.x, c.y, above_level)))
    }

    fn overlaps_committed(&self, block: &Block) -> bool {
        block.cells().iter().any(|c| self.occupied.contains_key(c))
    }

    /// Checks whether the block can join the tower: no overlap with any
    /// committed block, and the arrangement stays stable.
    ///
    /// On success the candidate is left inserted and linked into the
    /// support graph but not committed; the caller either commits it with
    /// [`TowerState::add`] or rolls it back with
    /// [`TowerState::disconnect_block_from_neighbors`]. On failure the
    /// placement is recorded in the bad-placement cache and nothing is left
    /// behind.
    pub fn can_add(&mut self, block: &Block) -> Option<BlockId> {
        if self.overlaps_committed(block) {
            self.bad.insert(*block.placement());
            return None;
        }
        let id = self.insert(block.clone());
        if self.check_stability(id) {
            Some(id)
        } else {
            let placement = *self.block(id).placement();
            self.bad.insert(placement);
            self.disconnect_block_from_neighbors(id);
            None
        }
    }

    /// Commits a linked candidate: registers its cells in the occupancy
    /// index, groups it by top level, and raises `max_level`.
    ///
    /// Precondition: `id` came from a successful [`TowerState::can_add`].
    pub fn add(&mut self, id: BlockId) {
        let (cells, top) = {
            let block = self.block(id);
            (
                block.cells().iter().copied().collect::<Vec<_>>(),
                block.top_level(),
            )
        };
        for cell in cells {
            let previous = self.occupied.insert(cell, id);
            debug_assert!(previous.is_none(), "committed blocks must not overlap");
        }
        self.by_top_level.entry(top).or_default().push(id);
        self.max_level = self.max_level.max(top);
    }

    /// Unlinks a provisionally placed block from every neighbor's relation
    /// sets and frees its arena slot. Used to undo a `can_add` whose group
    /// was later rejected by the symmetry threshold.
    pub fn disconnect_block_from_neighbors(&mut self, id: BlockId) {
        let node = self.nodes[id.0].take().expect("stale block id");
        for &b in &node.below {
            self.node_mut(b).above.remove(&id);
        }
        for &a in &node.above {
            self.node_mut(a).below.remove(&id);
        }
        for &b in &node.below {
            self.invalidate_agg_cog_chain(b);
        }
        self.free.push(id.0);
    }

    /// Clears the cached aggregate COG of `id` and everything transitively
    /// below it (their aggregates all include the weight that changed).
    pub(crate) fn invalidate_agg_cog_chain(&mut self, id: BlockId) {
        let mut stack = vec![id];
        let mut seen = BTreeSet::new();
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            let node = self.node_mut(cur);
            node.agg_cog = None;
            stack.extend(node.below.iter().copied());
        }
    }

    /// The combined center of gravity of `id` and everything transitively
    /// resting on it, weighted by block mass. Cached until the above
    /// closure changes.
    pub(crate) fn aggregate_cog(&mut self, id: BlockId) -> Point3<f64> {
        if let Some(cog) = self.node(id).agg_cog {
            return cog;
        }
        let mut stack = vec![id];
        let mut seen = BTreeSet::new();
        let mut weighted = Vector3::zeros();
        let mut total_mass = 0.0;
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            let node = self.node(cur);
            weighted += node.block.cog().coords * node.block.mass();
            total_mass += node.block.mass();
            stack.extend(node.above.iter().copied());
        }
        let cog = Point3::from(weighted / total_mass);
        self.node_mut(id).agg_cog = Some(cog);
        cog
    }
}

impl fmt::Display for TowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "tower: {} blocks, max level {}",
            self.block_count(),
            self.max_level
        )?;
        for (level, ids) in self.by_top_level.iter().rev() {
            writeln!(f, "  level {:>3}: {} block(s)", level, ids.len())?;
        }
        Ok(())
    }
}
