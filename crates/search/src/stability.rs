//! Recursive center-of-gravity stability analysis.
//!
//! A block is supported when the aggregate center of gravity of the block
//! and everything resting on it falls inside the joint footprint of some
//! pair of its direct supporters, and every one of those supporters is in
//! turn supported. Blocks resting on the ground level are supported
//! unconditionally, which terminates the recursion.
//!
//! The aggregate COG is a continuous point between lattice cells, so the
//! containment test runs over the four integer cells obtained by rounding
//! each horizontal coordinate down and up. A single supporter is handled by
//! the pair loop pairing a block with itself, which degenerates to that
//! supporter's own footprint.

use crate::tower::{BlockId, TowerState};
use nalgebra::Point3;
use towerlab_core::{Block, CoverCell};

/// Blocks whose bottom rests at this level sit on the ground and are
/// supported unconditionally.
pub const FLOOR_LEVEL: i32 = 0;

fn covers_intersect(a: &Block, b: &Block) -> bool {
    let (small, large) = if a.cover_cells().len() <= b.cover_cells().len() {
        (a, b)
    } else {
        (b, a)
    };
    small
        .cover_cells()
        .iter()
        .any(|c| large.cover_cells().contains(c))
}

/// The four lattice cells surrounding a continuous COG position.
fn cog_candidates(cog: &Point3<f64>) -> [CoverCell; 4] {
    let (fx, cx) = (cog.x.floor() as i32, cog.x.ceil() as i32);
    let (fy, cy) = (cog.y.floor() as i32, cog.y.ceil() as i32);
    [
        CoverCell::new(fx, fy),
        CoverCell::new(fx, cy),
        CoverCell::new(cx, fy),
        CoverCell::new(cx, cy),
    ]
}

impl TowerState {
    /// Links the candidate into the support graph and decides whether the
    /// tower still stands with it in place.
    ///
    /// Linking is idempotent, so re-checking an already linked block never
    /// duplicates relations.
    pub(crate) fn check_stability(&mut self, id: BlockId) -> bool {
        self.link_support(id);
        self.is_supported(id)
    }

    /// Wires the block into the below/above relation sets of its direct
    /// neighbors and invalidates the aggregate COGs its weight shifts.
    ///
    /// Supporters are the blocks whose top face is one level under the
    /// candidate's bottom with a shared footprint cell; carried blocks are
    /// existing blocks whose bottom rests exactly on the candidate's top.
    fn link_support(&mut self, id: BlockId) {
        let (bottom, top) = {
            let block = self.block(id);
            (block.bottom_level(), block.top_level())
        };

        let below: Vec<BlockId> = self
            .ids_at_top_level(bottom - 1)
            .into_iter()
            .filter(|&b| covers_intersect(self.block(id), self.block(b)))
            .collect();
        let above: Vec<BlockId> = self
            .ids_with_top_above(top)
            .into_iter()
            .filter(|&a| self.block(a).bottom_level() == top + 1)
            .filter(|&a| covers_intersect(self.block(id), self.block(a)))
            .collect();

        for &b in &below {
            self.node_mut(b).above.insert(id);
        }
        for &a in &above {
            self.node_mut(a).below.insert(id);
        }
        {
            let node = self.node_mut(id);
            node.below.extend(below.iter().copied());
            node.above.extend(above.iter().copied());
        }
        // The chain walk reaches the new supporters through the links just
        // made, clearing every aggregate the candidate's weight enters.
        self.invalidate_agg_cog_chain(id);
    }

    /// Whether the block holds its own weight plus everything above it.
    fn is_supported(&mut self, id: BlockId) -> bool {
        if self.block(id).bottom_level() == FLOOR_LEVEL {
            return true;
        }
        let below = self.blocks_below(id);
        if below.is_empty() {
            // Floating block: nothing under it, nothing to recurse into.
            return false;
        }

        let cog = self.aggregate_cog(id);
        let candidates = cog_candidates(&cog);

        for (i, &b1) in below.iter().enumerate() {
            for &b2 in &below[i..] {
                let spread = self.block(b1).spread(self.block(b2));
                if candidates.iter().any(|c| spread.contains(*c)) {
                    // The first pair whose joint footprint catches the COG
                    // decides: the verdict is whether every supporter holds
                    // under the load.
                    for &b in &below {
                        if !self.is_supported(b) {
                            return false;
                        }
                    }
                    return true;
                }
            }
        }
        false
    }
}
