//! Block-id vocabulary at the I/O boundary.
//!
//! The interior of this workspace treats block ids as plain small integers
//! (`u8`), matching the cell library's own "dense 3D grid of small
//! integers, 0 = empty" model — that keeps the hot grids cheap and
//! cache-friendly. `BlockKind` exists only at the edges (materialization,
//! debugging) where a caller wants to pattern-match on what a voxel *means*
//! rather than carry its raw id around.

use crate::grid::Grid3;
use serde::{Deserialize, Serialize};

/// The two block ids the router needs from an external block-id table: the
/// conductor (in the source domain, `redstone_wire`) and the substrate it
/// sits on (`stone`). These are opaque to the router beyond their value —
/// it never special-cases them beyond "is this voxel wire or its support".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIds {
    pub conductor: u8,
    pub substrate: u8,
}

/// A closed view over a raw block id, used only at materialization
/// boundaries. `0` is always empty; anything else is either the known
/// conductor/substrate id or an opaque library cell block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Empty,
    Conductor,
    Substrate,
    CellBlock(u8),
}

impl BlockKind {
    pub fn classify(raw: u8, ids: BlockIds) -> BlockKind {
        if raw == 0 {
            BlockKind::Empty
        } else if raw == ids.conductor {
            BlockKind::Conductor
        } else if raw == ids.substrate {
            BlockKind::Substrate
        } else {
            BlockKind::CellBlock(raw)
        }
    }
}

/// Voxel counts by [`BlockKind`], for reporting on a finished layout
/// without handing callers the raw ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockCounts {
    pub empty: usize,
    pub conductor: usize,
    pub substrate: usize,
    pub cell_blocks: usize,
}

impl BlockCounts {
    /// Classify every voxel of `grid` and tally the result.
    pub fn tally(grid: &Grid3<u8>, ids: BlockIds) -> BlockCounts {
        let mut counts = BlockCounts::default();
        for (_, &raw) in grid.iter() {
            match BlockKind::classify(raw, ids) {
                BlockKind::Empty => counts.empty += 1,
                BlockKind::Conductor => counts.conductor += 1,
                BlockKind::Substrate => counts.substrate += 1,
                BlockKind::CellBlock(_) => counts.cell_blocks += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_ids() {
        let ids = BlockIds {
            conductor: 55,
            substrate: 5,
        };
        assert_eq!(BlockKind::classify(0, ids), BlockKind::Empty);
        assert_eq!(BlockKind::classify(55, ids), BlockKind::Conductor);
        assert_eq!(BlockKind::classify(5, ids), BlockKind::Substrate);
        assert_eq!(BlockKind::classify(9, ids), BlockKind::CellBlock(9));
    }

    #[test]
    fn tally_counts_each_kind() {
        use crate::grid::Dimensions;

        let ids = BlockIds { conductor: 55, substrate: 5 };
        let dims = Dimensions::new(1, 1, 4);
        let mut grid: Grid3<u8> = Grid3::new(dims);
        *grid.get_mut(crate::coord::Coord::new(0, 0, 0)).unwrap() = 55;
        *grid.get_mut(crate::coord::Coord::new(0, 0, 1)).unwrap() = 5;
        *grid.get_mut(crate::coord::Coord::new(0, 0, 2)).unwrap() = 9;

        let counts = BlockCounts::tally(&grid, ids);
        assert_eq!(
            counts,
            BlockCounts { empty: 1, conductor: 1, substrate: 1, cell_blocks: 1 }
        );
    }
}
