//! The cell catalog: precomputed rotations of every library cell.

use crate::cell::{Cell, LibraryCell};
use crate::error::PlacementError;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// A library cell's four yaw rotations, indexed `0..=3`.
pub type Rotations = [Cell; 4];

/// Built once from a cell library and treated as read-only for the rest of
/// the run — rotation touches every voxel and every port, so amortizing it
/// across many placer iterations matters.
pub struct CellCatalog {
    entries: HashMap<String, Rotations>,
}

impl CellCatalog {
    /// Precompute every rotation of every cell in `library`.
    pub fn build(library: &HashMap<String, LibraryCell>) -> CellCatalog {
        let entries = library
            .iter()
            .map(|(name, lib_cell)| {
                let rot0 = Cell::new(name.clone(), lib_cell.blocks.clone(), lib_cell.ports.clone());
                let rot1 = rot0.rot90();
                let rot2 = rot1.rot90();
                let rot3 = rot2.rot90();
                (name.clone(), [rot0, rot1, rot2, rot3])
            })
            .collect();

        CellCatalog { entries }
    }

    /// Look up a cell at a given rotation index (`0..=3`).
    pub fn get(&self, name: &str, rotation: u8) -> Result<&Cell> {
        let rotations = self.entries.get(name).ok_or_else(|| PlacementError::UnknownCell {
            name: name.to_string(),
        })?;
        rotations
            .get(rotation as usize)
            .with_context(|| format!("rotation index {} out of range for cell {:?}", rotation, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Port;
    use redpnr_common::{Coord, Dimensions, Facing, Grid3};

    fn one_cell_library() -> HashMap<String, LibraryCell> {
        let mut ports = HashMap::new();
        ports.insert(
            "A".to_string(),
            Port {
                coord: Coord::new(0, 0, 0),
                facing: Facing::West,
            },
        );
        let mut library = HashMap::new();
        library.insert(
            "BUF".to_string(),
            LibraryCell {
                blocks: Grid3::new(Dimensions::new(1, 2, 2)),
                ports,
            },
        );
        library
    }

    #[test]
    fn build_precomputes_four_rotations() {
        let catalog = CellCatalog::build(&one_cell_library());
        assert!(catalog.contains("BUF"));
        for r in 0..4 {
            assert!(catalog.get("BUF", r).is_ok());
        }
    }

    #[test]
    fn unknown_cell_is_an_error() {
        let catalog = CellCatalog::build(&one_cell_library());
        let err = catalog.get("NOPE", 0).unwrap_err();
        assert!(err.downcast_ref::<PlacementError>().is_some());
    }
}
