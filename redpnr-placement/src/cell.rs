//! Library cells and their precomputed rotations.

use redpnr_common::{Coord, Dimensions, Facing, Grid3};
use std::collections::HashMap;

/// A single named pin on a cell, in the cell's local frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    pub coord: Coord,
    pub facing: Facing,
}

/// The external collaborator's view of a library cell: a dense block grid
/// and a name-to-port map, before it has been assigned a name or rotated.
/// This is the shape an external cell-library loader hands to
/// [`crate::catalog::CellCatalog::build`].
#[derive(Clone, Debug)]
pub struct LibraryCell {
    pub blocks: Grid3<u8>,
    pub ports: HashMap<String, Port>,
}

/// An immutable, named library cell at a specific yaw rotation.
#[derive(Clone, Debug)]
pub struct Cell {
    pub name: String,
    pub blocks: Grid3<u8>,
    pub ports: HashMap<String, Port>,
}

impl Cell {
    pub fn new(name: impl Into<String>, blocks: Grid3<u8>, ports: HashMap<String, Port>) -> Self {
        Self {
            name: name.into(),
            blocks,
            ports,
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.blocks.dims()
    }

    /// Rotate this cell 90 degrees about the vertical (Y) axis:
    /// `(y, z, x) -> (y, x, D-1-z)`. Four applications return a cell whose
    /// contents are element-wise equal to the original (and whose shape has
    /// cycled back to the original `(H, D, W)`).
    pub fn rot90(&self) -> Cell {
        let old_dims = self.blocks.dims();
        let new_dims = Dimensions::new(old_dims.height, old_dims.width, old_dims.depth);

        let mut blocks = Grid3::new(new_dims);
        for (coord, &block) in self.blocks.iter() {
            let new_coord = Coord::new(coord.y, coord.x, old_dims.depth as i32 - 1 - coord.z);
            *blocks.get_mut(new_coord).expect("rotation stays in bounds") = block;
        }

        let ports = self
            .ports
            .iter()
            .map(|(name, port)| {
                let new_coord = Coord::new(
                    port.coord.y,
                    port.coord.x,
                    old_dims.depth as i32 - 1 - port.coord.z,
                );
                (
                    name.clone(),
                    Port {
                        coord: new_coord,
                        facing: port.facing.rot90(),
                    },
                )
            })
            .collect();

        Cell {
            name: self.name.clone(),
            blocks,
            ports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redpnr_common::Facing;

    fn and_cell() -> Cell {
        // A 1x3x3 "AND" cell: two input pins and one output.
        let dims = Dimensions::new(1, 3, 3);
        let mut blocks = Grid3::new(dims);
        for z in 0..3 {
            for x in 0..3 {
                *blocks.get_mut(Coord::new(0, z, x)).unwrap() = 1;
            }
        }
        let mut ports = HashMap::new();
        ports.insert(
            "A".to_string(),
            Port {
                coord: Coord::new(0, 0, 0),
                facing: Facing::West,
            },
        );
        ports.insert(
            "B".to_string(),
            Port {
                coord: Coord::new(0, 2, 0),
                facing: Facing::West,
            },
        );
        ports.insert(
            "Y".to_string(),
            Port {
                coord: Coord::new(0, 1, 2),
                facing: Facing::East,
            },
        );
        Cell::new("AND", blocks, ports)
    }

    #[test]
    fn rotation_closure() {
        let c = and_cell();
        let rotated = c.rot90().rot90().rot90().rot90();

        assert_eq!(rotated.dims(), c.dims());
        for (coord, value) in c.blocks.iter() {
            assert_eq!(rotated.blocks.get(coord), Some(value));
        }
        for (name, port) in &c.ports {
            let rotated_port = &rotated.ports[name];
            assert_eq!(rotated_port.coord, port.coord);
            assert_eq!(rotated_port.facing, port.facing);
        }
    }

    #[test]
    fn rot90_swaps_depth_and_width() {
        let c = and_cell();
        let rotated = c.rot90();
        assert_eq!(rotated.dims(), Dimensions::new(1, 3, 3));

        // A non-square cell actually demonstrates the swap.
        let dims = Dimensions::new(1, 2, 4);
        let blocks = Grid3::new(dims);
        let rect = Cell::new("REC", blocks, HashMap::new());
        let rotated = rect.rot90();
        assert_eq!(rotated.dims(), Dimensions::new(1, 4, 2));
    }
}
