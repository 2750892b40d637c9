//! Pin resolution: placements to absolute net-pin coordinates.

use anyhow::{Context, Result};
use redpnr_common::Coord;
use redpnr_placement::{CellCatalog, Placement};
use std::collections::HashMap;

/// For every net, the absolute coordinates of every pin attached to it.
///
/// Iterates each cell's port dictionary rather than its full block grid, so
/// the cost is `O(pins)`, not `O(voxels)`.
pub fn resolve_pins(placement: &Placement, catalog: &CellCatalog) -> Result<HashMap<String, Vec<Coord>>> {
    let mut net_pins: HashMap<String, Vec<Coord>> = HashMap::new();

    for entry in placement {
        let cell = catalog.get(&entry.cell_name, entry.rotation)?;
        for (pin_name, port) in &cell.ports {
            let net_name = entry.pins.get(pin_name).with_context(|| {
                format!("cell {:?} has no net mapped for pin {:?}", entry.cell_name, pin_name)
            })?;
            let global = entry.anchor.offset(port.coord.y, port.coord.z, port.coord.x);
            net_pins.entry(net_name.clone()).or_default().push(global);
        }
    }

    Ok(net_pins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redpnr_common::{Dimensions, Facing, Grid3};
    use redpnr_placement::{LibraryCell, NetlistInstance, Port};
    use std::collections::HashMap as Map;

    fn and_catalog() -> CellCatalog {
        let dims = Dimensions::new(1, 3, 3);
        let blocks = Grid3::new(dims);
        let mut ports = Map::new();
        ports.insert("A".to_string(), Port { coord: Coord::new(0, 0, 0), facing: Facing::West });
        ports.insert("B".to_string(), Port { coord: Coord::new(0, 2, 0), facing: Facing::West });
        ports.insert("Y".to_string(), Port { coord: Coord::new(0, 1, 2), facing: Facing::East });
        let mut library = Map::new();
        library.insert("AND".to_string(), LibraryCell { blocks, ports });
        CellCatalog::build(&library)
    }

    #[test]
    fn resolves_absolute_pin_coordinates() {
        let catalog = and_catalog();
        let netlist = vec![NetlistInstance {
            cell_name: "AND".to_string(),
            pins: [("A", "a"), ("B", "b"), ("Y", "y")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }];
        let (placement, _dims) = redpnr_placement::placer::initial_placement(&netlist, &catalog, None).unwrap();

        let pins = resolve_pins(&placement, &catalog).unwrap();
        assert_eq!(pins["a"], vec![Coord::new(0, 0, 0)]);
        assert_eq!(pins["b"], vec![Coord::new(0, 2, 0)]);
        assert_eq!(pins["y"], vec![Coord::new(0, 1, 2)]);
    }
}
