//! The placer: initial placement, scoring, and the move generator.

use crate::catalog::CellCatalog;
use crate::error::PlacementError;
use crate::placement::{Netlist, Placement, PlacementEntry};
use anyhow::{Context, Result};
use log::info;
use rand::Rng;
use redpnr_common::{Coord, Dimensions, Grid3};
use std::collections::HashMap;

const SPACING: i32 = 1;

/// Lay cells out in a single row along the X axis at `y = z = 0`, in
/// netlist order, separated by one voxel of spacing.
///
/// `dims`, when given, must have exactly three entries (height, depth,
/// width); anything else is an [`PlacementError::InvalidDimensions`].
pub fn initial_placement(
    netlist: &Netlist,
    catalog: &CellCatalog,
    dims: Option<&[u32]>,
) -> Result<(Placement, Dimensions)> {
    let cells = netlist
        .iter()
        .map(|instance| catalog.get(&instance.cell_name, 0))
        .collect::<Result<Vec<_>>>()?;

    let dims = match dims {
        None => {
            let height = cells.iter().map(|c| c.dims().height).max().unwrap_or(0);
            let width_estimate: u32 = cells
                .iter()
                .map(|c| c.dims().depth.max(c.dims().width))
                .sum::<u32>()
                + (cells.len() as u32) * (SPACING as u32);
            let estimated = Dimensions::new(height, width_estimate, width_estimate);
            info!("estimating dimensions to be {}", estimated);
            estimated
        }
        Some(d) => {
            if d.len() != 3 {
                return Err(PlacementError::InvalidDimensions.into());
            }
            Dimensions::new(d[0], d[1], d[2])
        }
    };

    let mut x = 0i32;
    let mut placement = Placement::with_capacity(netlist.len());
    for (instance, cell) in netlist.iter().zip(cells.iter()) {
        placement.push(PlacementEntry {
            cell_name: instance.cell_name.clone(),
            anchor: Coord::new(0, 0, x),
            rotation: 0,
            pins: instance.pins.clone(),
        });
        x += cell.dims().width as i32 + SPACING;
    }

    Ok((placement, dims))
}

/// For each net, the half-perimeter of the bounding box of its pins'
/// absolute coordinates. `netlist` is accepted for parity with the
/// original's signature but is unused — every fact this needs (cell name,
/// rotation, pins) already lives on `placement`.
pub fn estimate_wire_lengths(
    _netlist: &Netlist,
    catalog: &CellCatalog,
    placement: &Placement,
) -> Result<HashMap<String, i64>> {
    let mut net_pins: HashMap<&str, Vec<Coord>> = HashMap::new();

    for entry in placement {
        let cell = catalog.get(&entry.cell_name, entry.rotation)?;
        for (pin_name, port) in &cell.ports {
            let net_name = entry
                .pins
                .get(pin_name)
                .with_context(|| format!("cell {:?} has no net for pin {:?}", entry.cell_name, pin_name))?;
            let global = entry.anchor.offset(port.coord.y, port.coord.z, port.coord.x);
            net_pins.entry(net_name.as_str()).or_default().push(global);
        }
    }

    let mut lengths = HashMap::new();
    for (net, pins) in net_pins {
        let dy = pins.iter().map(|c| c.y).max().unwrap() - pins.iter().map(|c| c.y).min().unwrap();
        let dz = pins.iter().map(|c| c.z).max().unwrap() - pins.iter().map(|c| c.z).min().unwrap();
        let dx = pins.iter().map(|c| c.x).max().unwrap() - pins.iter().map(|c| c.x).min().unwrap();
        lengths.insert(net.to_string(), (dy + dz + dx) as i64);
    }

    Ok(lengths)
}

/// Stamp every non-empty voxel of each placed cell's block grid into a
/// fresh occupancy count grid.
pub fn compute_occupied(
    _netlist: &Netlist,
    catalog: &CellCatalog,
    placement: &Placement,
    dims: Dimensions,
) -> Result<Grid3<u32>> {
    let mut grid: Grid3<u32> = Grid3::new(dims);

    for (instance, entry) in placement.iter().enumerate() {
        let cell = catalog.get(&entry.cell_name, entry.rotation)?;
        for (coord, &block) in cell.blocks.iter() {
            if block == 0 {
                continue;
            }
            let global = entry.anchor.offset(coord.y, coord.z, coord.x);
            let slot = grid.get_mut(global).ok_or_else(|| PlacementError::OutOfBoundsStamp {
                instance,
                cell_name: entry.cell_name.clone(),
            })?;
            *slot += 1;
        }
    }

    Ok(grid)
}

/// Sum over voxels of `max(0, count - 1)`.
pub fn overlap_penalty(occupancy: &Grid3<u32>) -> u64 {
    occupancy
        .iter()
        .map(|(_, &v)| v.saturating_sub(1) as u64)
        .sum()
}

/// Sum of all estimated wire lengths plus the overlap penalty. Equal
/// weighting is intentional: overlapping `k` cells at one voxel costs
/// `(k - 1)` wire-length-units.
pub fn score(
    netlist: &Netlist,
    catalog: &CellCatalog,
    placement: &Placement,
    dims: Dimensions,
) -> Result<i64> {
    let lengths = estimate_wire_lengths(netlist, catalog, placement)?;
    let wire_length_penalty: i64 = lengths.values().sum();

    let occupied = compute_occupied(netlist, catalog, placement, dims)?;
    let overlap = overlap_penalty(&occupied) as i64;

    Ok(wire_length_penalty + overlap)
}

/// Deep-copy `placement`, pick one cell uniformly at random, and either
/// interchange its anchor with a second distinct cell's (with probability
/// `1 - 1/ratio`) or leave the placement untouched.
///
/// `method` must be `"displace"` or `"reorient"` — both are presently
/// no-ops upstream (see module docs); this port preserves that rather than
/// inventing motion semantics for either.
pub fn generate(
    placement: &Placement,
    method: &str,
    ratio: u32,
    rng: &mut impl Rng,
) -> Result<Placement> {
    if method != "displace" && method != "reorient" {
        return Err(PlacementError::InvalidMethod {
            method: method.to_string(),
        }
        .into());
    }

    let mut new_placement = placement.clone();
    if new_placement.is_empty() {
        return Ok(new_placement);
    }

    let index_a = rng.gen_range(0..new_placement.len());
    let interchange = rng.gen::<f64>() > (1.0 / ratio as f64);

    if interchange && new_placement.len() > 1 {
        let mut index_b = rng.gen_range(0..new_placement.len());
        while index_b == index_a {
            index_b = rng.gen_range(0..new_placement.len());
        }
        let anchor_a = new_placement[index_a].anchor;
        info!(
            "interchanging {} (at {}) with {} (at {})",
            new_placement[index_a].cell_name, anchor_a, new_placement[index_b].cell_name, new_placement[index_b].anchor
        );
        new_placement[index_a].anchor = new_placement[index_b].anchor;
        new_placement[index_b].anchor = anchor_a;
    } else {
        // TODO: the "displace" and "reorient" moves have no motion logic
        // upstream (the Python source's corresponding branches are bare
        // `pass` statements) — only interchange actually mutates a
        // placement today.
    }

    Ok(new_placement)
}

/// Stamp each cell's raw block ids into a fresh grid, replacing rather than
/// accumulating. Overlapping cells leave the later placement's blocks
/// winning at the shared voxels — an undefined-but-not-erroneous visual
/// result.
pub fn create_layout(dims: Dimensions, placement: &Placement, catalog: &CellCatalog) -> Result<Grid3<u8>> {
    let mut grid: Grid3<u8> = Grid3::new(dims);

    for (instance, entry) in placement.iter().enumerate() {
        let cell = catalog.get(&entry.cell_name, entry.rotation)?;
        for (coord, &block) in cell.blocks.iter() {
            let global = entry.anchor.offset(coord.y, coord.z, coord.x);
            let slot = grid.get_mut(global).ok_or_else(|| PlacementError::OutOfBoundsStamp {
                instance,
                cell_name: entry.cell_name.clone(),
            })?;
            *slot = block;
        }
    }

    Ok(grid)
}

/// The smallest sub-grid containing every non-zero voxel of `grid`. A grid
/// of all zeros shrinks to an empty `0x0x0` grid.
pub fn shrink_layout(grid: &Grid3<u8>) -> Grid3<u8> {
    let mut min = None::<Coord>;
    let mut max = None::<Coord>;

    for (coord, &block) in grid.iter() {
        if block == 0 {
            continue;
        }
        min = Some(match min {
            None => coord,
            Some(m) => Coord::new(m.y.min(coord.y), m.z.min(coord.z), m.x.min(coord.x)),
        });
        max = Some(match max {
            None => coord,
            Some(m) => Coord::new(m.y.max(coord.y), m.z.max(coord.z), m.x.max(coord.x)),
        });
    }

    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => return Grid3::new(Dimensions::new(0, 0, 0)),
    };

    let shrunk_dims = Dimensions::new(
        (max.y - min.y + 1) as u32,
        (max.z - min.z + 1) as u32,
        (max.x - min.x + 1) as u32,
    );
    let mut shrunk = Grid3::new(shrunk_dims);
    for y in 0..shrunk_dims.height as i32 {
        for z in 0..shrunk_dims.depth as i32 {
            for x in 0..shrunk_dims.width as i32 {
                let src = Coord::new(min.y + y, min.z + z, min.x + x);
                let dst = Coord::new(y, z, x);
                *shrunk.get_mut(dst).unwrap() = *grid.get(src).unwrap();
            }
        }
    }

    shrunk
}
