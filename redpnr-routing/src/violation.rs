//! The violation model: what a path occupies, and what it disturbs.

use redpnr_common::{BlockIds, Coord, Dimensions, Grid3};

const VIOLATION_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// From a realized path, derive the voxels it physically occupies (`wire`:
/// conductor on the path, substrate directly beneath) and the voxels its
/// emission would disturb (`violation`), excluding the segment's own pins
/// and its own wire/substrate.
pub fn net_to_wire_and_violation(
    path: &[Coord],
    dims: Dimensions,
    pins: &[Coord],
    ids: BlockIds,
) -> (Grid3<u8>, Grid3<bool>) {
    let mut wire: Grid3<u8> = Grid3::new(dims);
    let mut violation: Grid3<bool> = Grid3::new(dims);

    for &coord in path {
        if let Some(slot) = wire.get_mut(coord) {
            *slot = ids.conductor;
        }
        if let Some(slot) = wire.get_mut(coord.offset(-1, 0, 0)) {
            *slot = ids.substrate;
        }

        if pins.contains(&coord) {
            continue;
        }

        for dy in [0, -1] {
            for (dz, dx) in VIOLATION_DIRECTIONS {
                let neighbor = coord.offset(dy, dz, dx);
                if let Some(slot) = violation.get_mut(neighbor) {
                    *slot = true;
                }
            }
        }
    }

    // A segment never violates itself.
    for &coord in path {
        if let Some(slot) = violation.get_mut(coord) {
            *slot = false;
        }
        if let Some(slot) = violation.get_mut(coord.offset(-1, 0, 0)) {
            *slot = false;
        }
    }

    (wire, violation)
}

/// The number of voxels where `violation` and `usage` are both true.
pub fn violations(violation: &Grid3<bool>, usage: &Grid3<bool>) -> u64 {
    violation
        .iter()
        .filter(|(coord, &v)| v && usage.get(*coord).copied().unwrap_or(false))
        .count() as u64
}
