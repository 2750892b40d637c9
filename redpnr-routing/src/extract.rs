//! Downstream materialization: stamps a routing's wire paths onto a
//! placed layout using the two hardcoded substrate-Y-level rules from
//! the source. This is domain-constant plumbing — callers that don't
//! need a concrete block rendering can ignore it entirely.

use crate::routing::Routing;
use redpnr_common::Grid3;

const CONDUCTOR: u8 = 55;
const SUBSTRATE_BELOW_Y4: u8 = 5;
const SUBSTRATE_BELOW_Y1: u8 = 1;

/// Copies `placed_layout` and stamps every segment's path voxels onto it:
/// conductor at the path voxel itself, and — only at the two specific
/// Y-levels the source hardcodes — a substrate block directly beneath.
/// Paths at any other Y-level get no substrate stamp; this mirrors the
/// source exactly rather than generalizing it.
pub fn extract(routing: &Routing, placed_layout: &Grid3<u8>) -> Grid3<u8> {
    let mut routed_layout = placed_layout.clone();

    for net_routing in routing.values() {
        for segment in &net_routing.segments {
            for &coord in &segment.path {
                if let Some(slot) = routed_layout.get_mut(coord) {
                    *slot = CONDUCTOR;
                }

                let below = coord.offset(-1, 0, 0);
                let substrate = match coord.y {
                    4 => Some(SUBSTRATE_BELOW_Y4),
                    1 => Some(SUBSTRATE_BELOW_Y1),
                    _ => None,
                };
                if let Some(substrate) = substrate {
                    if let Some(slot) = routed_layout.get_mut(below) {
                        *slot = substrate;
                    }
                }
            }
        }
    }

    routed_layout
}
