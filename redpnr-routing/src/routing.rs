//! The routing data model.

use redpnr_common::{Coord, Grid3};
use std::collections::HashMap;

/// One edge of a net's MST: the two endpoints it connects, the realized
/// path between them, and the wire/violation grids derived from that path.
#[derive(Clone, Debug)]
pub struct Segment {
    pub pins: (Coord, Coord),
    /// Ordered voxels of the redstone/wire proper.
    pub path: Vec<Coord>,
    /// Wire + substrate voxels, same shape as the layout.
    pub wire: Grid3<u8>,
    /// Voxels where this segment's emissions would conflict with foreign
    /// material.
    pub violation: Grid3<bool>,
}

/// A single net's resolved pins and its MST decomposition into segments.
#[derive(Clone, Debug)]
pub struct NetRouting {
    pub pins: Vec<Coord>,
    pub segments: Vec<Segment>,
}

/// The whole design's routing: one [`NetRouting`] per net that had two or
/// more pins.
pub type Routing = HashMap<String, NetRouting>;
