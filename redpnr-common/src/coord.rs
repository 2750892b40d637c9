use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A voxel address in the layout, `(y, z, x)` — vertical, depth, width.
///
/// Coordinates are signed because intermediate maze-router moves (e.g. a
/// `Down` via step) can momentarily land outside the grid before a bounds
/// check rejects them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub y: i32,
    pub z: i32,
    pub x: i32,
}

impl Coord {
    pub fn new(y: i32, z: i32, x: i32) -> Self {
        Self { y, z, x }
    }

    /// Manhattan (L1) distance between two coordinates.
    pub fn manhattan(self, other: Coord) -> i64 {
        (self.y - other.y).abs() as i64
            + (self.z - other.z).abs() as i64
            + (self.x - other.x).abs() as i64
    }

    pub fn offset(self, dy: i32, dz: i32, dx: i32) -> Coord {
        Coord::new(self.y + dy, self.z + dz, self.x + dx)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.y, self.z, self.x)
    }
}
