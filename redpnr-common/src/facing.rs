use serde::{Deserialize, Serialize};

/// The direction a port faces, in the cell's local frame. Only the four
/// planar directions occur on ports — vias (`Up`/`Down`) are a routing
/// concept, not a cell-library one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    /// How a port's facing transforms under `Cell::rot90`'s 90-degree yaw
    /// rotation. The coordinate transform `(y, z, x) -> (y, x, D-1-z)`
    /// carries direction vector `(dz, dx) -> (dx, -dz)`, which works out to
    /// the cycle North -> East -> South -> West -> North.
    pub fn rot90(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_rotations_is_identity() {
        for f in [Facing::North, Facing::South, Facing::East, Facing::West] {
            let rotated = f.rot90().rot90().rot90().rot90();
            assert_eq!(f, rotated);
        }
    }
}
