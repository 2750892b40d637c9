//! The initial router: a naive, single-Y-layer L-shaped path.

use redpnr_common::Coord;

/// Route `a` to `b` on one Y layer, walking X first (at `a`'s Y and Z),
/// then Z (at `b`'s X). `b`'s Y is ignored — the path always starts on
/// `a`'s plane; bridging a Y gap is left to the maze router during rip-up.
pub fn dumb_route(a: Coord, b: Coord) -> Vec<Coord> {
    let mut path = Vec::new();

    let (x_lo, x_hi) = (a.x.min(b.x), a.x.max(b.x));
    for x in x_lo..=x_hi {
        path.push(Coord::new(a.y, a.z, x));
    }

    let (z_lo, z_hi) = (a.z.min(b.z), a.z.max(b.z));
    for z in z_lo..=z_hi {
        path.push(Coord::new(a.y, z, b.x));
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// For a, b with ay == by, path length is |ax-bx| + |az-bz| + 1.
    #[test]
    fn dumb_route_length() {
        let a = Coord::new(0, 2, 3);
        let b = Coord::new(0, 7, 9);
        let path = dumb_route(a, b);
        assert_eq!(path.len() as i32, (a.x - b.x).abs() + (a.z - b.z).abs() + 1);
    }

    #[test]
    fn dumb_route_starts_and_ends_at_pins() {
        let a = Coord::new(1, 0, 0);
        let b = Coord::new(3, 4, 4);
        let path = dumb_route(a, b);
        assert_eq!(path.first(), Some(&Coord::new(1, 0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(1, 4, 4)));
        // by is ignored: the whole path lies on ay's plane.
        assert!(path.iter().all(|c| c.y == a.y));
    }

    #[test]
    fn corner_appears_once() {
        let a = Coord::new(0, 0, 0);
        let b = Coord::new(0, 3, 3);
        let path = dumb_route(a, b);
        let corner = Coord::new(0, 0, 3);
        assert_eq!(path.iter().filter(|&&c| c == corner).count(), 1);
    }
}
