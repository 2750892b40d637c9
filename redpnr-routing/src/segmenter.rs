//! Net segmentation: Kruskal's MST over each net's pins.

use itertools::Itertools;
use redpnr_common::Coord;
use std::collections::HashMap;

/// For every net with two or more pins, the edges of a minimum spanning
/// tree over its pins (Manhattan-distance weights, ties broken by
/// enumeration order). Nets with fewer than two pins are omitted — there
/// is nothing to route.
pub fn segment_nets(pins: &HashMap<String, Vec<Coord>>) -> HashMap<String, Vec<(Coord, Coord)>> {
    let mut segments = HashMap::new();
    for (net, net_pins) in pins {
        if net_pins.len() < 2 {
            continue;
        }
        segments.insert(net.clone(), minimum_spanning_tree(net_pins));
    }
    segments
}

/// Kruskal's MST over the complete graph on `pins`, using a union-find
/// over pin indices. Enumeration order is the order pins appear in, which
/// both breaks weight ties deterministically and matches how the edges
/// are visited.
fn minimum_spanning_tree(pins: &[Coord]) -> Vec<(Coord, Coord)> {
    let n = pins.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            parent[i] = find(parent, parent[i]);
        }
        parent[i]
    }

    let mut edges: Vec<(i64, usize, usize)> = (0..n)
        .tuple_combinations()
        .map(|(i, j)| (pins[i].manhattan(pins[j]), i, j))
        .collect();
    edges.sort_by_key(|&(w, i, j)| (w, i, j));

    let mut tree = Vec::new();
    for (_, i, j) in edges {
        let ri = find(&mut parent, i);
        let rj = find(&mut parent, j);
        if ri != rj {
            parent[ri] = rj;
            tree.push((pins[i], pins[j]));
        }
    }

    tree
}
