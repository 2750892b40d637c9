//! Routing persistence: a routing serializes to two self-describing text
//! lines. `wire` and `violation` are stripped before serialization (they
//! are recomputable from `path` and `pins`) and rebuilt on deserialize.

use crate::routing::{NetRouting, Routing, Segment};
use crate::violation::net_to_wire_and_violation;
use anyhow::{Context, Result};
use redpnr_common::{BlockIds, Coord, Dimensions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize)]
struct SerializedSegment {
    pins: (Coord, Coord),
    net: Vec<Coord>,
}

#[derive(Serialize, Deserialize)]
struct SerializedNet {
    pins: Vec<Coord>,
    segments: Vec<SerializedSegment>,
}

type SerializedRouting = HashMap<String, SerializedNet>;

/// Two lines: the routing with `wire`/`violation` stripped, then the
/// layout's `Dimensions`.
pub fn serialize(routing: &Routing, dims: Dimensions) -> Result<String> {
    let stripped: SerializedRouting = routing
        .iter()
        .map(|(net_name, net_routing)| {
            let segments = net_routing
                .segments
                .iter()
                .map(|segment| SerializedSegment { pins: segment.pins, net: segment.path.clone() })
                .collect();
            (net_name.clone(), SerializedNet { pins: net_routing.pins.clone(), segments })
        })
        .collect();

    let routing_line = serde_json::to_string(&stripped).context("serializing routing")?;
    let dims_line = serde_json::to_string(&dims).context("serializing dimensions")?;
    Ok(format!("{routing_line}\n{dims_line}"))
}

/// Parses the two-line form `serialize` produces, reconstructing `wire`
/// and `violation` for every segment from its path and pins via the
/// violation model.
pub fn deserialize(text: &str, ids: BlockIds) -> Result<(Routing, Dimensions)> {
    let mut lines = text.lines();
    let routing_line = lines.next().context("missing routing line")?;
    let dims_line = lines.next().context("missing dimensions line")?;

    let stripped: SerializedRouting = serde_json::from_str(routing_line).context("parsing routing")?;
    let dims: Dimensions = serde_json::from_str(dims_line).context("parsing dimensions")?;

    let routing: Routing = stripped
        .into_iter()
        .map(|(net_name, net)| {
            let segments = net
                .segments
                .into_iter()
                .map(|s| {
                    let (wire, violation) = net_to_wire_and_violation(&s.net, dims, &[s.pins.0, s.pins.1], ids);
                    Segment { pins: s.pins, path: s.net, wire, violation }
                })
                .collect();
            (net_name, NetRouting { pins: net.pins, segments })
        })
        .collect();

    Ok((routing, dims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial_router::dumb_route;

    const IDS: BlockIds = BlockIds { conductor: 55, substrate: 1 };

    fn sample_routing(dims: Dimensions) -> Routing {
        let mut routing = Routing::new();

        let a1 = Coord::new(0, 0, 0);
        let b1 = Coord::new(0, 0, 5);
        let path1 = dumb_route(a1, b1);
        let (wire1, violation1) = net_to_wire_and_violation(&path1, dims, &[a1, b1], IDS);

        let a2 = Coord::new(0, 2, 0);
        let b2 = Coord::new(0, 2, 3);
        let path2 = dumb_route(a2, b2);
        let (wire2, violation2) = net_to_wire_and_violation(&path2, dims, &[a2, b2], IDS);

        let a3 = Coord::new(1, 0, 0);
        let b3 = Coord::new(1, 0, 2);
        let path3 = dumb_route(a3, b3);
        let (wire3, violation3) = net_to_wire_and_violation(&path3, dims, &[a3, b3], IDS);

        routing.insert(
            "net_a".to_string(),
            NetRouting {
                pins: vec![a1, b1],
                segments: vec![Segment { pins: (a1, b1), path: path1, wire: wire1, violation: violation1 }],
            },
        );
        routing.insert(
            "net_b".to_string(),
            NetRouting {
                pins: vec![a2, b2, a3],
                segments: vec![
                    Segment { pins: (a2, b2), path: path2, wire: wire2, violation: violation2 },
                    Segment { pins: (a3, b3), path: path3, wire: wire3, violation: violation3 },
                ],
            },
        );

        routing
    }

    /// A routing with multiple nets and segments round-trips through
    /// serialize/deserialize with its wire and violation grids intact.
    #[test]
    fn multi_segment_routing_round_trips_through_text() {
        let dims = Dimensions::new(3, 5, 8);
        let routing = sample_routing(dims);

        let text = serialize(&routing, dims).unwrap();
        assert_eq!(text.lines().count(), 2);

        let (restored, restored_dims) = deserialize(&text, IDS).unwrap();
        assert_eq!(restored_dims, dims);
        assert_eq!(restored.len(), routing.len());

        for (net_name, net_routing) in &routing {
            let restored_net = &restored[net_name];
            assert_eq!(restored_net.pins, net_routing.pins);
            assert_eq!(restored_net.segments.len(), net_routing.segments.len());
            for (original, restored_segment) in net_routing.segments.iter().zip(&restored_net.segments) {
                assert_eq!(restored_segment.pins, original.pins);
                assert_eq!(restored_segment.path, original.path);
                assert_eq!(restored_segment.wire, original.wire);
                assert_eq!(restored_segment.violation, original.violation);
            }
        }
    }

    #[test]
    fn serialized_form_omits_wire_and_violation() {
        let dims = Dimensions::new(3, 5, 8);
        let routing = sample_routing(dims);
        let text = serialize(&routing, dims).unwrap();
        let routing_line = text.lines().next().unwrap();
        assert!(!routing_line.contains("wire"));
        assert!(!routing_line.contains("violation"));
    }
}
