//! Parses this CLI's own JSON input shape into the workspace's domain
//! types. This format is a convenience for driving the pipeline end to
//! end from the command line — it is not a real-world netlist or
//! cell-library format, just enough structure for this binary to load.

use anyhow::{Context, Result};
use redpnr_common::{Coord, Dimensions, Facing, Grid3};
use redpnr_placement::{LibraryCell, Netlist, NetlistInstance, Port};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Deserialize)]
struct NetlistInstanceInput {
    cell: String,
    pins: HashMap<String, String>,
}

#[derive(Deserialize)]
struct PortInput {
    coord: [i32; 3],
    facing: String,
}

#[derive(Deserialize)]
struct LibraryCellInput {
    dims: [u32; 3],
    /// Flattened `(y, z, x)` row-major, matching [`Grid3`]'s own storage
    /// order.
    blocks: Vec<u8>,
    ports: HashMap<String, PortInput>,
}

fn parse_facing(s: &str) -> Result<Facing> {
    match s {
        "N" | "North" => Ok(Facing::North),
        "S" | "South" => Ok(Facing::South),
        "E" | "East" => Ok(Facing::East),
        "W" | "West" => Ok(Facing::West),
        other => anyhow::bail!("unknown facing {:?}, expected one of N/S/E/W", other),
    }
}

fn parse_netlist(text: &str) -> Result<Netlist> {
    let raw: Vec<NetlistInstanceInput> = serde_json::from_str(text).context("parsing netlist JSON")?;
    Ok(raw
        .into_iter()
        .map(|i| NetlistInstance { cell_name: i.cell, pins: i.pins })
        .collect())
}

fn parse_library(text: &str) -> Result<HashMap<String, LibraryCell>> {
    let raw: HashMap<String, LibraryCellInput> = serde_json::from_str(text).context("parsing cell library JSON")?;

    raw.into_iter()
        .map(|(name, cell)| {
            let dims = Dimensions::new(cell.dims[0], cell.dims[1], cell.dims[2]);
            anyhow::ensure!(
                cell.blocks.len() == dims.volume(),
                "cell {:?}: blocks has {} entries, expected {} for dims {}",
                name,
                cell.blocks.len(),
                dims.volume(),
                dims
            );

            // Fill in storage order, matching Grid3's (y, z, x) layout.
            let mut blocks: Grid3<u8> = Grid3::new(dims);
            let mut idx = 0usize;
            for y in 0..dims.height as i32 {
                for z in 0..dims.depth as i32 {
                    for x in 0..dims.width as i32 {
                        *blocks.get_mut(Coord::new(y, z, x)).unwrap() = cell.blocks[idx];
                        idx += 1;
                    }
                }
            }

            let ports = cell
                .ports
                .into_iter()
                .map(|(pin_name, p)| -> Result<(String, Port)> {
                    let facing = parse_facing(&p.facing)?;
                    Ok((pin_name, Port { coord: Coord::new(p.coord[0], p.coord[1], p.coord[2]), facing }))
                })
                .collect::<Result<HashMap<_, _>>>()?;

            Ok((name, LibraryCell { blocks, ports }))
        })
        .collect()
}

pub fn load_netlist(path: &Path) -> Result<Netlist> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading netlist {:?}", path))?;
    parse_netlist(&text)
}

pub fn load_library(path: &Path) -> Result<HashMap<String, LibraryCell>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading cell library {:?}", path))?;
    parse_library(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_minimal_library() {
        let json = r#"{
            "AND": {
                "dims": [1, 1, 2],
                "blocks": [1, 1],
                "ports": {
                    "A": {"coord": [0, 0, 0], "facing": "W"}
                }
            }
        }"#;

        let library = parse_library(json).unwrap();
        let cell = &library["AND"];
        assert_eq!(cell.blocks.dims(), Dimensions::new(1, 1, 2));
        assert_eq!(cell.blocks.get(Coord::new(0, 0, 0)), Some(&1));
        assert_eq!(cell.ports["A"].facing, Facing::West);
    }

    #[test]
    fn rejects_mismatched_block_count() {
        let json = r#"{
            "BAD": {
                "dims": [1, 1, 2],
                "blocks": [1],
                "ports": {}
            }
        }"#;
        assert!(parse_library(json).is_err());
    }

    #[test]
    fn loads_a_netlist() {
        let json = r#"[
            {"cell": "AND", "pins": {"A": "a", "B": "b", "Y": "y"}}
        ]"#;
        let netlist = parse_netlist(json).unwrap();
        assert_eq!(netlist.len(), 1);
        assert_eq!(netlist[0].cell_name, "AND");
        assert_eq!(netlist[0].pins["Y"], "y");
    }

    #[test]
    fn rejects_unknown_facing() {
        let json = r#"{
            "BAD": {
                "dims": [1, 1, 1],
                "blocks": [1],
                "ports": {"A": {"coord": [0, 0, 0], "facing": "Up"}}
            }
        }"#;
        assert!(parse_library(json).is_err());
    }
}
