//! The netlist and placement data model.

use redpnr_common::Coord;
use std::collections::HashMap;

/// One instance from the input netlist: which cell it is, and how its pins
/// attach to nets.
#[derive(Clone, Debug, PartialEq)]
pub struct NetlistInstance {
    pub cell_name: String,
    pub pins: HashMap<String, String>,
}

pub type Netlist = Vec<NetlistInstance>;

/// One entry of a placement, aligned 1:1 with its netlist instance.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementEntry {
    pub cell_name: String,
    pub anchor: Coord,
    pub rotation: u8,
    pub pins: HashMap<String, String>,
}

pub type Placement = Vec<PlacementEntry>;
