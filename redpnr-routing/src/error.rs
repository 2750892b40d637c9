use redpnr_common::Coord;
use std::fmt::{self, Display, Formatter};

/// Errors raised by routing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The maze router found no path between two endpoints. Not fatal to
    /// the rip-up loop: the offending segment keeps its previous path and
    /// the loop continues.
    UnreachableEndpoints { a: Coord, b: Coord },
}

impl Display for RoutingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreachableEndpoints { a, b } => {
                write!(f, "no path found between {} and {}", a, b)
            }
        }
    }
}

impl std::error::Error for RoutingError {}
