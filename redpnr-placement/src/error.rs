use std::fmt::{self, Display, Formatter};

/// Errors raised synchronously by placement operations. Fatal to the
/// operation that raised them — none of these are retried.
#[derive(Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// A caller-supplied `dims` triple was not a 3-tuple.
    InvalidDimensions,
    /// `Placer::generate` was called with a method other than `"displace"`
    /// or `"reorient"`.
    InvalidMethod { method: String },
    /// A placement (or netlist) referenced a cell-name absent from the
    /// catalog.
    UnknownCell { name: String },
    /// A placement's anchor plus its cell's shape exceeds the layout
    /// dimensions. The source implementation this is ported from does not
    /// check for this; this port does and surfaces it rather than silently
    /// stamping out of bounds.
    OutOfBoundsStamp {
        instance: usize,
        cell_name: String,
    },
}

impl Display for PlacementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions => write!(f, "dimensions must be a 3-tuple (height, depth, width)"),
            Self::InvalidMethod { method } => {
                write!(f, "generate: method must be \"displace\" or \"reorient\", got {:?}", method)
            }
            Self::UnknownCell { name } => write!(f, "unknown cell {:?}", name),
            Self::OutOfBoundsStamp { instance, cell_name } => write!(
                f,
                "placement of instance {} (cell {:?}) exceeds layout dimensions",
                instance, cell_name
            ),
        }
    }
}

impl std::error::Error for PlacementError {}
