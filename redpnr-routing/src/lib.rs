//! Pin resolution, net segmentation, and the two routers (naive and maze)
//! that together turn a [`redpnr_placement::Placement`] into a converged
//! [`routing::Routing`].

pub mod error;
pub mod extract;
pub mod initial_router;
pub mod maze_router;
pub mod pin_resolver;
pub mod ripup;
pub mod routing;
pub mod segmenter;
pub mod serialize;
pub mod violation;

pub use error::RoutingError;
pub use extract::extract;
pub use pin_resolver::resolve_pins;
pub use ripup::{rip_up_and_reroute, RipUpConfig, RipUpOutcome};
pub use routing::{NetRouting, Routing, Segment};
pub use segmenter::segment_nets;
pub use serialize::{deserialize, serialize};
