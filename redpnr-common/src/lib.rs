//! Shared geometry and grid types used by the placer and the router.
//!
//! Every dense 3D array in this workspace is indexed `(y, z, x)` — height,
//! depth, width — and stored row-major in that order (`x` varies fastest),
//! per the data model's indexing convention.

pub mod block;
pub mod coord;
pub mod facing;
pub mod grid;

pub use block::{BlockCounts, BlockIds, BlockKind};
pub use coord::Coord;
pub use facing::Facing;
pub use grid::{Dimensions, Grid3};
