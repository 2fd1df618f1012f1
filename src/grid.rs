//! Terrain and resource grids.
//!
//! Every layer is a flat, row-major array indexed by `y * width + x`. The
//! terrain layer and the resource layer always share one shape, and so do
//! the ownership and distance fields built on top of them.

mod coord;
mod layer;
mod resource;
mod terrain;

pub use coord::Coord;
pub use layer::{CellCode, Grid, ResourceGrid, TerrainGrid};
pub use resource::ResourceType;
pub use terrain::TerrainType;

/// Largest map accepted, in cells.
pub const MAX_CELLS: usize = 4_000_000;
