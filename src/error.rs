//! Error types for the simulator.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::{Coord, TerrainType};
use crate::sim::EmpireId;

/// Failure to build a grid from map text or from explicit dimensions.
///
/// Fatal to session creation: no partial session is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input contained no rows, or a dimension was zero.
    #[error("map is empty")]
    EmptyInput,
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The cell count exceeds [`crate::grid::MAX_CELLS`].
    #[error("map of {width}x{height} exceeds the {max} cell limit")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Maximum number of cells allowed.
        max: usize,
    },
    /// A secondary layer does not match the terrain layer's shape.
    #[error("layer is {found_width}x{found_height}, expected {width}x{height}")]
    ShapeMismatch {
        /// Expected width.
        width: u32,
        /// Expected height.
        height: u32,
        /// Width that was found.
        found_width: u32,
        /// Height that was found.
        found_height: u32,
    },
}

/// Rejected capital placement. State is unchanged when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The target cell already belongs to an empire.
    #[error("cell ({}, {}) is already owned by empire {owner}", .coord.x, .coord.y)]
    CellOccupied {
        /// Target cell.
        coord: Coord,
        /// Current owner of the cell.
        owner: EmpireId,
    },
    /// The target cell lies outside the grid.
    #[error("cell ({}, {}) is outside the map", .coord.x, .coord.y)]
    OutOfBounds {
        /// Target cell.
        coord: Coord,
    },
    /// The empire has already placed its capital.
    #[error("empire {0} already has a capital")]
    AlreadyPlaced(EmpireId),
}

/// An operation named an empire that is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown empire {0}")]
pub struct UnknownEmpireError(pub EmpireId);

/// Invalid cost model configuration, rejected before any growth happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A terrain was configured with a zero cost.
    #[error("cost for {terrain:?} must be positive")]
    NonPositiveCost {
        /// Terrain with the bad entry.
        terrain: TerrainType,
    },
}

/// Malformed `#RRGGBB` colour string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour {0:?}, expected #RRGGBB")]
pub struct ColorError(pub String);

/// Any failure raised by a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// Map or layer decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Capital placement was rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The named empire is not registered.
    #[error(transparent)]
    UnknownEmpire(#[from] UnknownEmpireError),
    /// A cost table was invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Failure to load a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Scenario path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid scenario.
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
}
