// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Imperium: a terrain-weighted territorial growth simulator.
//!
//! Empires expand outward from a capital cell, claiming territory in order
//! of accumulated travel cost over a 2D terrain grid. Growth is budgeted and
//! resumable, rival claims are resolved by lowest cost and then lowest
//! empire id, and a separate Dijkstra engine measures distance fields on
//! demand.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Session (boundary operations)   │
//! ├──────────────┬──────────┬───────────┤
//! │  GrowthEngine│ Distance │ Renderer  │
//! │  (frontiers) │ (Dijkstra│ (rayon)   │
//! ├──────────────┴──────────┴───────────┤
//! │  CostModel · OwnershipField         │
//! ├─────────────────────────────────────┤
//! │  TerrainGrid · ResourceGrid · Editor│
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use imperium::{Color, Coord, CostTable, EmpireSpec, Session};
//!
//! let mut session = Session::new("PPP\nPPP\nPPP\n").unwrap();
//! let spec = EmpireSpec {
//!     costs: Some(CostTable::uniform(10)),
//!     seed_budget: Some(0.0),
//!     ..EmpireSpec::new(1, Color::WHITE, Coord::new(1, 1))
//! };
//! session.place_capital(&spec).unwrap();
//! session.grow(40.0);
//!
//! assert_eq!(session.territory(1), Some(5));
//! assert_eq!(session.ownership().owner(Coord::new(0, 0)), None);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod render;
pub mod session;
pub mod sim;

pub use config::{EmpireSpec, Scenario, SimConfig};
pub use error::{
    ColorError, ConfigurationError, DecodeError, PlacementError, ScenarioError, SimError,
    UnknownEmpireError,
};
pub use grid::{Coord, ResourceGrid, ResourceType, TerrainGrid, TerrainType};
pub use render::{DistanceScale, PixelBuffer};
pub use session::Session;
pub use sim::{Color, CostModel, CostTable, DistanceField, Empire, EmpireId, GrowReport};
