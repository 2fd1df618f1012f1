//! Simulation defaults and JSON scenario files.
//!
//! A scenario lists the empires to place on a map:
//!
//! ```json
//! {
//!   "config": { "seed_budget": 500 },
//!   "empires": [
//!     { "id": 1, "name": "Aurelia", "color": "#C03030", "capital": { "x": 4, "y": 7 } },
//!     { "id": 2, "name": "Borea", "color": "#3050C0", "capital": { "x": 30, "y": 12 },
//!       "costs": { "plain": 10, "forest": 12 }, "seed_budget": 800 }
//!   ]
//! }
//! ```
//!
//! Anything left out falls back to [`SimConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::grid::Coord;
use crate::sim::{Color, CostTable, EmpireId};

/// Growth budget an empire spends right after placement.
pub const DEFAULT_SEED_BUDGET: f64 = 2000.0;

/// Session-wide defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Costs for empires that do not bring their own table.
    pub default_costs: CostTable,
    /// Seed budget for empires that do not specify one.
    pub seed_budget: f64,
    /// Display aspect ratio applied to editor brushes.
    pub brush_aspect_ratio: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_costs: CostTable::standard(),
            seed_budget: DEFAULT_SEED_BUDGET,
            brush_aspect_ratio: 1.0,
        }
    }
}

/// One empire to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpireSpec {
    /// Unique id.
    pub id: EmpireId,
    /// Display name; defaults to `Empire <id>`.
    #[serde(default)]
    pub name: Option<String>,
    /// Territory colour as `#RRGGBB`.
    pub color: Color,
    /// Capital cell.
    pub capital: Coord,
    /// Cost table; defaults to [`SimConfig::default_costs`].
    #[serde(default)]
    pub costs: Option<CostTable>,
    /// Seed budget; defaults to [`SimConfig::seed_budget`].
    #[serde(default)]
    pub seed_budget: Option<f64>,
}

impl EmpireSpec {
    /// A spec using every default.
    #[must_use]
    pub fn new(id: EmpireId, color: Color, capital: Coord) -> Self {
        Self {
            id,
            name: None,
            color,
            capital,
            costs: None,
            seed_budget: None,
        }
    }

    /// Name to display.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Empire {}", self.id))
    }
}

/// Config plus the empires to place, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Session defaults.
    #[serde(default)]
    pub config: SimConfig,
    /// Empires in placement order.
    #[serde(default)]
    pub empires: Vec<EmpireSpec>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] for malformed JSON or colours.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Read`] if the file cannot be read and
    /// [`ScenarioError::Parse`] if it is not a valid scenario.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}
