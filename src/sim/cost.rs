//! Terrain traversal costs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::grid::TerrainType;

/// Cost used for any terrain without an explicit entry.
///
/// Very expensive but finite: frontier candidates behind such cells are
/// still processed eventually.
pub const UNCONFIGURED_COST: u32 = 999;

/// Multiplier applied when entering open water from any other terrain.
pub const WATER_TRANSITION_MULTIPLIER: f64 = 3.0;

/// Per-terrain costs as written in scenario files. Absent entries fall
/// back to [`UNCONFIGURED_COST`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    /// Cost of unrecognised terrain.
    pub unknown: Option<u32>,
    /// Cost of open water.
    pub water: Option<u32>,
    /// Cost of river cells.
    pub river: Option<u32>,
    /// Cost of plains.
    pub plain: Option<u32>,
    /// Cost of mountains.
    pub mountain: Option<u32>,
    /// Cost of desert.
    pub desert: Option<u32>,
    /// Cost of forest.
    pub forest: Option<u32>,
    /// Cost of ice.
    pub ice: Option<u32>,
}

impl CostTable {
    /// The default settings new empires start with.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            unknown: None,
            water: Some(25),
            river: Some(10),
            plain: Some(15),
            mountain: Some(80),
            desert: Some(60),
            forest: Some(20),
            ice: Some(100),
        }
    }

    /// Same cost on every authored terrain; `Unknown` stays unconfigured.
    #[must_use]
    pub const fn uniform(cost: u32) -> Self {
        Self {
            unknown: None,
            water: Some(cost),
            river: Some(cost),
            plain: Some(cost),
            mountain: Some(cost),
            desert: Some(cost),
            forest: Some(cost),
            ice: Some(cost),
        }
    }

    /// Configured cost for a terrain, if any.
    #[must_use]
    pub const fn get(&self, terrain: TerrainType) -> Option<u32> {
        match terrain {
            TerrainType::Unknown => self.unknown,
            TerrainType::Water => self.water,
            TerrainType::River => self.river,
            TerrainType::Plain => self.plain,
            TerrainType::Mountain => self.mountain,
            TerrainType::Desert => self.desert,
            TerrainType::Forest => self.forest,
            TerrainType::Ice => self.ice,
        }
    }

    /// Return a copy with one entry replaced.
    #[must_use]
    pub fn with(mut self, terrain: TerrainType, cost: u32) -> Self {
        let slot = match terrain {
            TerrainType::Unknown => &mut self.unknown,
            TerrainType::Water => &mut self.water,
            TerrainType::River => &mut self.river,
            TerrainType::Plain => &mut self.plain,
            TerrainType::Mountain => &mut self.mountain,
            TerrainType::Desert => &mut self.desert,
            TerrainType::Forest => &mut self.forest,
            TerrainType::Ice => &mut self.ice,
        };
        *slot = Some(cost);
        self
    }
}

/// Validated costs, indexed by [`TerrainType::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    costs: [f64; TerrainType::COUNT],
}

impl CostModel {
    /// Freeze a table into a cost model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonPositiveCost`] for any zero entry.
    pub fn new(table: &CostTable) -> Result<Self, ConfigurationError> {
        let mut costs = [f64::from(UNCONFIGURED_COST); TerrainType::COUNT];
        for terrain in TerrainType::ALL {
            if let Some(cost) = table.get(terrain) {
                if cost == 0 {
                    return Err(ConfigurationError::NonPositiveCost { terrain });
                }
                costs[terrain.index()] = f64::from(cost);
            }
        }
        Ok(Self { costs })
    }

    /// Configured cost of a terrain, before any transition penalty.
    #[must_use]
    #[inline]
    pub fn base(&self, terrain: TerrainType) -> f64 {
        self.costs[terrain.index()]
    }

    /// Cost of stepping onto `terrain` from a cell of `from`.
    ///
    /// Entering open water from land is multiplied by
    /// [`WATER_TRANSITION_MULTIPLIER`]; moving water to water is not.
    #[must_use]
    #[inline]
    pub fn cost(&self, terrain: TerrainType, from: TerrainType) -> f64 {
        let base = self.base(terrain);
        if terrain.is_water() && !from.is_water() {
            base * WATER_TRANSITION_MULTIPLIER
        } else {
            base
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            costs: [f64::from(UNCONFIGURED_COST); TerrainType::COUNT],
        }
    }
}
