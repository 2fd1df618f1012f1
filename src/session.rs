//! The simulation session: one map, its empires and every operation the
//! surrounding UI calls into.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::info;

use crate::config::{EmpireSpec, Scenario, SimConfig};
use crate::editor::{self, Brush};
use crate::error::{DecodeError, SimError, UnknownEmpireError};
use crate::grid::{Coord, ResourceGrid, ResourceType, TerrainGrid, TerrainType};
use crate::render::{self, CapitalMarker, DistanceScale, PixelBuffer};
use crate::sim::{
    Color, CostModel, CostTable, DistanceField, Empire, EmpireId, GrowReport, GrowthEngine,
    OwnershipField,
};

/// Arm length of capital markers drawn by [`Session::capital_markers`].
const CAPITAL_MARKER_SIZE: u32 = 1;

/// One active map and everything simulated on it.
#[derive(Debug, Clone)]
pub struct Session {
    config: SimConfig,
    terrain: TerrainGrid,
    resources: ResourceGrid,
    engine: GrowthEngine,
    distance: Option<DistanceField>,
}

impl Session {
    /// Start a session from map text with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the map text is invalid; no session is
    /// created.
    pub fn new(map_text: &str) -> Result<Self, DecodeError> {
        Self::with_config(map_text, SimConfig::default())
    }

    /// Start a session from map text.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the map text is invalid.
    pub fn with_config(map_text: &str, config: SimConfig) -> Result<Self, DecodeError> {
        let terrain = TerrainGrid::decode(map_text)?;
        Self::from_terrain(terrain, config)
    }

    /// Start a session from an already built terrain grid.
    ///
    /// # Errors
    ///
    /// Cannot fail for a valid grid; kept fallible for the resource layer
    /// allocation.
    pub fn from_terrain(terrain: TerrainGrid, config: SimConfig) -> Result<Self, DecodeError> {
        let resources = ResourceGrid::new(terrain.width(), terrain.height())?;
        let engine = GrowthEngine::new(&terrain);
        info!(
            target: "imperium::session",
            width = terrain.width(),
            height = terrain.height(),
            "session created"
        );
        Ok(Self {
            config,
            terrain,
            resources,
            engine,
            distance: None,
        })
    }

    /// Session defaults.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Terrain layer.
    #[must_use]
    pub const fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    /// Resource layer.
    #[must_use]
    pub const fn resources(&self) -> &ResourceGrid {
        &self.resources
    }

    /// The growth engine holding ownership and empires.
    #[must_use]
    pub const fn engine(&self) -> &GrowthEngine {
        &self.engine
    }

    /// Current ownership.
    #[must_use]
    pub fn ownership(&self) -> &OwnershipField {
        self.engine.ownership()
    }

    /// Look up a placed empire.
    #[must_use]
    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.engine.empire(id)
    }

    /// All placed empires in ascending id order.
    pub fn empires(&self) -> impl Iterator<Item = &Empire> {
        self.engine.empires()
    }

    /// Cells owned by an empire.
    #[must_use]
    pub fn territory(&self, id: EmpireId) -> Option<usize> {
        self.engine.territory(id)
    }

    /// The most recent distance field, if one was computed.
    #[must_use]
    pub const fn distance_field(&self) -> Option<&DistanceField> {
        self.distance.as_ref()
    }

    /// Replace the resource layer with one decoded from text.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ShapeMismatch`] when the layer's shape differs
    /// from the terrain, or any decoding error. The old layer is kept.
    pub fn load_resources(&mut self, text: &str) -> Result<(), DecodeError> {
        let resources = ResourceGrid::decode(text)?;
        if !resources.same_shape(&self.terrain) {
            return Err(DecodeError::ShapeMismatch {
                width: self.terrain.width(),
                height: self.terrain.height(),
                found_width: resources.width(),
                found_height: resources.height(),
            });
        }
        self.resources = resources;
        Ok(())
    }

    /// Register an empire and place its capital, then grow it by its seed
    /// budget.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] for an invalid cost table and
    /// [`SimError::Placement`] when the capital cannot be placed. State is
    /// unchanged on error.
    pub fn place_capital(&mut self, spec: &EmpireSpec) -> Result<GrowReport, SimError> {
        let table = spec.costs.unwrap_or(self.config.default_costs);
        let costs = CostModel::new(&table)?;
        let seed = spec.seed_budget.unwrap_or(self.config.seed_budget);
        let empire = Empire::new(spec.id, spec.display_name(), spec.color, costs);
        Ok(self
            .engine
            .place_capital(&self.terrain, empire, spec.capital, seed)?)
    }

    /// Place every empire of a scenario in order, adopting its config.
    ///
    /// # Errors
    ///
    /// Stops at the first empire that cannot be placed. Empires placed
    /// before it stay placed.
    pub fn apply_scenario(&mut self, scenario: &Scenario) -> Result<Vec<GrowReport>, SimError> {
        self.config = scenario.config;
        scenario
            .empires
            .iter()
            .map(|spec| self.place_capital(spec))
            .collect()
    }

    /// Remove an empire and revert its cells to unowned.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn delete_empire(&mut self, id: EmpireId) -> Result<usize, UnknownEmpireError> {
        self.engine.delete_empire(id)
    }

    /// Change an empire's colour.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn set_empire_color(&mut self, id: EmpireId, color: Color) -> Result<(), UnknownEmpireError> {
        self.engine.set_color(id, color)
    }

    /// Replace an empire's cost table for future expansion.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] for an invalid table and
    /// [`SimError::UnknownEmpire`] if the empire is not placed.
    pub fn set_empire_costs(&mut self, id: EmpireId, table: &CostTable) -> Result<(), SimError> {
        let costs = CostModel::new(table)?;
        Ok(self.engine.set_costs(id, costs)?)
    }

    /// Advance every living empire by `budget` cost-units.
    pub fn grow(&mut self, budget: f64) -> GrowReport {
        self.engine.grow(&self.terrain, budget)
    }

    /// Advance one empire.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn grow_empire(&mut self, id: EmpireId, budget: f64) -> Result<GrowReport, UnknownEmpireError> {
        self.engine.grow_empire(&self.terrain, id, budget)
    }

    /// Compute a distance field from `source`.
    ///
    /// Costs come from `costs` when given, otherwise from the empire's own
    /// model, otherwise from the session default table.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Configuration`] for an invalid table and
    /// [`SimError::UnknownEmpire`] when `empire` is needed but not placed.
    pub fn compute_distance(
        &mut self,
        source: Coord,
        empire: Option<EmpireId>,
        costs: Option<&CostTable>,
    ) -> Result<&DistanceField, SimError> {
        let model = match (costs, empire) {
            (Some(table), _) => CostModel::new(table)?,
            (None, Some(id)) => {
                self.engine
                    .empire(id)
                    .ok_or(UnknownEmpireError(id))?
                    .costs
            }
            (None, None) => CostModel::new(&self.config.default_costs)?,
        };
        let field = DistanceField::compute(&self.terrain, source, &model, empire);
        Ok(self.distance.insert(field))
    }

    /// Render the terrain layer.
    #[must_use]
    pub fn render_terrain(&self) -> PixelBuffer {
        render::render_terrain(&self.terrain)
    }

    /// Render territory in empire colours.
    #[must_use]
    pub fn render_ownership(&self) -> PixelBuffer {
        let colors: BTreeMap<EmpireId, Color> = self
            .engine
            .empires()
            .map(|empire| (empire.id, empire.color))
            .collect();
        render::render_ownership(self.engine.ownership(), &colors)
    }

    /// Render the last distance field, `None` if none was computed.
    #[must_use]
    pub fn render_distance(&self, scale: DistanceScale) -> Option<PixelBuffer> {
        self.distance
            .as_ref()
            .map(|field| render::render_distance(field, scale))
    }

    /// Render the resource layer.
    #[must_use]
    pub fn render_resources(&self) -> PixelBuffer {
        render::render_resources(&self.resources)
    }

    /// Markers for every living empire's capital.
    #[must_use]
    pub fn capital_markers(&self) -> Vec<CapitalMarker> {
        self.engine
            .empires()
            .filter(|empire| empire.alive)
            .filter_map(|empire| {
                empire.capital.map(|coord| CapitalMarker {
                    coord,
                    color: empire.color,
                    size: CAPITAL_MARKER_SIZE,
                })
            })
            .collect()
    }

    /// Paint terrain with the session's brush aspect ratio. Ownership is
    /// left as it is.
    pub fn paint_terrain(&mut self, center: Coord, diameter: f64, terrain: TerrainType) -> usize {
        let brush = self.brush(diameter);
        editor::paint_terrain(&mut self.terrain, center, brush, terrain)
    }

    /// Paint resources with the session's brush aspect ratio.
    pub fn paint_resource(&mut self, center: Coord, diameter: f64, resource: ResourceType) -> usize {
        let brush = self.brush(diameter);
        editor::paint_resource(&mut self.resources, center, brush, resource)
    }

    /// Discard the map and start a blank all-water canvas. Every empire and
    /// the distance field are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for invalid dimensions; the session is
    /// unchanged.
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> Result<(), DecodeError> {
        let (terrain, resources) = editor::resize_canvas(width, height)?;
        self.engine = GrowthEngine::new(&terrain);
        self.terrain = terrain;
        self.resources = resources;
        self.distance = None;
        Ok(())
    }

    /// Terrain layer as map text.
    #[must_use]
    pub fn export_terrain_text(&self) -> String {
        self.terrain.encode()
    }

    /// Resource layer as text.
    #[must_use]
    pub fn export_resource_text(&self) -> String {
        self.resources.encode()
    }

    /// Total value of the resources on an empire's cells.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn resource_value(&self, id: EmpireId) -> Result<u64, UnknownEmpireError> {
        if self.engine.empire(id).is_none() {
            return Err(UnknownEmpireError(id));
        }
        Ok(self
            .engine
            .ownership()
            .owners()
            .par_iter()
            .zip(self.resources.cells().par_iter())
            .filter(|(owner, _)| **owner == Some(id))
            .map(|(_, resource)| u64::from(resource.value()))
            .sum())
    }

    const fn brush(&self, diameter: f64) -> Brush {
        Brush {
            diameter,
            aspect_ratio: self.config.brush_aspect_ratio,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::PlacementError;

    fn spec(id: EmpireId, x: u32, y: u32) -> EmpireSpec {
        EmpireSpec {
            costs: Some(CostTable::uniform(10)),
            seed_budget: Some(0.0),
            ..EmpireSpec::new(id, Color::from_rgba(10 * id as u8, 0, 0, 0xFF), Coord::new(x, y))
        }
    }

    #[test]
    fn test_new_rejects_bad_map() {
        assert_eq!(Session::new("").unwrap_err(), DecodeError::EmptyInput);
        assert!(matches!(
            Session::new("PP\nP\n").unwrap_err(),
            DecodeError::RaggedRows { row: 1, .. }
        ));
    }

    #[test]
    fn test_place_and_grow() {
        let mut session = Session::new("PPP\nPPP\nPPP\n").unwrap();
        session.place_capital(&spec(1, 1, 1)).unwrap();
        let report = session.grow(40.0);

        assert_eq!(report.claimed, 4);
        assert_eq!(session.territory(1), Some(5));
        assert_eq!(session.ownership().distance(Coord::new(1, 0)), Some(20.0));
    }

    #[test]
    fn test_place_on_owned_cell() {
        let mut session = Session::new("PPP\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();
        let before = session.ownership().clone();

        let err = session.place_capital(&spec(2, 0, 0)).unwrap_err();
        assert_eq!(
            err,
            SimError::Placement(PlacementError::CellOccupied {
                coord: Coord::new(0, 0),
                owner: 1
            })
        );
        assert_eq!(session.ownership(), &before);
        assert!(session.empire(2).is_none());
    }

    #[test]
    fn test_bad_cost_table_rejected() {
        let mut session = Session::new("PPP\n").unwrap();
        let mut bad = spec(1, 0, 0);
        bad.costs = Some(CostTable::uniform(0));
        assert!(matches!(
            session.place_capital(&bad),
            Err(SimError::Configuration(_))
        ));
        assert!(session.empire(1).is_none());
    }

    #[test]
    fn test_default_seed_budget_applies() {
        let mut session = Session::new("PPPPP\n").unwrap();
        let spec = EmpireSpec::new(1, Color::WHITE, Coord::new(0, 0));
        session.place_capital(&spec).unwrap();
        // Standard plain cost 15, seed 2000: the whole strip is claimed.
        assert_eq!(session.territory(1), Some(5));
    }

    #[test]
    fn test_distance_cost_sources() {
        let mut session = Session::new("PPP\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();

        let field = session.compute_distance(Coord::new(0, 0), Some(1), None).unwrap();
        assert_eq!(field.get(Coord::new(2, 0)), Some(20.0));

        let table = CostTable::uniform(3);
        let field = session
            .compute_distance(Coord::new(0, 0), Some(1), Some(&table))
            .unwrap();
        assert_eq!(field.get(Coord::new(2, 0)), Some(6.0));

        let field = session.compute_distance(Coord::new(0, 0), None, None).unwrap();
        assert_eq!(field.get(Coord::new(2, 0)), Some(30.0));

        assert_eq!(
            session.compute_distance(Coord::new(0, 0), Some(9), None).unwrap_err(),
            SimError::UnknownEmpire(UnknownEmpireError(9))
        );
    }

    #[test]
    fn test_distance_leaves_ownership_alone() {
        let mut session = Session::new("PPP\nPPP\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();
        let before = session.ownership().clone();
        session.compute_distance(Coord::new(2, 1), Some(1), None).unwrap();
        assert_eq!(session.ownership(), &before);
    }

    #[test]
    fn test_render_sizes() {
        let mut session = Session::new("PPPP\nWWWW\n").unwrap();
        assert_eq!(session.render_terrain().to_rgba_bytes().len(), 32);
        assert_eq!(session.render_ownership().to_rgba_bytes().len(), 32);
        assert_eq!(session.render_resources().to_rgba_bytes().len(), 32);
        assert!(session.render_distance(DistanceScale::Auto).is_none());

        session.compute_distance(Coord::new(0, 0), None, None).unwrap();
        let buffer = session.render_distance(DistanceScale::Auto).unwrap();
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 2);
    }

    #[test]
    fn test_ownership_colors() {
        let mut session = Session::new("PP\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();
        session.set_empire_color(1, Color::WHITE).unwrap();

        let buffer = session.render_ownership();
        assert_eq!(buffer.pixel(Coord::new(0, 0)), Some(Color::WHITE));
        assert_eq!(buffer.pixel(Coord::new(1, 0)), Some(render::palette::NEUTRAL));
        assert!(session.set_empire_color(5, Color::WHITE).is_err());
    }

    #[test]
    fn test_load_resources_shape_checked() {
        let mut session = Session::new("PP\nPP\n").unwrap();
        assert!(matches!(
            session.load_resources("g\n"),
            Err(DecodeError::ShapeMismatch { .. })
        ));
        session.load_resources("gW\nWv\n").unwrap();
        assert_eq!(session.export_resource_text(), "gW\nWv\n");
    }

    #[test]
    fn test_resource_value() {
        let mut session = Session::new("PP\nPP\n").unwrap();
        session.load_resources("gs\nWv\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();
        session.grow(10.0);

        // Ties between equal-cost neighbours go to the lower cell index, so
        // the silver at (1,0) is claimed before (0,1).
        assert_eq!(session.resource_value(1), Ok(170));
        assert_eq!(session.resource_value(4), Err(UnknownEmpireError(4)));
    }

    #[test]
    fn test_paint_and_export() {
        let mut session = Session::new("PPP\nPPP\nPPP\n").unwrap();
        session.paint_terrain(Coord::new(1, 1), 1.0, TerrainType::Mountain);
        session.paint_resource(Coord::new(0, 0), 1.0, ResourceType::Fish);

        assert_eq!(session.export_terrain_text(), "PPP\nPMP\nPPP\n");
        assert_eq!(session.export_resource_text(), "fWW\nWWW\nWWW\n");
    }

    #[test]
    fn test_paint_uses_config_aspect_ratio() {
        let config = SimConfig {
            brush_aspect_ratio: 2.0,
            ..SimConfig::default()
        };
        let map = "PPPPPPP\n".repeat(5);
        let mut session = Session::with_config(&map, config).unwrap();

        // Squashed horizontally: a column of five plus one cell either side.
        assert_eq!(session.paint_terrain(Coord::new(3, 2), 4.0, TerrainType::Ice), 7);
        assert_eq!(
            session.export_terrain_text(),
            "PPPIPPP\nPPPIPPP\nPPIIIPP\nPPPIPPP\nPPPIPPP\n"
        );

        assert_eq!(session.paint_resource(Coord::new(3, 2), 4.0, ResourceType::Gold), 7);
        assert_eq!(session.resources().get(Coord::new(3, 0)), Some(ResourceType::Gold));
        assert_eq!(session.resources().get(Coord::new(1, 2)), Some(ResourceType::None));
    }

    #[test]
    fn test_resize_canvas_resets() {
        let mut session = Session::new("PPP\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();
        session.compute_distance(Coord::new(0, 0), None, None).unwrap();

        session.resize_canvas(2, 2).unwrap();
        assert_eq!(session.export_terrain_text(), "WW\nWW\n");
        assert_eq!(session.empires().count(), 0);
        assert!(session.distance_field().is_none());
        assert!(session.resize_canvas(0, 2).is_err());
        assert_eq!(session.terrain().len(), 4);
    }

    #[test]
    fn test_scenario_applied_in_order() {
        let mut session = Session::new("PPPPP\n").unwrap();
        let scenario = Scenario {
            config: SimConfig {
                seed_budget: 0.0,
                ..SimConfig::default()
            },
            empires: vec![
                EmpireSpec::new(2, Color::WHITE, Coord::new(4, 0)),
                EmpireSpec::new(1, Color::WHITE, Coord::new(0, 0)),
            ],
        };
        let reports = session.apply_scenario(&scenario).unwrap();
        assert_eq!(reports.len(), 2);

        session.grow(1_000.0);
        assert_eq!(session.territory(1), Some(3));
        assert_eq!(session.territory(2), Some(2));
        assert_eq!(session.capital_markers().len(), 2);
    }

    #[test]
    fn test_set_costs_and_delete() {
        let mut session = Session::new("PPP\n").unwrap();
        session.place_capital(&spec(1, 0, 0)).unwrap();
        session.set_empire_costs(1, &CostTable::uniform(1)).unwrap();
        assert!(matches!(
            session.set_empire_costs(1, &CostTable::uniform(0)),
            Err(SimError::Configuration(_))
        ));
        assert!(matches!(
            session.set_empire_costs(2, &CostTable::uniform(1)),
            Err(SimError::UnknownEmpire(_))
        ));

        assert_eq!(session.delete_empire(1), Ok(1));
        assert!(session.ownership().owners().iter().all(Option::is_none));
    }
}
