//! Territorial simulation: costs, empires, ownership and the growth and
//! distance engines that mutate or measure them.

mod cost;
mod distance;
mod empire;
mod frontier;
mod growth;
mod invariants;
mod ownership;

pub use cost::{CostModel, CostTable, UNCONFIGURED_COST, WATER_TRANSITION_MULTIPLIER};
pub use distance::DistanceField;
pub use empire::{Color, Empire, EmpireId};
pub use growth::{GrowReport, GrowthEngine};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use ownership::OwnershipField;
