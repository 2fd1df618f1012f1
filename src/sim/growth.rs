//! Multi-empire frontier expansion.
//!
//! Every empire keeps its own min-queue of frontier candidates, but all
//! queues are drained in one merged order: the cheapest accumulated cost
//! goes first, ties go to the lower empire id. Growth is bounded by a
//! per-empire balance of cost-units. Each claim is charged the cost of the
//! edge that reached the cell, not its accumulated distance, and any unspent
//! balance and unpopped candidates carry over to the next tick.
//!
//! # Contest rules
//!
//! When empire `e` pops a candidate `(cost, cell)`:
//!
//! - owned by `e` at a distance `<= cost`: discarded, already settled
//! - owned by a rival with `(distance, rival) < (cost, e)`: discarded
//! - otherwise `e` claims the cell at `cost` and queues its neighbours
//!
//! Discards are free. A claim whose edge cost exceeds the empire's balance
//! stalls that empire until the next tick.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{PlacementError, UnknownEmpireError};
use crate::grid::{Coord, TerrainGrid};
use crate::sim::frontier::{Candidate, Frontier};
use crate::sim::invariants::assert_invariants;
use crate::sim::ownership::{Contest, OwnershipField};
use crate::sim::{Color, CostModel, Empire, EmpireId};

/// Summary of one grow tick or placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowReport {
    /// Cells claimed, including cells taken from rivals.
    pub claimed: usize,
    /// Cells taken from a rival empire.
    pub overwritten: usize,
    /// Candidates dropped because a better claim already held the cell.
    pub discarded: usize,
    /// Cost-units charged across all empires.
    pub consumed: f64,
    /// Empires that ran out of balance with candidates still queued.
    pub stalled: Vec<EmpireId>,
    /// Empires that lost their last cell during this tick.
    pub eliminated: Vec<EmpireId>,
    /// Requested empires that are not registered.
    pub unknown: Vec<UnknownEmpireError>,
}

/// An empire together with its frontier queue.
#[derive(Debug, Clone)]
struct Realm {
    empire: Empire,
    frontier: Frontier,
    territory: usize,
}

/// Owns the ownership field and every placed empire.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    ownership: OwnershipField,
    realms: BTreeMap<EmpireId, Realm>,
}

impl GrowthEngine {
    /// Create an engine with no empires over `grid`.
    #[must_use]
    pub fn new(grid: &TerrainGrid) -> Self {
        Self {
            ownership: OwnershipField::new(grid),
            realms: BTreeMap::new(),
        }
    }

    /// Current ownership.
    #[must_use]
    pub fn ownership(&self) -> &OwnershipField {
        &self.ownership
    }

    #[cfg(test)]
    pub(crate) fn ownership_mut(&mut self) -> &mut OwnershipField {
        &mut self.ownership
    }

    /// Look up an empire.
    #[must_use]
    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.realms.get(&id).map(|realm| &realm.empire)
    }

    /// All placed empires in ascending id order.
    pub fn empires(&self) -> impl Iterator<Item = &Empire> {
        self.realms.values().map(|realm| &realm.empire)
    }

    /// Number of cells an empire owns.
    #[must_use]
    pub fn territory(&self, id: EmpireId) -> Option<usize> {
        self.realms.get(&id).map(|realm| realm.territory)
    }

    /// Number of candidates queued for an empire.
    #[must_use]
    pub fn frontier_len(&self, id: EmpireId) -> Option<usize> {
        self.realms.get(&id).map(|realm| realm.frontier.len())
    }

    /// Place an empire's capital and grow it by `seed_budget`.
    ///
    /// The capital is claimed at the entry cost of its own terrain and its
    /// neighbours are queued; this consumes no budget.
    ///
    /// # Errors
    ///
    /// Fails without changing any state if the cell is outside the grid, is
    /// already owned, or the empire has already been placed.
    pub fn place_capital(
        &mut self,
        grid: &TerrainGrid,
        mut empire: Empire,
        capital: Coord,
        seed_budget: f64,
    ) -> Result<GrowReport, PlacementError> {
        let Some(index) = grid.index(capital) else {
            return Err(PlacementError::OutOfBounds { coord: capital });
        };
        if self.realms.contains_key(&empire.id) {
            return Err(PlacementError::AlreadyPlaced(empire.id));
        }
        if let Some(owner) = self.ownership.owners()[index] {
            return Err(PlacementError::CellOccupied {
                coord: capital,
                owner,
            });
        }

        let id = empire.id;
        let terrain = grid.cells()[index];
        let entry = empire.costs.cost(terrain, terrain);
        empire.capital = Some(capital);
        empire.alive = true;
        empire.budget = 0.0;

        self.ownership.claim(index, id, entry);
        let mut frontier = Frontier::default();
        push_neighbors(
            &mut frontier,
            &empire.costs,
            grid,
            &self.ownership,
            id,
            index,
            entry,
        );
        self.realms.insert(
            id,
            Realm {
                empire,
                frontier,
                territory: 1,
            },
        );

        info!(
            target: "imperium::growth",
            empire = id,
            x = capital.x,
            y = capital.y,
            entry,
            seed_budget,
            "capital placed"
        );

        Ok(self.run(grid, &[id], seed_budget))
    }

    /// Advance every living empire by `budget` cost-units.
    pub fn grow(&mut self, grid: &TerrainGrid, budget: f64) -> GrowReport {
        let ids: Vec<EmpireId> = self.realms.keys().copied().collect();
        self.run(grid, &ids, budget)
    }

    /// Advance the listed empires. Unknown ids are reported in
    /// [`GrowReport::unknown`] and do not affect the others.
    pub fn grow_empires(
        &mut self,
        grid: &TerrainGrid,
        ids: &[EmpireId],
        budget: f64,
    ) -> GrowReport {
        self.run(grid, ids, budget)
    }

    /// Advance a single empire.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn grow_empire(
        &mut self,
        grid: &TerrainGrid,
        id: EmpireId,
        budget: f64,
    ) -> Result<GrowReport, UnknownEmpireError> {
        if !self.realms.contains_key(&id) {
            return Err(UnknownEmpireError(id));
        }
        Ok(self.run(grid, &[id], budget))
    }

    /// Remove an empire, reverting its cells to unowned and dropping its
    /// frontier. Returns the number of cells released.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn delete_empire(&mut self, id: EmpireId) -> Result<usize, UnknownEmpireError> {
        if self.realms.remove(&id).is_none() {
            return Err(UnknownEmpireError(id));
        }
        let released = self.ownership.release(id);
        info!(target: "imperium::growth", empire = id, released, "empire deleted");
        assert_invariants(self);
        Ok(released)
    }

    /// Change an empire's territory colour.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn set_color(&mut self, id: EmpireId, color: Color) -> Result<(), UnknownEmpireError> {
        let realm = self.realms.get_mut(&id).ok_or(UnknownEmpireError(id))?;
        realm.empire.color = color;
        Ok(())
    }

    /// Replace an empire's cost model. Candidates already queued keep the
    /// costs they were pushed with.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEmpireError`] if the empire is not placed.
    pub fn set_costs(&mut self, id: EmpireId, costs: CostModel) -> Result<(), UnknownEmpireError> {
        let realm = self.realms.get_mut(&id).ok_or(UnknownEmpireError(id))?;
        realm.empire.costs = costs;
        Ok(())
    }

    fn run(&mut self, grid: &TerrainGrid, ids: &[EmpireId], budget: f64) -> GrowReport {
        debug_assert!(
            grid.width() == self.ownership.width() && grid.height() == self.ownership.height(),
            "grid shape differs from ownership field"
        );

        // NaN and negative budgets add nothing.
        let budget = budget.max(0.0);
        let mut report = GrowReport::default();

        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut active = Vec::with_capacity(ids.len());
        for id in ids {
            match self.realms.get_mut(&id) {
                Some(realm) if realm.empire.alive => {
                    realm.empire.budget += budget;
                    active.push(id);
                }
                Some(_) => {}
                None => report.unknown.push(UnknownEmpireError(id)),
            }
        }

        while let Some(id) = self.next_contender(&mut active) {
            let Some(realm) = self.realms.get_mut(&id) else {
                break;
            };
            let Some(candidate) = realm.frontier.peek() else {
                continue;
            };

            let previous = match self.ownership.contest(candidate.index, id, candidate.cost) {
                Contest::Discard => {
                    realm.frontier.pop();
                    report.discarded += 1;
                    continue;
                }
                Contest::Claim(previous) => previous,
            };

            if candidate.step > realm.empire.budget {
                active.retain(|&other| other != id);
                report.stalled.push(id);
                continue;
            }

            realm.frontier.pop();
            realm.empire.budget -= candidate.step;
            report.consumed += candidate.step;
            report.claimed += 1;

            self.ownership.claim(candidate.index, id, candidate.cost);
            push_neighbors(
                &mut realm.frontier,
                &realm.empire.costs,
                grid,
                &self.ownership,
                id,
                candidate.index,
                candidate.cost,
            );

            if previous != Some(id) {
                realm.territory += 1;
            }
            if let Some(loser) = previous.filter(|&owner| owner != id) {
                report.overwritten += 1;
                self.cede(loser, &mut report);
            }
        }

        debug!(
            target: "imperium::growth",
            budget,
            claimed = report.claimed,
            overwritten = report.overwritten,
            discarded = report.discarded,
            consumed = report.consumed,
            stalled = report.stalled.len(),
            "grow tick"
        );
        assert_invariants(self);

        report
    }

    /// Pick the empire whose next candidate is cheapest, lowest id on ties.
    /// Drops empires that are dead or have nothing queued.
    fn next_contender(&self, active: &mut Vec<EmpireId>) -> Option<EmpireId> {
        active.retain(|id| {
            self.realms
                .get(id)
                .is_some_and(|realm| realm.empire.alive && !realm.frontier.is_empty())
        });

        active
            .iter()
            .filter_map(|&id| Some((self.realms.get(&id)?.frontier.peek()?, id)))
            .min_by(|(a, a_id), (b, b_id)| a.cost.total_cmp(&b.cost).then(a_id.cmp(b_id)))
            .map(|(_, id)| id)
    }

    /// Take one cell away from `loser`, eliminating it at zero territory.
    fn cede(&mut self, loser: EmpireId, report: &mut GrowReport) {
        let Some(realm) = self.realms.get_mut(&loser) else {
            return;
        };
        realm.territory = realm.territory.saturating_sub(1);
        if realm.territory == 0 && realm.empire.alive {
            realm.empire.eliminate();
            realm.frontier.clear();
            report.eliminated.push(loser);
            info!(target: "imperium::growth", empire = loser, "empire eliminated");
        }
    }
}

/// Queue the in-bounds neighbours of `index`, skipping cells already held
/// by an equal or better claim.
fn push_neighbors(
    frontier: &mut Frontier,
    costs: &CostModel,
    grid: &TerrainGrid,
    ownership: &OwnershipField,
    empire: EmpireId,
    index: usize,
    cost: f64,
) {
    let here = grid.cells()[index];
    let (adjacent, count) = grid.coord(index).adjacent(grid.width(), grid.height());
    for next in &adjacent[..count as usize] {
        let Some(next_index) = grid.index(*next) else {
            continue;
        };
        let step = costs.cost(grid.cells()[next_index], here);
        let total = cost + step;
        if ownership.contest(next_index, empire, total) == Contest::Discard {
            continue;
        }
        frontier.push(Candidate {
            cost: total,
            step,
            index: next_index,
        });
    }
}
