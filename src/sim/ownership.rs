//! Per-cell ownership and accumulated distance from the owner's capital.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::grid::{Coord, Grid};
use crate::sim::EmpireId;

/// Outcome of offering a claim on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contest {
    /// The cell is already held by an equal or better claim.
    Discard,
    /// The claim wins. Carries the owner being replaced, which may be the
    /// claimant itself holding the cell at a higher distance.
    Claim(Option<EmpireId>),
}

/// Owner and distance for every cell, parallel to the terrain grid.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipField {
    width: u32,
    height: u32,
    owners: Vec<Option<EmpireId>>,
    distances: Vec<f64>,
}

impl OwnershipField {
    /// Create an all-unowned field shaped like `grid`.
    #[must_use]
    pub fn new<T: Copy>(grid: &Grid<T>) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            owners: vec![None; grid.len()],
            distances: vec![f64::INFINITY; grid.len()],
        }
    }

    /// Get the width of the field.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the field.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Owners in row-major order.
    #[must_use]
    pub fn owners(&self) -> &[Option<EmpireId>] {
        &self.owners
    }

    /// Recorded distances in row-major order; `+inf` where unowned.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Owner of the cell at `coord`.
    #[must_use]
    pub fn owner(&self, coord: Coord) -> Option<EmpireId> {
        self.index(coord).and_then(|idx| self.owners[idx])
    }

    /// Distance recorded at `coord`, `None` when out of bounds.
    #[must_use]
    pub fn distance(&self, coord: Coord) -> Option<f64> {
        self.index(coord).map(|idx| self.distances[idx])
    }

    /// Count cells owned by `empire`.
    #[must_use]
    pub fn count_owned(&self, empire: EmpireId) -> usize {
        self.owners
            .par_iter()
            .filter(|&&owner| owner == Some(empire))
            .count()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.x < self.width && coord.y < self.height)
            .then(|| coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Decide whether `empire` reaching cell `index` at `cost` takes it.
    ///
    /// Lower cost wins; equal cost between rivals goes to the lower id.
    pub(crate) fn contest(&self, index: usize, empire: EmpireId, cost: f64) -> Contest {
        let held = self.distances[index];
        match self.owners[index] {
            None => Contest::Claim(None),
            Some(owner) if owner == empire => {
                if cost < held {
                    Contest::Claim(Some(owner))
                } else {
                    Contest::Discard
                }
            }
            Some(owner) => {
                let order = cost.total_cmp(&held).then(empire.cmp(&owner));
                if order == Ordering::Less {
                    Contest::Claim(Some(owner))
                } else {
                    Contest::Discard
                }
            }
        }
    }

    pub(crate) fn claim(&mut self, index: usize, empire: EmpireId, cost: f64) {
        self.owners[index] = Some(empire);
        self.distances[index] = cost;
    }

    /// Revert every cell owned by `empire` to unowned. Returns the number of
    /// cells released.
    pub(crate) fn release(&mut self, empire: EmpireId) -> usize {
        self.owners
            .par_iter_mut()
            .zip(self.distances.par_iter_mut())
            .map(|(owner, dist)| {
                if *owner == Some(empire) {
                    *owner = None;
                    *dist = f64::INFINITY;
                    1
                } else {
                    0
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TerrainGrid;

    fn field() -> OwnershipField {
        OwnershipField::new(&TerrainGrid::new(3, 3).unwrap())
    }

    #[test]
    fn test_new_field_unowned() {
        let field = field();
        assert!(field.owners().iter().all(Option::is_none));
        assert!(field.distances().iter().all(|d| d.is_infinite()));
        assert_eq!(field.owner(Coord::new(3, 0)), None);
        assert_eq!(field.distance(Coord::new(0, 3)), None);
    }

    #[test]
    fn test_contest_rules() {
        let mut field = field();
        assert_eq!(field.contest(0, 2, 10.0), Contest::Claim(None));

        field.claim(0, 2, 10.0);
        assert_eq!(field.contest(0, 2, 10.0), Contest::Discard);
        assert_eq!(field.contest(0, 2, 5.0), Contest::Claim(Some(2)));
        assert_eq!(field.contest(0, 3, 12.0), Contest::Discard);
        assert_eq!(field.contest(0, 3, 8.0), Contest::Claim(Some(2)));
    }

    #[test]
    fn test_contest_tie_goes_to_lower_id() {
        let mut field = field();
        field.claim(4, 2, 20.0);
        assert_eq!(field.contest(4, 1, 20.0), Contest::Claim(Some(2)));
        assert_eq!(field.contest(4, 3, 20.0), Contest::Discard);
    }

    #[test]
    fn test_release() {
        let mut field = field();
        field.claim(0, 1, 1.0);
        field.claim(1, 1, 2.0);
        field.claim(2, 2, 1.0);

        assert_eq!(field.release(1), 2);
        assert_eq!(field.count_owned(1), 0);
        assert_eq!(field.count_owned(2), 1);
        assert_eq!(field.owner(Coord::new(0, 0)), None);
        assert!(field.distance(Coord::new(0, 0)).unwrap().is_infinite());
    }
}
