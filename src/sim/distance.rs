//! Single-source terrain-weighted distance fields.

use tracing::debug;

use crate::grid::{Coord, TerrainGrid};
use crate::sim::frontier::{Candidate, Frontier};
use crate::sim::{CostModel, EmpireId};

/// Shortest weighted distance from one source to every cell.
///
/// Independent of ownership. Unreachable cells hold `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    source: Coord,
    empire: Option<EmpireId>,
    width: u32,
    height: u32,
    distances: Vec<f64>,
}

impl DistanceField {
    /// Run Dijkstra from `source` over the 4-connected grid.
    ///
    /// A source outside the grid is clamped to the nearest cell. The source
    /// itself is at distance 0; every edge costs the destination's entry cost
    /// including the water transition penalty. Each cell is settled once.
    #[must_use]
    pub fn compute(
        grid: &TerrainGrid,
        source: Coord,
        costs: &CostModel,
        empire: Option<EmpireId>,
    ) -> Self {
        let source = source.clamp_to(grid.width(), grid.height());
        let mut distances = vec![f64::INFINITY; grid.len()];
        let mut settled = vec![false; grid.len()];
        let mut queue = Frontier::default();
        let cells = grid.cells();

        if let Some(start) = grid.index(source) {
            distances[start] = 0.0;
            queue.push(Candidate {
                cost: 0.0,
                step: 0.0,
                index: start,
            });
        }

        let mut settled_count = 0usize;
        while let Some(Candidate { cost, index, .. }) = queue.pop() {
            if settled[index] {
                continue;
            }
            settled[index] = true;
            settled_count += 1;

            let here = cells[index];
            let (adjacent, count) = grid.coord(index).adjacent(grid.width(), grid.height());
            for next in &adjacent[..count as usize] {
                let Some(next_index) = grid.index(*next) else {
                    continue;
                };
                if settled[next_index] {
                    continue;
                }
                let step = costs.cost(cells[next_index], here);
                let total = cost + step;
                if total < distances[next_index] {
                    distances[next_index] = total;
                    queue.push(Candidate {
                        cost: total,
                        step,
                        index: next_index,
                    });
                }
            }
        }

        let field = Self {
            source,
            empire,
            width: grid.width(),
            height: grid.height(),
            distances,
        };
        debug!(
            target: "imperium::distance",
            x = source.x,
            y = source.y,
            empire = ?empire,
            settled = settled_count,
            max = ?field.max_finite(),
            "distance field computed"
        );
        field
    }

    /// The (clamped) source cell.
    #[must_use]
    pub const fn source(&self) -> Coord {
        self.source
    }

    /// Empire whose cost model was used, if any.
    #[must_use]
    pub const fn empire(&self) -> Option<EmpireId> {
        self.empire
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

    /// Distances in row-major order.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Distance at `coord`, `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<f64> {
        (coord.x < self.width && coord.y < self.height)
            .then(|| self.distances[coord.y as usize * self.width as usize + coord.x as usize])
    }

    /// Largest finite distance in the field.
    #[must_use]
    pub fn max_finite(&self) -> Option<f64> {
        self.distances
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .reduce(f64::max)
    }
}
