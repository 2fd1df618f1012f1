//! Brush painting and canvas allocation for map authoring.
//!
//! Painting never touches ownership. Distances recorded before a repaint
//! stay as they were.

// Brush extents are bounded by the grid dimensions.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use tracing::{debug, info};

use crate::error::DecodeError;
use crate::grid::{Coord, Grid, ResourceGrid, ResourceType, TerrainGrid, TerrainType};

/// An elliptical brush footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// Diameter in cells. Zero paints nothing.
    pub diameter: f64,
    /// Display width-to-height ratio; 1.0 is a circle.
    pub aspect_ratio: f64,
}

impl Brush {
    /// A circular brush.
    #[must_use]
    pub const fn circle(diameter: f64) -> Self {
        Self {
            diameter,
            aspect_ratio: 1.0,
        }
    }

    /// Whether the offset `(dx, dy)` from the centre is inside the brush.
    #[must_use]
    pub fn contains(&self, dx: i64, dy: i64) -> bool {
        let radius = self.radius();
        if radius <= 0.0 {
            return false;
        }
        let nx = dx as f64 * self.aspect() / radius;
        let ny = dy as f64 / radius;
        nx * nx + ny * ny <= 1.0
    }

    fn radius(&self) -> f64 {
        if self.diameter.is_finite() {
            self.diameter / 2.0
        } else {
            0.0
        }
    }

    fn aspect(&self) -> f64 {
        if self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            1.0
        }
    }
}

/// Set every cell under the brush to `value`, clipped to the grid.
/// Returns the number of cells written.
pub fn paint<T: Copy>(grid: &mut Grid<T>, center: Coord, brush: Brush, value: T) -> usize {
    let radius = brush.radius();
    if radius <= 0.0 {
        return 0;
    }

    let (width, height) = (i64::from(grid.width()), i64::from(grid.height()));
    let reach_y = (radius.ceil() as i64).min(height);
    let reach_x = ((radius / brush.aspect()).ceil() as i64).min(width);
    let (cx, cy) = (i64::from(center.x), i64::from(center.y));

    let mut painted = 0;
    for y in (cy - reach_y).max(0)..=(cy + reach_y).min(height - 1) {
        for x in (cx - reach_x).max(0)..=(cx + reach_x).min(width - 1) {
            if brush.contains(x - cx, y - cy) && grid.set(Coord::new(x as u32, y as u32), value) {
                painted += 1;
            }
        }
    }
    painted
}

/// Paint terrain.
pub fn paint_terrain(
    grid: &mut TerrainGrid,
    center: Coord,
    brush: Brush,
    terrain: TerrainType,
) -> usize {
    let painted = paint(grid, center, brush, terrain);
    debug!(
        target: "imperium::editor",
        x = center.x,
        y = center.y,
        diameter = brush.diameter,
        terrain = ?terrain,
        painted,
        "terrain painted"
    );
    painted
}

/// Paint resources.
pub fn paint_resource(
    grid: &mut ResourceGrid,
    center: Coord,
    brush: Brush,
    resource: ResourceType,
) -> usize {
    let painted = paint(grid, center, brush, resource);
    debug!(
        target: "imperium::editor",
        x = center.x,
        y = center.y,
        diameter = brush.diameter,
        resource = ?resource,
        painted,
        "resources painted"
    );
    painted
}

/// Allocate a fresh all-water terrain grid and an empty resource grid.
///
/// # Errors
///
/// Returns `EmptyInput` for a zero dimension and `TooLarge` above the cell
/// limit.
pub fn resize_canvas(width: u32, height: u32) -> Result<(TerrainGrid, ResourceGrid), DecodeError> {
    let terrain = TerrainGrid::filled(width, height, TerrainType::Water)?;
    let resources = ResourceGrid::filled(width, height, ResourceType::None)?;
    info!(target: "imperium::editor", width, height, "canvas allocated");
    Ok((terrain, resources))
}
