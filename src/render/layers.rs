//! Layer renderers. Each one is a pure read of its input.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::PixelBuffer;
use super::palette::{self, NEUTRAL, ORPHAN};
use crate::grid::{Coord, ResourceGrid, TerrainGrid};
use crate::sim::{Color, DistanceField, EmpireId, OwnershipField};

/// How distances are normalised before the heat gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DistanceScale {
    /// Scale to the largest finite distance in the field.
    #[default]
    Auto,
    /// Scale to a fixed cap; farther cells saturate.
    Max(f64),
}

/// A capital to highlight on top of a rendered layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapitalMarker {
    /// Capital cell.
    pub coord: Coord,
    /// Marker colour.
    pub color: Color,
    /// Arm length of the cross, in cells.
    pub size: u32,
}

/// Paint terrain colours.
#[must_use]
pub fn render_terrain(grid: &TerrainGrid) -> PixelBuffer {
    let pixels = grid
        .cells()
        .par_iter()
        .map(|&terrain| palette::terrain_color(terrain).packed())
        .collect();
    PixelBuffer::from_pixels(grid.width(), grid.height(), pixels)
}

/// Paint each owned cell in its empire's colour.
///
/// Unowned cells are [`NEUTRAL`]; owners missing from `colors` are
/// [`ORPHAN`].
#[must_use]
pub fn render_ownership(field: &OwnershipField, colors: &BTreeMap<EmpireId, Color>) -> PixelBuffer {
    let pixels = field
        .owners()
        .par_iter()
        .map(|owner| match owner {
            None => NEUTRAL.packed(),
            Some(id) => colors.get(id).copied().unwrap_or(ORPHAN).packed(),
        })
        .collect();
    PixelBuffer::from_pixels(field.width(), field.height(), pixels)
}

/// Paint a distance field through the heat gradient.
///
/// Unreachable cells are [`NEUTRAL`]. A non-positive or non-finite cap
/// falls back to 1.
#[must_use]
pub fn render_distance(field: &DistanceField, scale: DistanceScale) -> PixelBuffer {
    let max = match scale {
        DistanceScale::Auto => field.max_finite().unwrap_or(1.0),
        DistanceScale::Max(cap) => cap,
    };
    let max = if max.is_finite() && max > 0.0 { max } else { 1.0 };

    let pixels = field
        .distances()
        .par_iter()
        .map(|&distance| {
            if distance.is_finite() {
                palette::heat_map(distance / max).packed()
            } else {
                NEUTRAL.packed()
            }
        })
        .collect();
    PixelBuffer::from_pixels(field.width(), field.height(), pixels)
}

/// Paint resource markers; empty cells are [`NEUTRAL`].
#[must_use]
pub fn render_resources(grid: &ResourceGrid) -> PixelBuffer {
    let pixels = grid
        .cells()
        .par_iter()
        .map(|&resource| palette::resource_color(resource).packed())
        .collect();
    PixelBuffer::from_pixels(grid.width(), grid.height(), pixels)
}

/// Stamp a cross on each capital, clipped to the buffer.
pub fn overlay_capitals(buffer: &mut PixelBuffer, markers: &[CapitalMarker]) {
    for marker in markers {
        let Coord { x, y } = marker.coord;
        buffer.set_pixel(marker.coord, marker.color);
        for arm in 1..=marker.size {
            buffer.set_pixel(Coord::new(x.saturating_add(arm), y), marker.color);
            buffer.set_pixel(Coord::new(x, y.saturating_add(arm)), marker.color);
            if let Some(left) = x.checked_sub(arm) {
                buffer.set_pixel(Coord::new(left, y), marker.color);
            }
            if let Some(up) = y.checked_sub(arm) {
                buffer.set_pixel(Coord::new(x, up), marker.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ResourceType, TerrainType};
    use crate::sim::{CostModel, CostTable};

    #[test]
    fn test_terrain_buffer_shape() {
        let grid = TerrainGrid::decode("WP\nMI\nRF\n").unwrap();
        let buffer = render_terrain(&grid);
        assert_eq!(buffer.to_rgba_bytes().len(), 2 * 3 * 4);
        assert_eq!(
            buffer.pixel(Coord::new(1, 2)),
            Some(palette::terrain_color(TerrainType::Forest))
        );
    }

    #[test]
    fn test_empty_ownership_is_neutral() {
        let grid = TerrainGrid::new(4, 3).unwrap();
        let field = OwnershipField::new(&grid);
        let buffer = render_ownership(&field, &BTreeMap::new());
        assert!(buffer.pixels().iter().all(|&p| p == NEUTRAL.packed()));
    }

    #[test]
    fn test_distance_auto_scale() {
        let grid = TerrainGrid::filled(3, 1, TerrainType::Plain).unwrap();
        let costs = CostModel::new(&CostTable::uniform(5)).unwrap();
        let field = DistanceField::compute(&grid, Coord::new(0, 0), &costs, None);

        let buffer = render_distance(&field, DistanceScale::Auto);
        assert_eq!(buffer.pixel(Coord::new(0, 0)), Some(palette::heat_map(0.0)));
        assert_eq!(buffer.pixel(Coord::new(1, 0)), Some(palette::heat_map(0.5)));
        assert_eq!(buffer.pixel(Coord::new(2, 0)), Some(palette::heat_map(1.0)));
    }

    #[test]
    fn test_distance_fixed_cap_saturates() {
        let grid = TerrainGrid::filled(3, 1, TerrainType::Plain).unwrap();
        let costs = CostModel::new(&CostTable::uniform(5)).unwrap();
        let field = DistanceField::compute(&grid, Coord::new(0, 0), &costs, None);

        let buffer = render_distance(&field, DistanceScale::Max(5.0));
        assert_eq!(buffer.pixel(Coord::new(1, 0)), Some(palette::heat_map(1.0)));
        assert_eq!(buffer.pixel(Coord::new(2, 0)), Some(palette::heat_map(1.0)));
    }

    #[test]
    fn test_resources() {
        let grid = ResourceGrid::decode("gW\n").unwrap();
        let buffer = render_resources(&grid);
        assert_eq!(
            buffer.pixel(Coord::new(0, 0)),
            Some(palette::resource_color(ResourceType::Gold))
        );
        assert_eq!(buffer.pixel(Coord::new(1, 0)), Some(NEUTRAL));
    }

    #[test]
    fn test_capital_cross_clipped() {
        let mut buffer = PixelBuffer::new(3, 3, NEUTRAL);
        let marker = CapitalMarker {
            coord: Coord::new(0, 0),
            color: Color::WHITE,
            size: 1,
        };
        overlay_capitals(&mut buffer, &[marker]);

        assert_eq!(buffer.pixel(Coord::new(0, 0)), Some(Color::WHITE));
        assert_eq!(buffer.pixel(Coord::new(1, 0)), Some(Color::WHITE));
        assert_eq!(buffer.pixel(Coord::new(0, 1)), Some(Color::WHITE));
        assert_eq!(buffer.pixel(Coord::new(1, 1)), Some(NEUTRAL));
    }
}
