//! Fixed colour palettes.

// Gradient channels are clamped to 0..=255 before the cast.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::grid::{ResourceType, TerrainType};
use crate::sim::Color;

/// Unowned cells, unreachable distances and empty resource cells.
pub const NEUTRAL: Color = Color::TRANSPARENT;

/// Cells owned by an id with no registered empire.
pub const ORPHAN: Color = Color::WHITE;

/// Colour of a terrain type.
#[must_use]
pub const fn terrain_color(terrain: TerrainType) -> Color {
    Color::from_packed(match terrain {
        TerrainType::Water => 0xFFDB_9538,
        TerrainType::River => 0xFFE0_C040,
        TerrainType::Plain => 0xFF40_8035,
        TerrainType::Mountain => 0xFF60_6060,
        TerrainType::Desert => 0xFF60_C0F0,
        TerrainType::Forest => 0xFF22_5510,
        TerrainType::Ice => 0xFFFA_FAFA,
        TerrainType::Unknown => 0xFF00_0000,
    })
}

/// Colour of a resource marker. `None` is transparent.
#[must_use]
pub const fn resource_color(resource: ResourceType) -> Color {
    match resource {
        ResourceType::None => NEUTRAL,
        ResourceType::Gold => Color::from_rgba(0xFF, 0xD7, 0x00, 0xFF),
        ResourceType::Silver => Color::from_rgba(0xC0, 0xC0, 0xC0, 0xFF),
        ResourceType::Gems => Color::from_rgba(0xDA, 0x70, 0xD6, 0xFF),
        ResourceType::Coal => Color::from_rgba(0x2F, 0x4F, 0x4F, 0xFF),
        ResourceType::Cows => Color::from_rgba(0xA0, 0x52, 0x2D, 0xFF),
        ResourceType::Wheat => Color::from_rgba(0xF5, 0xDE, 0xB3, 0xFF),
        ResourceType::Fish => Color::from_rgba(0xAF, 0xEE, 0xEE, 0xFF),
        ResourceType::Silk => Color::from_rgba(0xFF, 0x69, 0xB4, 0xFF),
        ResourceType::Spices => Color::from_rgba(0xD2, 0x69, 0x1E, 0xFF),
        ResourceType::Wine => Color::from_rgba(0x80, 0x00, 0x00, 0xFF),
    }
}

/// Map `t` in `[0, 1]` through red, yellow, green, cyan and dark blue.
///
/// Channels are truncated, not rounded. Out-of-range and NaN inputs are
/// clamped to the nearest end.
#[must_use]
pub fn heat_map(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let channel = |v: f64| v.clamp(0.0, 255.0) as u8;

    let (r, g, b) = if t < 0.25 {
        let seg = t / 0.25;
        (255.0, 255.0 * seg, 0.0)
    } else if t < 0.5 {
        let seg = (t - 0.25) / 0.25;
        (255.0 * (1.0 - seg), 255.0, 0.0)
    } else if t < 0.75 {
        let seg = (t - 0.5) / 0.25;
        (0.0, 255.0, 255.0 * seg)
    } else {
        let seg = (t - 0.75) / 0.25;
        (0.0, 255.0 * (1.0 - seg), 255.0 - 116.0 * seg)
    };

    Color::from_rgba(channel(r), channel(g), channel(b), 0xFF)
}
