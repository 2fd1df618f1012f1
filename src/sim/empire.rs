//! Empire state and packed colours.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::grid::Coord;
use crate::sim::CostModel;

/// Caller-assigned empire identifier.
pub type EmpireId = u32;

/// A colour packed as `0xAABBGGRR`, which is RGBA byte order in memory on
/// little-endian targets and the layout pixel buffers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Opaque white.
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    /// Wrap an already packed `0xAABBGGRR` value.
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    /// Pack individual channels.
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32)
    }

    /// Parse `#RRGGBB` (the `#` is optional). Alpha is forced to `0xFF`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] unless the input is exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError(hex.to_string()))
        };
        Ok(Self::from_rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, 0xFF))
    }

    /// The packed `0xAABBGGRR` value.
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Channels in `[r, g, b, a]` order.
    #[must_use]
    pub const fn channels(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.channels();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A territorial claimant growing out of its capital.
#[derive(Debug, Clone)]
pub struct Empire {
    /// Unique identifier.
    pub id: EmpireId,
    /// Display name.
    pub name: String,
    /// Territory colour.
    pub color: Color,
    /// Capital cell, set once on placement.
    pub capital: Option<Coord>,
    /// Traversal costs used when relaxing this empire's frontier.
    pub costs: CostModel,
    /// Unspent cost-units carried between grow ticks.
    pub budget: f64,
    /// Whether the empire still owns territory.
    pub alive: bool,
}

impl Empire {
    /// Create an unplaced empire.
    #[must_use]
    pub fn new(id: EmpireId, name: impl Into<String>, color: Color, costs: CostModel) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            capital: None,
            costs,
            budget: 0.0,
            alive: true,
        }
    }

    /// Eliminate this empire.
    pub fn eliminate(&mut self) {
        self.alive = false;
        self.budget = 0.0;
    }
}
