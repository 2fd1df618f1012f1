//! Terrain types.

use serde::{Deserialize, Serialize};

use super::CellCode;

/// Type of terrain on a cell.
///
/// The discriminants index cost tables and palettes, so their order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainType {
    /// Unrecognised map character. Never authored on purpose.
    Unknown = 0,
    /// Open water, `W`.
    #[default]
    Water = 1,
    /// River, `R`.
    River = 2,
    /// Plain, `P`.
    Plain = 3,
    /// Mountain, `M`.
    Mountain = 4,
    /// Desert, `D`.
    Desert = 5,
    /// Forest, `F`.
    Forest = 6,
    /// Ice, `I`.
    Ice = 7,
}

impl TerrainType {
    /// Number of terrain types.
    pub const COUNT: usize = 8;

    /// Every terrain type in discriminant order.
    pub const ALL: [TerrainType; Self::COUNT] = [
        TerrainType::Unknown,
        TerrainType::Water,
        TerrainType::River,
        TerrainType::Plain,
        TerrainType::Mountain,
        TerrainType::Desert,
        TerrainType::Forest,
        TerrainType::Ice,
    ];

    /// Character written for [`TerrainType::Unknown`]. Decoding it yields
    /// `Unknown` again, but the original character is lost.
    pub const UNKNOWN_CODE: char = '?';

    /// Position in cost tables and palettes.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is open water. Rivers are land for transition purposes.
    #[must_use]
    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, TerrainType::Water)
    }
}

impl CellCode for TerrainType {
    const TRIM_ROWS: bool = true;

    fn from_code(c: char) -> Self {
        match c {
            'W' => TerrainType::Water,
            'R' => TerrainType::River,
            'P' => TerrainType::Plain,
            'M' => TerrainType::Mountain,
            'D' => TerrainType::Desert,
            'F' => TerrainType::Forest,
            'I' => TerrainType::Ice,
            _ => TerrainType::Unknown,
        }
    }

    fn code(self) -> char {
        match self {
            TerrainType::Water => 'W',
            TerrainType::River => 'R',
            TerrainType::Plain => 'P',
            TerrainType::Mountain => 'M',
            TerrainType::Desert => 'D',
            TerrainType::Forest => 'F',
            TerrainType::Ice => 'I',
            TerrainType::Unknown => Self::UNKNOWN_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for terrain in TerrainType::ALL.into_iter().skip(1) {
            assert_eq!(TerrainType::from_code(terrain.code()), terrain);
        }
    }

    #[test]
    fn test_unknown_is_lenient() {
        assert_eq!(TerrainType::from_code('x'), TerrainType::Unknown);
        assert_eq!(TerrainType::from_code('p'), TerrainType::Unknown);
        assert_eq!(TerrainType::Unknown.code(), '?');
    }

    #[test]
    fn test_index_matches_all() {
        for (i, terrain) in TerrainType::ALL.iter().enumerate() {
            assert_eq!(terrain.index(), i);
        }
    }

    #[test]
    fn test_only_open_water_is_water() {
        assert!(TerrainType::Water.is_water());
        assert!(!TerrainType::River.is_water());
        assert!(!TerrainType::Unknown.is_water());
    }
}
