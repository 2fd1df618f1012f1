//! Resource types placed on cells.

use serde::{Deserialize, Serialize};

use super::CellCode;

/// Type of resource on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResourceType {
    /// No resource.
    #[default]
    None = 0,
    /// Gold, `g`.
    Gold = 1,
    /// Silver, `s`.
    Silver = 2,
    /// Gems, `*`.
    Gems = 3,
    /// Coal, `c`.
    Coal = 4,
    /// Cows, `C`.
    Cows = 5,
    /// Wheat, `w`.
    Wheat = 6,
    /// Fish, `f`.
    Fish = 7,
    /// Silk, `S`.
    Silk = 8,
    /// Spices, `!`.
    Spices = 9,
    /// Wine, `v`.
    Wine = 10,
}

impl ResourceType {
    /// Number of resource types, including `None`.
    pub const COUNT: usize = 11;

    /// Character written for [`ResourceType::None`].
    pub const NONE_CODE: char = 'W';

    /// Position in palettes.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Economic value of one cell of this resource.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            ResourceType::None => 0,
            ResourceType::Gold => 100,
            ResourceType::Silver | ResourceType::Coal => 70,
            ResourceType::Gems => 150,
            ResourceType::Cows => 30,
            ResourceType::Wheat => 20,
            ResourceType::Fish => 25,
            ResourceType::Silk => 80,
            ResourceType::Spices => 90,
            ResourceType::Wine => 40,
        }
    }
}

impl CellCode for ResourceType {
    fn from_code(c: char) -> Self {
        match c {
            'g' => ResourceType::Gold,
            's' => ResourceType::Silver,
            '*' => ResourceType::Gems,
            'c' => ResourceType::Coal,
            'C' => ResourceType::Cows,
            'w' => ResourceType::Wheat,
            'f' => ResourceType::Fish,
            'S' => ResourceType::Silk,
            '!' => ResourceType::Spices,
            'v' => ResourceType::Wine,
            _ => ResourceType::None,
        }
    }

    fn code(self) -> char {
        match self {
            ResourceType::None => Self::NONE_CODE,
            ResourceType::Gold => 'g',
            ResourceType::Silver => 's',
            ResourceType::Gems => '*',
            ResourceType::Coal => 'c',
            ResourceType::Cows => 'C',
            ResourceType::Wheat => 'w',
            ResourceType::Fish => 'f',
            ResourceType::Silk => 'S',
            ResourceType::Spices => '!',
            ResourceType::Wine => 'v',
        }
    }
}
