//! Generic cell layer and its plain-text map format.

// Grid dimensions are bounded by MAX_CELLS, so index arithmetic fits in u32.
#![allow(clippy::cast_possible_truncation)]

use super::{Coord, MAX_CELLS, ResourceType, TerrainType};
use crate::error::DecodeError;

/// A cell value with a one-character text encoding.
pub trait CellCode: Copy + Default + PartialEq + Send + Sync {
    /// Whether whitespace around a row is padding rather than cells.
    const TRIM_ROWS: bool = false;

    /// Decode a character. Unrecognised characters map to a fallback value.
    fn from_code(c: char) -> Self;

    /// Encode as a single character.
    fn code(self) -> char;
}

/// A rectangular layer of cells stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

/// Terrain layer.
pub type TerrainGrid = Grid<TerrainType>;

/// Resource layer, parallel to a [`TerrainGrid`].
pub type ResourceGrid = Grid<ResourceType>;

impl<T: CellCode> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for a zero dimension and `TooLarge` when the
    /// cell count exceeds [`MAX_CELLS`].
    pub fn filled(width: u32, height: u32, fill: T) -> Result<Self, DecodeError> {
        let size = checked_size(width as usize, height as usize)?;
        Ok(Self {
            width,
            height,
            cells: vec![fill; size],
        })
    }

    /// Create a grid filled with the default cell value.
    ///
    /// # Errors
    ///
    /// See [`Grid::filled`].
    pub fn new(width: u32, height: u32) -> Result<Self, DecodeError> {
        Self::filled(width, height, T::default())
    }

    /// Decode newline-separated rows of one-character cell codes.
    ///
    /// A trailing `\r` is stripped from every row. Layers with
    /// [`CellCode::TRIM_ROWS`] also drop whitespace around each row, so
    /// padded map files decode to the same grid. Blank lines are skipped.
    /// Unknown characters decode leniently through [`CellCode::from_code`].
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` with no rows, `RaggedRows` when rows differ in
    /// length and `TooLarge` above [`MAX_CELLS`].
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| if T::TRIM_ROWS { line.trim() } else { line })
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(DecodeError::EmptyInput);
        };
        let width = first.chars().count();
        let size = checked_size(width, rows.len())?;

        let mut cells = Vec::with_capacity(size);
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.chars().map(T::from_code));
            let found = cells.len() - before;
            if found != width {
                return Err(DecodeError::RaggedRows {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Encode as newline-terminated rows of cell codes.
    #[must_use]
    pub fn encode(&self) -> String {
        let width = self.width as usize;
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(width) {
            out.extend(row.iter().map(|cell| cell.code()));
            out.push('\n');
        }
        out
    }
}

impl<T: Copy> Grid<T> {
    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; grids have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `other` has the same dimensions.
    #[must_use]
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get a reference to the raw cells slice for efficient iteration.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to an index into the cells array.
    #[must_use]
    #[inline]
    pub fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert an index back into a coordinate.
    #[must_use]
    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        let width = self.width as usize;
        Coord::new((index % width) as u32, (index / width) as u32)
    }

    /// Get the cell at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<T> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Set the cell at the given coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, value: T) -> bool {
        if let Some(idx) = self.index(coord) {
            self.cells[idx] = value;
            true
        } else {
            false
        }
    }
}

fn checked_size(width: usize, height: usize) -> Result<usize, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyInput);
    }
    match width.checked_mul(height) {
        Some(size) if size <= MAX_CELLS => Ok(size),
        _ => Err(DecodeError::TooLarge {
            width,
            height,
            max: MAX_CELLS,
        }),
    }
}
