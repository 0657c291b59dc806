//! Rectangular color grid, one cell per stitch.

use std::collections::HashSet;

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

use crate::color::Rgb;

/// Error type for grid construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A row's length differs from the first row's length.
    #[error("grid row {row} has {got} cells, expected {expected}")]
    JaggedRows {
        /// Index of the offending row
        row: usize,
        /// Cell count of the first row
        expected: usize,
        /// Cell count of the offending row
        got: usize,
    },
}

/// A rectangular grid of colors.
///
/// Cells are stored as a flat row-major buffer with dimension metadata, so
/// rectangularity is structural: a jagged grid is unrepresentable. The
/// validating [`from_rows`](Grid::from_rows) constructor is the entry point
/// for nested row data (the serde wire form), and rejects ragged input
/// instead of silently padding it.
///
/// The serde representation is a 2-D array of `#rrggbb` hex strings, rows
/// outer, columns inner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid from a flat row-major cell buffer.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `cells.len() == width * height`.
    pub fn new(cells: Vec<Rgb>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            cells.len(),
            width * height,
            "cell count ({}) must match width * height ({}x{}={})",
            cells.len(),
            width,
            height,
            width * height,
        );
        Self {
            cells,
            width,
            height,
        }
    }

    /// Create a grid from nested rows, validating that every row has the
    /// same length.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::JaggedRows {
                    row,
                    expected: width,
                    got: cells.len(),
                });
            }
        }
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the grid has zero rows or zero columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The color at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "cell ({x},{y}) out of bounds");
        self.cells[y * self.width + x]
    }

    /// The flat row-major cell buffer.
    #[inline]
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        // max(1) keeps chunks() well-defined for the zero-width grid,
        // whose cell buffer is empty anyway.
        self.cells.chunks(self.width.max(1))
    }

    /// The deduplicated colors of the grid, in first-encountered row-major
    /// order. Pure; stable for a given grid.
    pub fn palette(&self) -> Vec<Rgb> {
        let mut seen = HashSet::new();
        let mut palette = Vec::new();
        for &color in &self.cells {
            if seen.insert(color) {
                palette.push(color);
            }
        }
        palette
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<Rgb>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(D::Error::custom)
    }
}
