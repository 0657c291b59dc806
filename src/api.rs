//! Public conversion API.
//!
//! [`PatternConverter`] is the primary entry point: a reusable builder that
//! runs the resample -> quantize -> extract pipeline over raw image bytes
//! and returns a [`Pattern`]. The individual stages stay public in their
//! own modules so the surrounding layer can also compose them directly.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::PatternError;
use crate::grid::Grid;
use crate::thread::{match_threads, ThreadCatalog, ThreadMapping};
use crate::{preview, quantize, resample};

/// Smallest accepted pattern edge, in cells.
pub const MIN_DIMENSION: u32 = 10;
/// Largest accepted pattern edge, in cells.
pub const MAX_DIMENSION: u32 = 200;
/// Smallest accepted color budget.
pub const MIN_COLORS: usize = 2;
/// Largest accepted color budget.
pub const MAX_COLORS: usize = 64;
/// Color budget used when the caller does not set one.
pub const DEFAULT_COLORS: usize = 16;

/// Image-to-pattern converter.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder)
/// - [`convert()`](Self::convert) takes `&self`, so one converter is
///   reusable across any number of images
/// - Bounds are validated per call, never at construction, so an
///   out-of-range budget surfaces as a typed error instead of a panic
///
/// # Example
///
/// ```no_run
/// use stitchgrid::PatternConverter;
///
/// let bytes = std::fs::read("photo.png")?;
/// let pattern = PatternConverter::new().colors(12).convert(&bytes, 50, 50)?;
///
/// assert_eq!(pattern.height(), 50);
/// assert!(pattern.palette.len() <= 12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternConverter {
    colors: usize,
}

impl PatternConverter {
    /// Create a converter with the default color budget.
    pub fn new() -> Self {
        Self {
            colors: DEFAULT_COLORS,
        }
    }

    /// Set the palette budget (bounds checked at conversion time).
    #[inline]
    pub fn colors(mut self, count: usize) -> Self {
        self.colors = count;
        self
    }

    /// Convert raw image bytes into a `width` x `height` pattern.
    ///
    /// Pipeline: decode + composite onto white, block-nearest resample,
    /// median-cut quantize, extract the palette.
    ///
    /// # Errors
    ///
    /// - [`PatternError::InvalidDimensions`] if either edge is outside
    ///   [`MIN_DIMENSION`]..=[`MAX_DIMENSION`]
    /// - [`PatternError::InvalidColorBudget`] if the configured budget is
    ///   outside [`MIN_COLORS`]..=[`MAX_COLORS`]
    /// - [`PatternError::Decode`] if the bytes are not a recognized image
    pub fn convert(
        &self,
        image_bytes: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Pattern, PatternError> {
        let dimension_ok =
            |v: u32| (MIN_DIMENSION..=MAX_DIMENSION).contains(&v);
        if !dimension_ok(width) || !dimension_ok(height) {
            return Err(PatternError::InvalidDimensions { width, height });
        }
        if !(MIN_COLORS..=MAX_COLORS).contains(&self.colors) {
            return Err(PatternError::InvalidColorBudget {
                requested: self.colors,
            });
        }

        let grid = resample::to_grid(image_bytes, width, height)?;
        let grid = quantize::quantize(&grid, self.colors);
        let palette = grid.palette();

        tracing::debug!(
            width,
            height,
            colors = palette.len(),
            budget = self.colors,
            "Converted image to pattern"
        );

        Ok(Pattern { grid, palette })
    }
}

impl Default for PatternConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished pattern: the color grid and the palette of colors it uses.
///
/// The serde representation is the persisted design shape: a `grid` of hex
/// rows and a `palette` of hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// The quantized color grid, rows outer, columns inner.
    pub grid: Grid,
    /// Deduplicated colors of the grid, first-encountered order.
    pub palette: Vec<Rgb>,
}

impl Pattern {
    /// Pattern width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Pattern height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Render a PNG preview with `cell_size` pixels per cell edge.
    pub fn preview(&self, cell_size: u32) -> Result<Vec<u8>, PatternError> {
        preview::render_preview(&self.grid, cell_size)
    }

    /// Match the pattern's palette against a thread catalog.
    pub fn thread_mapping(&self, catalog: &ThreadCatalog) -> ThreadMapping {
        match_threads(&self.palette, catalog)
    }
}
