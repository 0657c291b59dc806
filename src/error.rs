//! Unified error type for the conversion pipeline.

use thiserror::Error;

use crate::color::ParseColorError;
use crate::grid::GridError;
use crate::thread::CatalogError;

/// Unified error type for pattern conversion.
///
/// Every failure is reported synchronously to the caller as a typed
/// variant; nothing is substituted with a default and nothing is retried
/// internally. A failing stage aborts the whole invocation with no partial
/// result.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The input bytes are not a recognized raster image.
    #[error("unable to decode image: {0}")]
    Decode(String),

    /// Target width or height is zero or outside the supported range.
    #[error("invalid pattern dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested pattern width in cells
        width: u32,
        /// Requested pattern height in cells
        height: u32,
    },

    /// Requested color count is outside the supported range.
    #[error("invalid color budget: {requested}")]
    InvalidColorBudget {
        /// Requested number of colors
        requested: usize,
    },

    /// A hex color string failed to parse.
    #[error("invalid color: {0}")]
    InvalidColorFormat(#[from] ParseColorError),

    /// A zero-row or zero-column grid was passed to rendering.
    #[error("grid has no cells")]
    EmptyGrid,

    /// Preview cell size was zero.
    #[error("preview cell size must be positive")]
    InvalidCellSize,

    /// The PNG writer failed.
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    /// Grid construction failed.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Thread catalog construction or loading failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
