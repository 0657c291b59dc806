//! stitchgrid: image-to-chart conversion for counted cross-stitch patterns.
//!
//! This library turns an arbitrary raster photograph into a fixed-size grid
//! of discrete colors suitable for a stitched chart, plus a reduced palette
//! and a mapping onto physical thread colors (DMC floss). It is a pure,
//! stateless core: bytes and numbers in, grid/palette/mapping/preview out.
//! Accounts, persistence, and HTTP belong to the caller.
//!
//! # Quick Start
//!
//! The [`PatternConverter`] builder is the primary entry point:
//!
//! ```no_run
//! use stitchgrid::{PatternConverter, ThreadCatalog};
//!
//! let bytes = std::fs::read("photo.png")?;
//!
//! let pattern = PatternConverter::new().colors(12).convert(&bytes, 50, 50)?;
//! let preview_png = pattern.preview(10)?;
//! let threads = pattern.thread_mapping(&ThreadCatalog::dmc());
//!
//! assert_eq!(pattern.width(), 50);
//! assert_eq!(threads.len(), pattern.palette.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! raw bytes                 (any common raster format)
//!     |
//!     v
//! resample                  (decode, composite onto white,
//!     |                      block-nearest downsample to W x H)
//!     v
//! quantize                  (median cut to <= K colors)
//!     |
//!     +---> Grid::palette   (dedup, first-encountered order)
//!     |          |
//!     |          +---> thread::match_threads   (nearest DMC entry)
//!     v
//! preview::render_preview   (block upscale, indexed PNG)
//! ```
//!
//! Two choices define the output's character:
//!
//! - **Sampling never blends.** Downsampling picks the proportionally
//!   nearest source pixel and the preview repeats each cell as a solid
//!   block. Averaging at either end would produce muddy in-between colors
//!   that no thread matches; a chart is supposed to be blocky.
//! - **Quantization is deterministic.** The median cut uses stable sorts,
//!   stable box order, and no randomness, so the same input and budget
//!   always produce the same chart, and re-quantizing a finished chart is
//!   the identity.
//!
//! Every stage is also exposed directly ([`resample::to_grid`],
//! [`quantize::quantize`], [`Grid::palette`], [`thread::match_threads`],
//! [`preview::render_preview`]) for callers that want to compose them
//! themselves. All failures surface as typed [`PatternError`] values.

pub mod api;
pub mod color;
pub mod error;
pub mod grid;
pub mod preview;
pub mod quantize;
pub mod resample;
pub mod thread;

#[cfg(test)]
mod domain_tests;

pub use api::{
    Pattern, PatternConverter, DEFAULT_COLORS, MAX_COLORS, MAX_DIMENSION, MIN_COLORS,
    MIN_DIMENSION,
};
pub use color::{ParseColorError, Rgb};
pub use error::PatternError;
pub use grid::{Grid, GridError};
pub use preview::{render_preview, DEFAULT_CELL_SIZE};
pub use quantize::quantize;
pub use thread::{
    match_threads, CatalogError, ThreadCatalog, ThreadEntry, ThreadMapping, ThreadMatch,
};
