//! Source image decoding and block-nearest resampling.
//!
//! The first pipeline stage: raw bytes in any common raster format are
//! decoded, composited onto an opaque white background, and collapsed to an
//! exact W×H cell grid. Sampling is deliberately blocky -- each output cell
//! takes the single proportionally-nearest source pixel, never an average --
//! because the chart is supposed to look pixelated, not like a blurred
//! miniature.

use image::GenericImageView;

use crate::color::Rgb;
use crate::error::PatternError;
use crate::grid::Grid;

/// Decode and resample raw image bytes to an exact `width` x `height` grid.
///
/// Accepts any raster format the `image` crate recognizes (PNG, JPEG, GIF,
/// BMP, WebP, ...). Transparency is composited onto white before sampling.
///
/// # Errors
///
/// - [`PatternError::Decode`] if the bytes are not a recognized raster image
/// - [`PatternError::InvalidDimensions`] if `width` or `height` is zero
pub fn to_grid(image_bytes: &[u8], width: u32, height: u32) -> Result<Grid, PatternError> {
    if width == 0 || height == 0 {
        return Err(PatternError::InvalidDimensions { width, height });
    }

    let (pixels, src_width, src_height) = decode(image_bytes)?;
    Ok(block_sample(&pixels, src_width, src_height, width, height))
}

/// Decode raw bytes into a flat row-major RGB buffer plus dimensions.
///
/// Every source is expanded to RGBA and alpha-composited onto white with
/// 8-bit integer arithmetic: alpha 255 keeps the color, alpha 0 yields
/// white, partial alpha blends linearly toward white. Images without an
/// alpha channel pass through unchanged.
pub(crate) fn decode(image_bytes: &[u8]) -> Result<(Vec<Rgb>, u32, u32), PatternError> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| PatternError::Decode(e.to_string()))?;
    let (src_width, src_height) = img.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(PatternError::Decode("image has no pixels".into()));
    }

    tracing::debug!(src_width, src_height, "Decoded source image");

    let rgba = img.to_rgba8();
    let pixels = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|pixel| composite_on_white(pixel[0], pixel[1], pixel[2], pixel[3]))
        .collect();

    Ok((pixels, src_width, src_height))
}

/// Alpha-composite a single RGBA pixel against an opaque white background.
#[inline]
fn composite_on_white(r: u8, g: u8, b: u8, a: u8) -> Rgb {
    if a == 255 {
        Rgb::new(r, g, b)
    } else if a == 0 {
        Rgb::WHITE
    } else {
        let af = a as u16;
        let cr = ((r as u16 * af + 255 * (255 - af)) / 255) as u8;
        let cg = ((g as u16 * af + 255 * (255 - af)) / 255) as u8;
        let cb = ((b as u16 * af + 255 * (255 - af)) / 255) as u8;
        Rgb::new(cr, cg, cb)
    }
}

/// Nearest-source sampling: output cell (x, y) takes the source pixel whose
/// coordinate is proportionally nearest -- `floor((x + 0.5) * srcW / outW)`,
/// clamped to the last source column (same for rows). No smoothing.
pub(crate) fn block_sample(
    pixels: &[Rgb],
    src_width: u32,
    src_height: u32,
    out_width: u32,
    out_height: u32,
) -> Grid {
    let scale_x = src_width as f64 / out_width as f64;
    let scale_y = src_height as f64 / out_height as f64;

    let mut cells = Vec::with_capacity(out_width as usize * out_height as usize);
    for y in 0..out_height {
        let sy = (((y as f64 + 0.5) * scale_y) as u32).min(src_height - 1);
        for x in 0..out_width {
            let sx = (((x as f64 + 0.5) * scale_x) as u32).min(src_width - 1);
            cells.push(pixels[(sy * src_width + sx) as usize]);
        }
    }

    Grid::new(cells, out_width as usize, out_height as usize)
}
