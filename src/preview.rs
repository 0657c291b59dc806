//! Chart preview rendering.
//!
//! Re-expands a color grid into a raster where every cell becomes a uniform
//! `cell_size` x `cell_size` block -- an exact nearest-neighbor upscale with
//! no blending -- and encodes it as a PNG. Quantized grids carry few colors,
//! so the encoder prefers indexed output with a PLTE chunk and a bit depth
//! sized to the palette; grids with more than 256 distinct colors fall back
//! to 8-bit truecolor.

use std::collections::HashMap;
use std::io::Cursor;

use crate::color::Rgb;
use crate::error::PatternError;
use crate::grid::Grid;

/// Default cell edge length in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Render `grid` as a PNG preview with `cell_size` pixels per cell edge.
///
/// The output raster is exactly (width x cell_size, height x cell_size)
/// pixels.
///
/// # Errors
///
/// - [`PatternError::EmptyGrid`] if the grid has zero rows or columns
/// - [`PatternError::InvalidCellSize`] if `cell_size` is zero
/// - [`PatternError::PngEncode`] if the PNG writer fails
pub fn render_preview(grid: &Grid, cell_size: u32) -> Result<Vec<u8>, PatternError> {
    if grid.is_empty() {
        return Err(PatternError::EmptyGrid);
    }
    if cell_size == 0 {
        return Err(PatternError::InvalidCellSize);
    }

    let width = grid.width() as u32 * cell_size;
    let height = grid.height() as u32 * cell_size;
    let palette = grid.palette();

    tracing::debug!(
        width,
        height,
        cell_size,
        colors = palette.len(),
        "Rendering chart preview"
    );

    if palette.len() <= 256 {
        encode_indexed(grid, cell_size, width, height, &palette)
    } else {
        encode_truecolor(grid, cell_size, width, height)
    }
}

/// Indexed PNG: one PLTE entry per grid color, bit depth sized to the
/// palette, scanlines bit-packed.
fn encode_indexed(
    grid: &Grid,
    cell_size: u32,
    width: u32,
    height: u32,
    palette: &[Rgb],
) -> Result<Vec<u8>, PatternError> {
    let index_of: HashMap<Rgb, u8> = palette
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, i as u8))
        .collect();

    let (depth, bits) = match palette.len() {
        0..=2 => (png::BitDepth::One, 1u8),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    };
    let plte: Vec<u8> = palette.iter().flat_map(|c| c.channels()).collect();

    // Each grid row expands to cell_size identical scanlines; each cell's
    // palette index repeats cell_size times within the scanline.
    let mut data = Vec::new();
    for row in grid.rows() {
        let indices: Vec<u8> = row
            .iter()
            .flat_map(|c| std::iter::repeat(index_of[c]).take(cell_size as usize))
            .collect();
        let packed = pack_bits(&indices, bits);
        for _ in 0..cell_size {
            data.extend_from_slice(&packed);
        }
    }

    encode_png(width, height, png::ColorType::Indexed, depth, Some(&plte), &data)
}

/// 8-bit truecolor fallback for grids that skipped quantization.
fn encode_truecolor(
    grid: &Grid,
    cell_size: u32,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, PatternError> {
    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for row in grid.rows() {
        let scanline: Vec<u8> = row
            .iter()
            .flat_map(|c| std::iter::repeat(c.channels()).take(cell_size as usize))
            .flatten()
            .collect();
        for _ in 0..cell_size {
            data.extend_from_slice(&scanline);
        }
    }

    encode_png(
        width,
        height,
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        &data,
    )
}

/// Pack palette indices into N-bit PNG scanline data (1, 2, 4, or 8 bits
/// per pixel). Scanlines are byte-aligned, so this is applied per row.
fn pack_bits(indices: &[u8], bits: u8) -> Vec<u8> {
    if bits == 8 {
        return indices.to_vec();
    }
    let per_byte = (8 / bits) as usize;
    let mut packed = Vec::with_capacity(indices.len().div_ceil(per_byte));
    for chunk in indices.chunks(per_byte) {
        let mut byte = 0u8;
        for (i, &idx) in chunk.iter().enumerate() {
            byte |= idx << (8 - bits as usize * (i + 1));
        }
        packed.push(byte);
    }
    packed
}

/// Encode pixel data as a PNG.
fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, PatternError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        if let Some(plte) = plte {
            encoder.set_palette(plte.to_vec());
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| PatternError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| PatternError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
