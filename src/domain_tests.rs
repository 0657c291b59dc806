//! Domain-critical regression tests for stitchgrid.
//!
//! These tests pin the pipeline's contract properties, not just happy
//! paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use std::io::Cursor;

    use crate::api::PatternConverter;
    use crate::color::Rgb;
    use crate::grid::Grid;
    use crate::preview::render_preview;
    use crate::quantize::quantize;
    use crate::thread::{match_threads, ThreadCatalog, ThreadEntry};

    /// Encode RGBA pixels (row-major) as an in-memory PNG fixture.
    fn png_bytes(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
        assert_eq!(pixels.len(), (width * height) as usize);
        let mut img = image::RgbaImage::new(width, height);
        for (i, p) in pixels.iter().enumerate() {
            img.put_pixel(i as u32 % width, i as u32 / width, image::Rgba(*p));
        }
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("encoding test fixture");
        buf.into_inner()
    }

    // ========================================================================
    // Hex codec bijection
    // ========================================================================

    /// If this breaks, it means: formatting and parsing disagree somewhere
    /// in the 24-bit range, so colors change identity when round-tripped
    /// through the wire format. A strided sweep covers all channel
    /// combinations; the per-channel exhaustive sweep lives in color.rs.
    #[test]
    fn test_hex_round_trip_strided_full_space() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(17) {
                    let c = Rgb::new(r as u8, g as u8, b as u8);
                    let text = c.to_string();
                    assert_eq!(text.len(), 7, "canonical form is 7 chars, got {text:?}");
                    let back: Rgb = text.parse().expect("canonical form must parse");
                    assert_eq!(back, c);
                }
            }
        }
    }

    // ========================================================================
    // Dimension invariant
    // ========================================================================

    /// If this breaks, it means: the resampler's output size depends on the
    /// source size instead of the requested size. The grid must be exactly
    /// H rows of exactly W cells for any decodable input.
    #[test]
    fn test_dimension_invariant_across_source_sizes() {
        let converter = PatternConverter::new().colors(8);
        for (src_w, src_h) in [(1, 1), (3, 7), (64, 64), (101, 43)] {
            let pixels: Vec<[u8; 4]> = (0..src_w * src_h)
                .map(|i| [(i % 256) as u8, (i * 7 % 256) as u8, 9, 255])
                .collect();
            let bytes = png_bytes(src_w, src_h, &pixels);

            let pattern = converter.convert(&bytes, 25, 11).unwrap();
            assert_eq!(pattern.height(), 11, "source {src_w}x{src_h}");
            assert_eq!(pattern.width(), 25, "source {src_w}x{src_h}");
            for row in pattern.grid.rows() {
                assert_eq!(row.len(), 25, "jagged row for source {src_w}x{src_h}");
            }
        }
    }

    // ========================================================================
    // Palette bound
    // ========================================================================

    /// If this breaks, it means: the quantizer emits more distinct colors
    /// than the budget, or the extractor sees colors the quantizer never
    /// produced.
    #[test]
    fn test_palette_bound() {
        // A noisy gradient with far more distinct colors than the budget.
        let pixels: Vec<[u8; 4]> = (0..60u32 * 40)
            .map(|i| [(i % 251) as u8, (i % 241) as u8, (i % 239) as u8, 255])
            .collect();
        let bytes = png_bytes(60, 40, &pixels);

        for budget in [2, 3, 8, 16, 64] {
            let pattern = PatternConverter::new()
                .colors(budget)
                .convert(&bytes, 50, 40)
                .unwrap();
            assert!(
                pattern.palette.len() <= budget,
                "budget {budget} produced {} colors",
                pattern.palette.len()
            );
            // The palette is exactly the distinct colors of the grid.
            assert_eq!(pattern.palette, pattern.grid.palette());
        }
    }

    // ========================================================================
    // Quantization idempotence
    // ========================================================================

    /// If this breaks, it means: quantization moves colors that already fit
    /// the budget, so charts drift when re-processed at the same or a
    /// larger K.
    #[test]
    fn test_quantization_idempotent() {
        let colors: Vec<Rgb> = (0..100u32)
            .map(|i| Rgb::new((i * 31 % 256) as u8, (i * 17 % 256) as u8, (i * 3 % 256) as u8))
            .collect();
        let grid = Grid::new(colors, 10, 10);

        let once = quantize(&grid, 7);
        assert_eq!(quantize(&once, 7), once, "same K must be the identity");
        assert_eq!(quantize(&once, 8), once, "larger K must be the identity");
        assert_eq!(quantize(&once, 64), once);
    }

    // ========================================================================
    // Thread matching determinism
    // ========================================================================

    /// If this breaks, it means: nearest-thread selection depends on
    /// iteration order or other ambient state, so the same design gets
    /// different shopping lists on different runs.
    #[test]
    fn test_thread_matching_deterministic() {
        let catalog = ThreadCatalog::dmc();
        let palette: Vec<Rgb> = (0..64u8).map(|i| Rgb::new(i * 4, 255 - i * 2, i)).collect();

        let first = match_threads(&palette, &catalog);
        for _ in 0..5 {
            assert_eq!(match_threads(&palette, &catalog), first);
        }
    }

    // ========================================================================
    // Preview dimension and block laws
    // ========================================================================

    /// If this breaks, it means: the preview raster's size no longer equals
    /// grid size x cell size, or upscaling blends colors across cell
    /// boundaries.
    #[test]
    fn test_preview_dimension_and_block_law() {
        let colors: Vec<Rgb> = (0..12u8).map(|i| Rgb::new(i * 20, 255 - i * 10, i)).collect();
        let grid = Grid::new(colors, 4, 3);
        let cell = 6u32;

        let bytes = render_preview(&grid, cell).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (24, 18));

        for py in 0..18u32 {
            for px in 0..24u32 {
                let expected = grid.get((px / cell) as usize, (py / cell) as usize);
                let p = img.get_pixel(px, py);
                assert_eq!(
                    Rgb::new(p[0], p[1], p[2]),
                    expected,
                    "pixel ({px},{py}) does not match its cell"
                );
            }
        }
    }

    // ========================================================================
    // Concrete scenarios
    // ========================================================================

    /// If this breaks, it means: a source whose distinct colors already fit
    /// the budget is being altered. 2x2 {red, red, green, blue} at K=3 must
    /// pass through untouched with exactly that palette.
    #[test]
    fn test_small_image_within_budget_passes_through() {
        let bytes = png_bytes(
            2,
            2,
            &[
                [255, 0, 0, 255],
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
            ],
        );

        // Exercised below the public bounds on purpose: the stage functions
        // have no range opinion of their own.
        let grid = crate::resample::to_grid(&bytes, 2, 2).unwrap();
        let quantized = quantize(&grid, 3);
        assert_eq!(quantized, grid);

        let palette = quantized.palette();
        assert_eq!(
            palette,
            vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]
        );
    }

    /// If this breaks, it means: nearest-thread matching no longer finds
    /// the obvious candidate. Pure red against a one-entry table must
    /// return that entry's code.
    #[test]
    fn test_red_matches_dmc_321() {
        let catalog = ThreadCatalog::new(vec![ThreadEntry {
            code: "321".to_string(),
            name: "Red".to_string(),
            color: "#c1272d".parse().unwrap(),
        }])
        .unwrap();

        let mapping = match_threads(&[Rgb::new(255, 0, 0)], &catalog);
        assert_eq!(mapping.len(), 1);
        let m = &mapping.matches()[0];
        assert_eq!(m.code, "321");
        assert_eq!(m.color, Rgb::new(0xc1, 0x27, 0x2d));
        assert_eq!(m.original, Rgb::new(255, 0, 0));
    }

    // ========================================================================
    // End-to-end determinism
    // ========================================================================

    /// If this breaks, it means: some stage introduced ambient state or
    /// unseeded randomness. Two full runs over the same input must agree
    /// byte-for-byte, preview included.
    #[test]
    fn test_full_pipeline_deterministic() {
        let pixels: Vec<[u8; 4]> = (0..48u32 * 32)
            .map(|i| [(i * 5 % 256) as u8, (i * 11 % 256) as u8, (i % 256) as u8, 255])
            .collect();
        let bytes = png_bytes(48, 32, &pixels);
        let converter = PatternConverter::new().colors(10);

        let a = converter.convert(&bytes, 24, 16).unwrap();
        let b = converter.convert(&bytes, 24, 16).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.preview(4).unwrap(), b.preview(4).unwrap());
        assert_eq!(
            a.thread_mapping(&ThreadCatalog::dmc()),
            b.thread_mapping(&ThreadCatalog::dmc())
        );
    }
}
