//! Median-cut color reduction.
//!
//! Collapses a grid's color space to at most K representative colors. The
//! algorithm is the classic recursive median cut over a histogram of
//! distinct colors: split the box with the greatest single-channel range
//! along that channel at the weighted median, until K boxes exist or no box
//! can be split further, then replace every pixel with its box's
//! count-weighted mean.
//!
//! Everything is deterministic: histogram entries keep first-encountered
//! row-major order, sorts are stable, box selection ties keep the earliest
//! box, and no randomness is involved. Re-running on the same grid and K
//! always reproduces the same output, and re-quantizing an already-reduced
//! grid with the same or larger K is the identity (distinct colors <= K
//! short-circuits before any splitting).

use std::collections::HashMap;

use crate::color::Rgb;
use crate::grid::Grid;

/// A distinct color and the number of grid cells carrying it.
type HistEntry = (Rgb, u32);

/// Reduce `grid` to at most `max_colors` distinct colors.
///
/// If the grid already uses `max_colors` or fewer distinct colors the grid
/// is returned unchanged. Callers are expected to validate the color budget
/// range at the API boundary; this function only honors whatever budget it
/// is given.
pub fn quantize(grid: &Grid, max_colors: usize) -> Grid {
    let histogram = build_histogram(grid);
    if histogram.len() <= max_colors {
        tracing::debug!(
            distinct = histogram.len(),
            budget = max_colors,
            "Distinct colors within budget, skipping reduction"
        );
        return grid.clone();
    }

    let mut boxes = vec![ColorBox::new(histogram)];
    while boxes.len() < max_colors {
        // Split the box with the greatest channel range; strict comparison
        // keeps the earliest box on ties. Boxes with a single distinct
        // color cannot be split.
        let mut best: Option<(usize, u8)> = None;
        for (idx, b) in boxes.iter().enumerate() {
            if b.entries.len() < 2 {
                continue;
            }
            let (_, range) = b.widest_axis();
            if best.map_or(true, |(_, r)| range > r) {
                best = Some((idx, range));
            }
        }
        let Some((idx, _)) = best else {
            break;
        };

        // Parent slot takes the left half and the right half goes to the
        // end, so box order stays stable across iterations.
        let (left, right) = boxes.remove(idx).split();
        boxes.insert(idx, left);
        boxes.push(right);
    }

    // Map every distinct color to its box's representative, then repaint.
    let mut replacement: HashMap<Rgb, Rgb> = HashMap::new();
    for b in &boxes {
        let mean = b.mean();
        for (color, _) in &b.entries {
            replacement.insert(*color, mean);
        }
    }

    tracing::debug!(
        boxes = boxes.len(),
        budget = max_colors,
        "Reduced color space by median cut"
    );

    let cells = grid.cells().iter().map(|c| replacement[c]).collect();
    Grid::new(cells, grid.width(), grid.height())
}

/// Count distinct colors in first-encountered row-major order.
fn build_histogram(grid: &Grid) -> Vec<HistEntry> {
    let mut index: HashMap<Rgb, usize> = HashMap::new();
    let mut entries: Vec<HistEntry> = Vec::new();
    for &color in grid.cells() {
        match index.get(&color) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(color, entries.len());
                entries.push((color, 1));
            }
        }
    }
    entries
}

/// A box of histogram entries for median-cut subdivision.
struct ColorBox {
    entries: Vec<HistEntry>,
}

impl ColorBox {
    fn new(entries: Vec<HistEntry>) -> Self {
        Self { entries }
    }

    fn count(&self) -> u64 {
        self.entries.iter().map(|(_, n)| *n as u64).sum()
    }

    /// Per-channel value range (max - min) across the box.
    fn ranges(&self) -> [u8; 3] {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for (color, _) in &self.entries {
            for (axis, v) in color.channels().into_iter().enumerate() {
                min[axis] = min[axis].min(v);
                max[axis] = max[axis].max(v);
            }
        }
        [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
    }

    /// The channel with the greatest range, lower axis index on ties.
    fn widest_axis(&self) -> (usize, u8) {
        let ranges = self.ranges();
        let mut axis = 0;
        for i in 1..3 {
            if ranges[i] > ranges[axis] {
                axis = i;
            }
        }
        (axis, ranges[axis])
    }

    /// Split along the widest channel at the weighted median, keeping at
    /// least one entry on each side.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (axis, _) = self.widest_axis();

        // Stable sort: entries with equal channel values keep histogram
        // order, which keeps the whole cut deterministic.
        self.entries.sort_by_key(|(color, _)| color.channels()[axis]);

        let half = self.count() / 2;
        let mut accumulated = 0u64;
        let mut split_idx = 1;
        for (i, (_, n)) in self.entries.iter().enumerate() {
            accumulated += *n as u64;
            if accumulated >= half && i + 1 < self.entries.len() {
                split_idx = i + 1;
                break;
            }
        }
        split_idx = split_idx.clamp(1, self.entries.len() - 1);

        let right = self.entries.split_off(split_idx);
        (ColorBox::new(self.entries), ColorBox::new(right))
    }

    /// Count-weighted channel mean, rounded to the nearest integer.
    fn mean(&self) -> Rgb {
        let mut sum = [0u64; 3];
        let mut total = 0u64;
        for (color, n) in &self.entries {
            let w = *n as u64;
            for (axis, v) in color.channels().into_iter().enumerate() {
                sum[axis] += v as u64 * w;
            }
            total += w;
        }
        // Boxes are never empty: construction starts from a non-empty
        // histogram and split keeps one entry per side.
        Rgb::new(
            ((sum[0] + total / 2) / total) as u8,
            ((sum[1] + total / 2) / total) as u8,
            ((sum[2] + total / 2) / total) as u8,
        )
    }
}
