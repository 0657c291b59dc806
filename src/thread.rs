//! Reference thread catalog and nearest-color matching.
//!
//! A [`ThreadCatalog`] is the fixed table of physical thread colors (DMC
//! floss codes) that a design palette gets matched against. The catalog is
//! injected configuration, never global state: tests and callers supply
//! their own tables, and a built-in DMC starter subset is provided for
//! convenience. Entry order is significant -- nearest-color ties keep the
//! first-listed entry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;

/// Error type for catalog construction and loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entries supplied.
    #[error("thread catalog cannot be empty")]
    Empty,
    /// Two entries share the same thread code.
    #[error("duplicate thread code {code:?} at index {index}")]
    DuplicateCode {
        /// The repeated code
        code: String,
        /// Index of the second occurrence
        index: usize,
    },
    /// The JSON payload did not parse.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single reference thread color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    /// Manufacturer code, e.g. `"310"`
    pub code: String,
    /// Display name, e.g. `"Black"`
    pub name: String,
    /// The thread's color
    #[serde(rename = "hex")]
    pub color: Rgb,
}

/// Ordered reference table of thread colors.
///
/// Construction validates that the table is non-empty and that codes are
/// unique, so lookups never have to deal with a degenerate catalog.
#[derive(Debug, Clone)]
pub struct ThreadCatalog {
    entries: Vec<ThreadEntry>,
}

impl ThreadCatalog {
    /// Create a catalog from entries, keeping their order.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Empty`] for an empty table,
    /// [`CatalogError::DuplicateCode`] if a code repeats.
    pub fn new(entries: Vec<ThreadEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if !seen.insert(entry.code.as_str()) {
                return Err(CatalogError::DuplicateCode {
                    code: entry.code.clone(),
                    index,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a JSON array of `{code, name, hex}` objects.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<ThreadEntry> = serde_json::from_str(json)?;
        let catalog = Self::new(entries)?;
        tracing::info!(entries = catalog.len(), "Loaded thread catalog");
        Ok(catalog)
    }

    /// The built-in DMC floss starter subset.
    pub fn dmc() -> Self {
        let entries = [
            ("310", "Black", Rgb::new(0x00, 0x00, 0x00)),
            ("B5200", "White", Rgb::new(0xff, 0xff, 0xff)),
            ("321", "Red", Rgb::new(0xc1, 0x27, 0x2d)),
            ("798", "Blue", Rgb::new(0x2b, 0x4c, 0x8f)),
            ("907", "Green", Rgb::new(0xaf, 0xcd, 0x3a)),
            ("741", "Orange", Rgb::new(0xff, 0x8c, 0x00)),
            ("208", "Purple", Rgb::new(0x91, 0x2f, 0x80)),
            ("3853", "Orange", Rgb::new(0xf2, 0x7b, 0x3a)),
            ("3812", "Teal", Rgb::new(0x00, 0xa3, 0x90)),
            ("725", "Yellow", Rgb::new(0xff, 0xc7, 0x00)),
        ]
        .into_iter()
        .map(|(code, name, color)| ThreadEntry {
            code: code.to_string(),
            name: name.to_string(),
            color,
        })
        .collect();
        // Static data, unique codes by inspection; validity is pinned by a test.
        Self { entries }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty catalogs are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries, in catalog order.
    #[inline]
    pub fn entries(&self) -> &[ThreadEntry] {
        &self.entries
    }

    /// Find the catalog entry nearest to `color` by squared Euclidean RGB
    /// distance. Linear scan; strict comparison keeps the first-listed
    /// entry on ties. Fine for the sizes involved (palette <= 64, catalogs
    /// up to a few thousand entries).
    pub fn find_nearest(&self, color: Rgb) -> &ThreadEntry {
        let mut best = &self.entries[0];
        let mut best_dist = color.distance_squared(best.color);
        for entry in &self.entries[1..] {
            let dist = color.distance_squared(entry.color);
            if dist < best_dist {
                best_dist = dist;
                best = entry;
            }
        }
        best
    }
}

/// One palette color resolved to its closest catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadMatch {
    /// The design palette color being matched
    pub original: Rgb,
    /// Matched thread code
    pub code: String,
    /// Matched thread display name
    pub name: String,
    /// Matched thread color
    #[serde(rename = "hex")]
    pub color: Rgb,
}

/// Thread assignments for a palette: one match per palette color, in
/// palette order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThreadMapping {
    matches: Vec<ThreadMatch>,
}

impl ThreadMapping {
    /// The matches, in palette order.
    #[inline]
    pub fn matches(&self) -> &[ThreadMatch] {
        &self.matches
    }

    /// Look up the match for a palette color.
    pub fn get(&self, original: Rgb) -> Option<&ThreadMatch> {
        self.matches.iter().find(|m| m.original == original)
    }

    /// Number of matches.
    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True if the palette was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Match every palette color to its nearest catalog entry.
///
/// Full scan, O(|palette| x |catalog|); deterministic for a given palette
/// and catalog.
pub fn match_threads(palette: &[Rgb], catalog: &ThreadCatalog) -> ThreadMapping {
    let matches = palette
        .iter()
        .map(|&original| {
            let entry = catalog.find_nearest(original);
            ThreadMatch {
                original,
                code: entry.code.clone(),
                name: entry.name.clone(),
                color: entry.color,
            }
        })
        .collect();
    ThreadMapping { matches }
}
