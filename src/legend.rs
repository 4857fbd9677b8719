//! Legend: which threads a chart uses and how many stitches of each.

use crate::error::{ChartError, Result};
use crate::grid::LabelGrid;
use crate::threads::ThreadPalette;
use serde::{Deserialize, Serialize};

/// Legend entry with stitch statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub index: usize,
    pub code: String,
    pub name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub count: u32,
}

impl LegendEntry {
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Stitch count per palette index, `palette_len` long. Fails on a label
/// outside the palette.
pub fn count_labels(grid: &LabelGrid, palette_len: usize) -> Result<Vec<u32>> {
    let mut counts = vec![0u32; palette_len];
    for &label in grid.labels() {
        let slot = counts.get_mut(label as usize).ok_or_else(|| {
            ChartError::invalid_input(format!(
                "label {label} is outside the palette ({palette_len} entries)"
            ))
        })?;
        *slot += 1;
    }
    Ok(counts)
}

/// Entries for every used palette color, most stitches first.
///
/// Equal counts keep ascending palette order: candidates are collected by
/// index and the sort is stable.
pub fn build_legend(grid: &LabelGrid, palette: &ThreadPalette) -> Result<Vec<LegendEntry>> {
    let counts = count_labels(grid, palette.len())?;

    let mut legend: Vec<LegendEntry> = palette
        .entries()
        .iter()
        .zip(counts)
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(index, (entry, count))| LegendEntry {
            index,
            code: entry.code.clone(),
            name: entry.name.clone(),
            r: entry.rgb[0],
            g: entry.rgb[1],
            b: entry.rgb[2],
            count,
        })
        .collect();

    // Sort legend by stitch count (descending)
    legend.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(legend)
}
