//! Nearest palette entry per pixel (CIE76 in Lab space).

use crate::color::{delta_e76_squared, rgb_to_lab, rgb_to_lab_batch, LabColor};
use crate::grid::{LabelGrid, PixelGrid};
use crate::threads::ThreadPalette;
use std::collections::HashMap;

/// Index of the closest palette color. On equal distance the lower index wins.
pub fn nearest_index(target: LabColor, palette: &ThreadPalette) -> u16 {
    let mut best_idx = 0usize;
    let mut best_dist = f32::INFINITY;
    for entry in palette.labs() {
        let dist = delta_e76_squared(target, entry.lab);
        if dist < best_dist {
            best_dist = dist;
            best_idx = entry.index;
        }
    }
    best_idx as u16
}

/// Label every pixel with its nearest palette entry.
///
/// Pixels are converted in one batch and the answer for each distinct RGB
/// value is reused, so photos with large flat areas stay cheap.
pub fn match_pixels(grid: &PixelGrid, palette: &ThreadPalette) -> LabelGrid {
    let pixels = grid.pixels();
    let labs = rgb_to_lab_batch(pixels);
    let mut seen: HashMap<[u8; 3], u16> = HashMap::new();

    let labels = pixels
        .iter()
        .zip(labs)
        .map(|(rgb, lab)| *seen.entry(*rgb).or_insert_with(|| nearest_index(lab, palette)))
        .collect();

    LabelGrid::for_pixels(grid, labels)
}

/// Per-pixel reference matcher without batching or memoization.
pub fn match_pixels_scalar(grid: &PixelGrid, palette: &ThreadPalette) -> LabelGrid {
    let labels = grid
        .pixels()
        .iter()
        .map(|rgb| nearest_index(rgb_to_lab(*rgb), palette))
        .collect();

    LabelGrid::for_pixels(grid, labels)
}
