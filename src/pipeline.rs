//! Image → cross-stitch chart, end to end.

use crate::acquire::{decode_image, resize_keep_ratio};
use crate::cache::build_cache_key;
use crate::chart::{chart_dimensions, render_chart, symbol_for};
use crate::config::ChartConfig;
use crate::encode::{decode_png_data_url, png_data_url};
use crate::error::Result;
use crate::grid::{LabelGrid, PixelGrid};
use crate::legend::{build_legend, LegendEntry};
use crate::matcher::match_pixels;
use crate::speckle::{remove_speckles, CleanupStats};
use crate::threads::ThreadPalette;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Matched and cleaned pattern, before rendering
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedPattern {
    pub labels: LabelGrid,
    pub legend: Vec<LegendEntry>,
    pub cleanup: CleanupStats,
}

/// Match every pixel to the palette, absorb speckles, and tally the legend.
pub fn quantize(
    pixels: &PixelGrid,
    palette: &ThreadPalette,
    min_region_size: usize,
) -> Result<QuantizedPattern> {
    let mut labels = match_pixels(pixels, palette);
    let cleanup = remove_speckles(&mut labels, min_region_size);
    log::debug!(
        "Speckle cleanup: {} components, {} merged ({} cells)",
        cleanup.components,
        cleanup.relabeled_components,
        cleanup.relabeled_cells
    );
    let legend = build_legend(&labels, palette)?;

    Ok(QuantizedPattern {
        labels,
        legend,
        cleanup,
    })
}

/// Legend entry as shown on the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLegendEntry {
    #[serde(flatten)]
    pub entry: LegendEntry,
    pub symbol: char,
}

/// Everything a caller needs to show or save a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOutput {
    /// Stitch grid size
    pub width: usize,
    pub height: usize,
    pub legend: Vec<ChartLegendEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Vec<u16>>>,
    /// Rendered chart as a `data:image/png;base64,` URL
    pub image_png_base64: String,
    pub cache_key: String,
    pub cleanup: CleanupStats,
    pub processing_time_ms: u64,
}

impl ChartOutput {
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        decode_png_data_url(&self.image_png_base64)
    }

    pub fn total_stitches(&self) -> u64 {
        self.legend.iter().map(|e| e.entry.count as u64).sum()
    }
}

/// Turn encoded image bytes into a rendered chart.
pub fn generate_chart(
    image_bytes: &[u8],
    palette: &ThreadPalette,
    config: &ChartConfig,
) -> Result<ChartOutput> {
    let start_time = Instant::now();
    config.validate()?;

    let img = decode_image(image_bytes)?;
    let img = resize_keep_ratio(&img, config.max_size);
    let pixels = PixelGrid::from_rgb_image(&img)?;

    let pattern = quantize(&pixels, palette, config.min_region_size)?;
    let canvas = render_chart(&pattern.labels, &pattern.legend, palette.len(), &config.style);
    debug_assert_eq!(
        canvas.dimensions(),
        chart_dimensions(&pattern.labels, &pattern.legend, &config.style)
    );
    let image_png_base64 = png_data_url(&canvas)?;

    let legend = pattern
        .legend
        .into_iter()
        .enumerate()
        .map(|(position, entry)| ChartLegendEntry {
            entry,
            symbol: symbol_for(position),
        })
        .collect();

    Ok(ChartOutput {
        width: pattern.labels.width(),
        height: pattern.labels.height(),
        legend,
        labels: config.include_labels.then(|| pattern.labels.rows()),
        image_png_base64,
        cache_key: build_cache_key(image_bytes, palette, config),
        cleanup: pattern.cleanup,
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    })
}
