pub mod acquire;
pub mod cache;
pub mod chart;
pub mod color;
pub mod config;
pub mod encode;
pub mod error;
pub mod glyphs;
pub mod grid;
pub mod legend;
pub mod matcher;
pub mod pipeline;
pub mod speckle;
pub mod threads;

pub use chart::{render_chart, ChartKey, ChartStyle};
pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use grid::{LabelGrid, PixelGrid};
pub use legend::{build_legend, LegendEntry};
pub use matcher::match_pixels;
pub use pipeline::{generate_chart, quantize, ChartLegendEntry, ChartOutput, QuantizedPattern};
pub use speckle::{remove_speckles, CleanupStats};
pub use threads::{PaletteEntry, ThreadPalette};

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Turn an image into a cross-stitch chart, reusing a cached result when a
/// cache directory is given.
///
/// # Arguments
/// * `image_bytes` - Raw image bytes (PNG, JPEG, etc.)
/// * `palette` - Thread colors to match against
/// * `config` - Size limit, cleanup threshold and drawing style
/// * `cache_dir` - Optional directory for cached outputs
///
/// # Returns
/// ChartOutput containing the rendered chart, legend, and processing time
pub fn process_chart(
    image_bytes: &[u8],
    palette: &ThreadPalette,
    config: &ChartConfig,
    cache_dir: Option<&Path>,
) -> Result<ChartOutput> {
    log::info!(
        "Processing chart: {} bytes, {} threads, max size {}, min region {}",
        image_bytes.len(),
        palette.len(),
        config.max_size,
        config.min_region_size
    );

    let cache_key = cache::build_cache_key(image_bytes, palette, config);
    if let Some(dir) = cache_dir {
        if let Some(cached) = cache::read_cache(dir, &cache_key)? {
            log::info!("Chart cache hit: {}", cache_key);
            return Ok(cached);
        }
    }

    let result = generate_chart(image_bytes, palette, config)?;

    log::info!(
        "Chart processed: {}x{}, {} stitches, {} colors, {}ms",
        result.width,
        result.height,
        result.total_stitches(),
        result.legend.len(),
        result.processing_time_ms
    );

    if let Some(dir) = cache_dir {
        cache::write_cache(dir, &cache_key, &result)?;
    }
    Ok(result)
}

/// Process an image from a file path into a chart.
///
/// Alternative to process_chart when the image is already on disk.
pub fn process_chart_file(
    path: &Path,
    palette: &ThreadPalette,
    config: &ChartConfig,
    cache_dir: Option<&Path>,
) -> Result<ChartOutput> {
    log::info!("Processing chart from file: {}", path.display());

    let bytes = fs::read(path).map_err(|e| ChartError::io(path, e))?;
    process_chart(&bytes, palette, config, cache_dir)
}

/// Write `contents` through a temporary sibling file and rename it into place.
pub fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ChartError::io(parent, e))?;
    }

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("chart-write"),
        stamp
    );
    let temp_path = path.with_file_name(temp_name);
    fs::write(&temp_path, contents).map_err(|e| ChartError::io(&temp_path, e))?;

    fs::rename(&temp_path, path).or_else(|rename_err| {
        if path.exists() {
            fs::remove_file(path).map_err(|e| ChartError::io(path, e))?;
            fs::rename(&temp_path, path).map_err(|e| ChartError::io(path, e))
        } else {
            Err(ChartError::io(path, rename_err))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_process_chart_uses_cache() {
        let dir = std::env::temp_dir().join(format!("stitch_chart_lib_{}", std::process::id()));
        let img = RgbImage::from_pixel(5, 5, Rgb([38, 150, 182]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let config = ChartConfig::default();
        let first = process_chart(&bytes, ThreadPalette::dmc(), &config, Some(&dir)).unwrap();
        assert_eq!(first.legend[0].entry.code, "995");

        let cached = cache::read_cache(&dir, &first.cache_key).unwrap();
        assert_eq!(cached.as_ref(), Some(&first));

        let second = process_chart(&bytes, ThreadPalette::dmc(), &config, Some(&dir)).unwrap();
        assert_eq!(second, first);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_file_atomic_replaces_existing() {
        let dir = std::env::temp_dir().join(format!("stitch_chart_write_{}", std::process::id()));
        let path = dir.join("nested").join("chart.png");

        write_file_atomic(&path, b"one").unwrap();
        write_file_atomic(&path, b"two").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"two");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = process_chart_file(
            Path::new("/nonexistent/input.png"),
            ThreadPalette::dmc(),
            &ChartConfig::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::Io { .. }));
        assert!(!err.is_client_error());
    }
}
