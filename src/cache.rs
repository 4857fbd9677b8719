//! On-disk cache of chart outputs, keyed by a SHA-256 of everything that
//! affects the result.

use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::pipeline::ChartOutput;
use crate::threads::ThreadPalette;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

const CHART_CACHE_VERSION: u8 = 1;

pub fn build_cache_key(image_data: &[u8], palette: &ThreadPalette, config: &ChartConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update([CHART_CACHE_VERSION]);
    hasher.update((image_data.len() as u64).to_le_bytes());
    hasher.update(image_data);

    for entry in palette.entries() {
        hasher.update(entry.code.as_bytes());
        hasher.update([0]);
        hasher.update(entry.name.as_bytes());
        hasher.update([0]);
        hasher.update(entry.rgb);
    }

    hasher.update(config.max_size.to_le_bytes());
    hasher.update((config.min_region_size as u64).to_le_bytes());
    hasher.update([config.include_labels as u8]);

    let style = &config.style;
    hasher.update(style.cell.to_le_bytes());
    hasher.update(style.padding.to_le_bytes());
    hasher.update(style.tint.to_le_bytes());
    hasher.update(style.thin_line);
    hasher.update(style.bold_line);
    hasher.update(style.major_every.to_le_bytes());
    hasher.update(style.legend_header.to_le_bytes());
    hasher.update(style.legend_row.to_le_bytes());
    hasher.update(style.title.as_bytes());

    format!("{:x}", hasher.finalize())
}

pub fn cache_file(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

/// Cached output for `key`, if one was written before.
pub fn read_cache(dir: &Path, key: &str) -> Result<Option<ChartOutput>> {
    let path = cache_file(dir, key);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).map_err(|e| ChartError::io(&path, e))?;
    let parsed: ChartOutput = serde_json::from_slice(&bytes)?;
    Ok(Some(parsed))
}

pub fn write_cache(dir: &Path, key: &str, data: &ChartOutput) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ChartError::io(dir, e))?;
    let path = cache_file(dir, key);
    let payload = serde_json::to_vec(data)?;
    fs::write(&path, payload).map_err(|e| ChartError::io(&path, e))
}
