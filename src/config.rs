//! Chart generation settings.
//!
//! Settings can be loaded from a JSON file. Missing fields take their
//! defaults, so `{}` is a valid configuration:
//!
//! ```no_run
//! use stitch_chart::ChartConfig;
//! use std::path::Path;
//!
//! let config = ChartConfig::from_json_file(Path::new("chart.json"))?;
//! # Ok::<(), stitch_chart::ChartError>(())
//! ```

use crate::chart::ChartStyle;
use crate::error::{ChartError, Result};
use crate::speckle::DEFAULT_MIN_REGION_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_SIZE: u32 = 150;

/// Configuration for one chart run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Longest side of the stitch grid; clamped to 16..=600
    pub max_size: u32,
    /// Components smaller than this are merged into their surroundings
    pub min_region_size: usize,
    /// Include the cleaned label grid in the output
    pub include_labels: bool,
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            min_region_size: DEFAULT_MIN_REGION_SIZE,
            include_labels: false,
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ChartError::io(path, e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.style.cell == 0 {
            return Err(ChartError::config("style.cell must be at least 1"));
        }
        if self.style.major_every == 0 {
            return Err(ChartError::config("style.major_every must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.style.tint) {
            return Err(ChartError::config(format!(
                "style.tint must be within 0..=1, got {}",
                self.style.tint
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ChartConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.max_size, 150);
        assert_eq!(config.min_region_size, 4);
        assert_eq!(config.style.cell, 20);
    }

    #[test]
    fn test_partial_style_override() {
        let config =
            ChartConfig::from_json_str(r#"{"min_region_size": 9, "style": {"cell": 12}}"#)
                .unwrap();
        assert_eq!(config.min_region_size, 9);
        assert_eq!(config.style.cell, 12);
        assert_eq!(config.style.padding, 30);
        assert_eq!(config.style.title, "Legend (DMC)");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ChartConfig::from_json_str(r#"{"style": {"tint": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));

        let err = ChartConfig::from_json_str(r#"{"style": {"major_every": 0}}"#).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));

        let err = ChartConfig::from_json_str(r#"{"max_size": "big"}"#).unwrap_err();
        assert!(matches!(err, ChartError::Json(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("stitch_chart_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chart.json");

        let mut config = ChartConfig::default();
        config.include_labels = true;
        config.style.tint = 0.5;
        config.to_json_file(&path).unwrap();

        assert_eq!(ChartConfig::from_json_file(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ChartConfig::from_json_file(Path::new("/nonexistent/chart.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/chart.json"));
    }
}
