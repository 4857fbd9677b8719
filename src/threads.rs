//! Thread palettes: the ordered table of colors a chart may use.

use crate::color::{rgb_to_lab, LabColor};
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// A named thread color. Its position in the palette is its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub code: String,
    pub name: String,
    pub rgb: [u8; 3],
}

/// Lab coordinates of a palette entry, computed once when the palette is built
#[derive(Debug, Clone, Copy)]
pub struct LabPaletteEntry {
    pub index: usize,
    pub lab: LabColor,
}

/// On-disk form of a palette entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub code: String,
    pub name: String,
    pub hex: String,
}

/// Starter DMC table: (code, name, hex)
const DMC_STARTER: &[(&str, &str, &str)] = &[
    ("B5200", "Snow White", "#FFFFFF"),
    ("3865", "Winter White", "#F9F7F1"),
    ("3799", "Pewter Gray Vy Dk", "#424242"),
    ("310", "Black", "#000000"),
    ("321", "Red", "#C72B3B"),
    ("666", "Bright Red", "#E31D42"),
    ("742", "Tangerine Light", "#FFBF57"),
    ("704", "Chartreuse Bright", "#9ECF34"),
    ("995", "Electric Blue Dark", "#2696B6"),
];

static DMC_PALETTE: OnceLock<ThreadPalette> = OnceLock::new();

/// Immutable palette with precomputed Lab values.
///
/// Build it once and hand out `&ThreadPalette`; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ThreadPalette {
    entries: Vec<PaletteEntry>,
    labs: Vec<LabPaletteEntry>,
}

impl ThreadPalette {
    /// Build a palette. Fails on an empty table or one too large for `u16` labels.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ChartError::config("palette has no entries"));
        }
        if entries.len() > u16::MAX as usize + 1 {
            return Err(ChartError::config(format!(
                "palette has {} entries, at most {} are supported",
                entries.len(),
                u16::MAX as usize + 1
            )));
        }

        Ok(Self::build(entries))
    }

    fn build(entries: Vec<PaletteEntry>) -> Self {
        let labs = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| LabPaletteEntry {
                index,
                lab: rgb_to_lab(entry.rgb),
            })
            .collect();

        Self { entries, labs }
    }

    /// The built-in DMC starter table, initialized on first use.
    pub fn dmc() -> &'static Self {
        DMC_PALETTE.get_or_init(|| {
            let entries = DMC_STARTER
                .iter()
                .map(|(code, name, hex)| PaletteEntry {
                    code: code.to_string(),
                    name: name.to_string(),
                    rgb: hex_to_rgb(hex).unwrap_or([0, 0, 0]),
                })
                .collect();
            Self::build(entries)
        })
    }

    pub fn from_records(records: &[ThreadRecord]) -> Result<Self> {
        let entries = records
            .iter()
            .map(|record| {
                Ok(PaletteEntry {
                    code: record.code.clone(),
                    name: record.name.clone(),
                    rgb: hex_to_rgb(&record.hex)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    /// Parse a JSON array of `{"code", "name", "hex"}` records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ThreadRecord> = serde_json::from_str(json)?;
        Self::from_records(&records)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a palette built through `new`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub fn labs(&self) -> &[LabPaletteEntry] {
        &self.labs
    }

    pub fn to_records(&self) -> Vec<ThreadRecord> {
        self.entries
            .iter()
            .map(|entry| ThreadRecord {
                code: entry.code.clone(),
                name: entry.name.clone(),
                hex: rgb_to_hex(entry.rgb),
            })
            .collect()
    }
}

/// Convert hex string (`#RRGGBB` or `RRGGBB`) to RGB
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3]> {
    let trimmed = hex.trim().trim_start_matches('#');
    if trimmed.len() != 6 || !trimmed.is_ascii() {
        return Err(ChartError::config(format!("invalid hex color {hex:?}")));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&trimmed[range], 16)
            .map_err(|_| ChartError::config(format!("invalid hex color {hex:?}")))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Convert RGB to hex string
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_conversion() {
        assert_eq!(hex_to_rgb("#FF0000").unwrap(), [255, 0, 0]);
        assert_eq!(hex_to_rgb("00ff00").unwrap(), [0, 255, 0]);
        assert_eq!(hex_to_rgb("#0000FF").unwrap(), [0, 0, 255]);
        assert_eq!(rgb_to_hex([255, 128, 0]), "#FF8000");
        assert!(hex_to_rgb("#FFF").is_err());
        assert!(hex_to_rgb("#GG0000").is_err());
    }

    #[test]
    fn test_dmc_starter_table() {
        let palette = ThreadPalette::dmc();
        assert_eq!(palette.len(), 9);
        assert_eq!(palette.labs().len(), 9);

        let black = palette.entry(3).unwrap();
        assert_eq!(black.code, "310");
        assert_eq!(black.rgb, [0, 0, 0]);

        let red = palette.entry(4).unwrap();
        assert_eq!(red.rgb, [199, 43, 59]);

        for (i, lab) in palette.labs().iter().enumerate() {
            assert_eq!(lab.index, i);
        }
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let err = ThreadPalette::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }

    #[test]
    fn test_json_palette() {
        let json = r##"[
            {"code": "A", "name": "Black", "hex": "#000000"},
            {"code": "B", "name": "White", "hex": "#FFFFFF"}
        ]"##;
        let palette = ThreadPalette::from_json_str(json).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entry(1).unwrap().rgb, [255, 255, 255]);
        assert!((palette.labs()[1].lab.l - 100.0).abs() < 1e-2);

        let records = palette.to_records();
        assert_eq!(records[1].hex, "#FFFFFF");

        assert!(matches!(
            ThreadPalette::from_json_str("[]"),
            Err(ChartError::Config(_))
        ));
        assert!(matches!(
            ThreadPalette::from_json_str(r#"[{"code": "A", "name": "x", "hex": "nope"}]"#),
            Err(ChartError::Config(_))
        ));
        assert!(matches!(
            ThreadPalette::from_json_str("{"),
            Err(ChartError::Json(_))
        ));
    }
}
